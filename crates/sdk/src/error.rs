//! Error types for the Harness SDK.

use std::fmt;

/// Result type for SDK operations.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Category of an HTTP status code.
///
/// Derived from the status code alone, never from the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    BadRequest,
    NotFound,
    Internal,
    /// Any other 4xx.
    Client(u16),
    /// Any 5xx other than 500.
    Server(u16),
    /// 3xx, further action required.
    Redirect(u16),
    None,
}

impl StatusClass {
    pub fn classify(status: u16) -> Self {
        match status {
            500 => Self::Internal,
            501.. => Self::Server(status),
            404 => Self::NotFound,
            400 => Self::BadRequest,
            401..=499 => Self::Client(status),
            300..=399 => Self::Redirect(status),
            _ => Self::None,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// 429 and every 5xx may succeed on a later attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Internal | Self::Server(_) | Self::Client(429))
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadRequest => write!(f, "bad request"),
            Self::NotFound => write!(f, "not found"),
            Self::Internal => write!(f, "internal error"),
            Self::Client(code) => write!(f, "received client side error status code {}", code),
            Self::Server(code) => write!(f, "received server side error status code {}", code),
            Self::Redirect(code) => {
                write!(f, "received further action required status code {}", code)
            }
            Self::None => write!(f, "no error"),
        }
    }
}

fn status_message(class: &StatusClass, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("{}: {}", class, detail),
        None => class.to_string(),
    }
}

/// Error types that can occur when using the Harness SDK.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The request could not be sent or its body could not be read.
    #[error("request execution failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The request could not be constructed.
    #[error("unable to create HTTP request: {0}")]
    Request(String),

    /// The request body could not be serialized.
    #[error("failed to serialize body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Non-success status without a structured error document.
    #[error("{}", status_message(.class, .detail))]
    Status {
        class: StatusClass,
        detail: Option<String>,
    },

    /// Non-success status with a structured error document.
    #[error("API error: {message}")]
    Api {
        class: StatusClass,
        code: String,
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("error deserializing response body: {source} - original response: {body}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The last error of a call made under a retry policy.
    #[error("request failed after {retries} retries: {source}")]
    RetriesExhausted {
        retries: u32,
        #[source]
        source: Box<HarnessError>,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error annotated with the operation that produced it.
    #[error("{operation}: {source}")]
    Context {
        operation: String,
        #[source]
        source: Box<HarnessError>,
    },
}

impl HarnessError {
    /// Wrap `source` with the name of the failed operation.
    pub fn context(operation: impl Into<String>, source: HarnessError) -> Self {
        Self::Context {
            operation: operation.into(),
            source: Box::new(source),
        }
    }

    /// Whether a retry policy may try the call again.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => !e.is_builder(),
            Self::Status { class, .. } | Self::Api { class, .. } => class.is_retryable(),
            Self::Decode { .. } => true,
            _ => false,
        }
    }

    /// Status classification of the underlying HTTP failure, if any.
    pub fn status_class(&self) -> Option<StatusClass> {
        match self {
            Self::Status { class, .. } | Self::Api { class, .. } => Some(*class),
            Self::RetriesExhausted { source, .. } | Self::Context { source, .. } => {
                source.status_class()
            }
            _ => None,
        }
    }

    /// Number of retries spent before this error surfaced.
    pub fn retries(&self) -> u32 {
        match self {
            Self::RetriesExhausted { retries, .. } => *retries,
            Self::Context { source, .. } => source.retries(),
            _ => 0,
        }
    }
}
