//! Main client for the Harness SDK.

use crate::api::*;
use crate::config::{ClientConfig, RetryConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::error::{HarnessError, HarnessResult};
use crate::transport::HttpTransport;
use harness_core::PageLimits;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Harness API.
#[derive(Debug, Clone)]
pub struct HarnessClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl HarnessClient {
    /// Create a new client builder.
    pub fn builder() -> HarnessClientBuilder {
        HarnessClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(config: ClientConfig) -> HarnessResult<Self> {
        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Low-level transport, for endpoints without a typed service.
    pub fn http(&self) -> &HttpTransport {
        &self.http
    }

    /// Get the pipelines API.
    pub fn pipelines(&self) -> PipelinesApi<'_> {
        PipelinesApi::new(self)
    }

    /// Get the pull requests API.
    pub fn pull_requests(&self) -> PullRequestsApi<'_> {
        PullRequestsApi::new(self)
    }

    /// Get the repositories API.
    pub fn repositories(&self) -> RepositoriesApi<'_> {
        RepositoriesApi::new(self)
    }

    /// Get the logs API.
    pub fn logs(&self) -> LogsApi<'_> {
        LogsApi::new(self)
    }

    /// Get the connectors API.
    pub fn connectors(&self) -> ConnectorsApi<'_> {
        ConnectorsApi::new(self)
    }
}

/// Builder for creating a HarnessClient.
pub struct HarnessClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
    retry_config: RetryConfig,
    page_limits: PageLimits,
}

impl HarnessClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retry_config: RetryConfig::default(),
            page_limits: PageLimits::default(),
        }
    }

    /// Set the base URL. Defaults to the Harness SaaS endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the retry configuration.
    pub fn retry_config(mut self, config: RetryConfig) -> Self {
        self.retry_config = config;
        self
    }

    /// Set the default and maximum page size.
    pub fn page_limits(mut self, limits: PageLimits) -> Self {
        self.page_limits = limits;
        self
    }

    /// Build the client.
    pub fn build(self) -> HarnessResult<HarnessClient> {
        let api_key = self
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| HarnessError::Config("API key is required".to_string()))?;

        let base_url = Url::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;

        let config = ClientConfig {
            base_url,
            api_key,
            timeout: self.timeout,
            retry_config: self.retry_config,
            page_limits: self.page_limits,
        };

        HarnessClient::from_config(config)
    }
}

impl Default for HarnessClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
