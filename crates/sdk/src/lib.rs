//! # Harness SDK
//!
//! Rust client for the Harness platform REST API.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use harness_sdk::{HarnessClient, HarnessResult};
//! use harness_core::{pipeline::PipelineListOptions, Scope};
//!
//! #[tokio::main]
//! async fn main() -> HarnessResult<()> {
//!     // Build client
//!     let client = HarnessClient::builder()
//!         .api_key("pat.your-api-key")
//!         .build()?;
//!
//!     let scope = Scope::new("account", "default", "my_project");
//!
//!     // List pipelines
//!     let pipelines = client
//!         .pipelines()
//!         .list(&scope, PipelineListOptions::default())
//!         .await?;
//!     println!("Found {} pipelines", pipelines.data.total_elements);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Retries
//!
//! Listing and lookup POSTs retry transient failures (transport errors, 429,
//! 5xx, malformed success bodies) under the client's [`RetryConfig`].
//! Mutating calls are attempted once.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;

// Re-export main client
pub use client::{HarnessClient, HarnessClientBuilder};
pub use config::{ClientConfig, RetryConfig, RetryPolicy};
pub use error::{HarnessError, HarnessResult, StatusClass};
pub use transport::{HttpTransport, Retried};
