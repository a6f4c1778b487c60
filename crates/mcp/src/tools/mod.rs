pub mod connectors;
pub mod logs;
pub mod params;
pub mod pipelines;
pub mod pull_requests;
mod registry;
pub mod repositories;
pub mod scope;

pub use params::{ArgumentError, ParamKind, ParamSchema, ParamSpec, ParamSpecError, ToolParams};
pub use registry::{Tool, ToolRegistry};
pub use scope::{ScopeArgs, ScopeDefaults};

#[cfg(test)]
pub(crate) use registry::testing;

use crate::protocol::ToolSchema;
use anyhow::{Context, Result};
use harness_sdk::HarnessClient;
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// What every Harness tool needs: the API client and the configured scope.
#[derive(Clone)]
pub struct ToolContext {
    pub client: Arc<HarnessClient>,
    pub scope: ScopeDefaults,
}

impl ToolContext {
    pub fn new(client: Arc<HarnessClient>, scope: ScopeDefaults) -> Self {
        Self { client, scope }
    }
}

/// Name, description and validated parameters of one tool.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    name: &'static str,
    description: &'static str,
    params: ParamSchema,
}

impl ToolDefinition {
    pub fn new(
        name: &'static str,
        description: &'static str,
        params: ToolParams,
    ) -> Result<Self, ParamSpecError> {
        Ok(Self {
            name,
            description,
            params: params.build()?,
        })
    }

    pub fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.params.input_schema(),
        }
    }

    pub fn decode<T: DeserializeOwned>(&self, arguments: serde_json::Value) -> Result<T> {
        self.params
            .decode(arguments)
            .with_context(|| format!("Invalid arguments for {}", self.name))
    }
}

#[cfg(test)]
pub(crate) fn test_context(server: &wiremock::MockServer, scope: ScopeDefaults) -> ToolContext {
    let client = HarnessClient::builder()
        .base_url(server.uri())
        .api_key("pat.test")
        .retry_config(harness_sdk::RetryConfig::no_retry())
        .build()
        .unwrap();
    ToolContext::new(Arc::new(client), scope)
}
