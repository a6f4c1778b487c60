// Connector listing tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{ParamSpecError, ScopeArgs, Tool, ToolContext, ToolDefinition, ToolParams};
use anyhow::Result;
use harness_core::connector::{ConnectorListOptions, ListConnectorRequest};
use harness_core::pagination::PaginationOptions;
use serde::Deserialize;

/// List connectors, optionally filtered
pub struct ListConnectorsTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct ListConnectorsArgs {
    #[serde(default)]
    connector_names: Vec<String>,
    #[serde(default)]
    connector_ids: Vec<String>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    categories: Vec<String>,
    page: u32,
    size: u32,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl ListConnectorsTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "list_connectors",
            "List available connectors",
            ToolParams::new()
                .string_array("connector_names", "List of connector names to filter by")
                .string_array("connector_ids", "List of connector IDs to filter by")
                .string_array("types", "Connector types to filter by (e.g. Aws, Github)")
                .string_array(
                    "categories",
                    "Connector categories to filter by (e.g. CLOUD_PROVIDER)",
                )
                .pagination()
                .scope(&ctx.scope, false),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for ListConnectorsTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListConnectorsArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, false)?;

        let opts = ConnectorListOptions {
            pagination: PaginationOptions::new(args.page, args.size),
            filter: ListConnectorRequest {
                categories: args.categories,
                connector_names: args.connector_names,
                connector_identifiers: args.connector_ids,
                types: args.types,
                ..Default::default()
            },
        };
        let list = self.ctx.client.connectors().list(&scope, opts).await?;
        Ok(CallToolResult::json(&list.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{test_context, ScopeDefaults};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_connectors_account_level() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ng/api/connectors/listV2"))
            .and(query_param("accountIdentifier", "acc"))
            .and(query_param("orgIdentifier", ""))
            .and(body_json(json!({
                "connectorIdentifiers": ["github_main"],
                "filterType": "Connector"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "SUCCESS",
                "data": {"content": [{"connector": {"identifier": "github_main", "type": "Github"}}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tool =
            ListConnectorsTool::new(test_context(&server, ScopeDefaults::new("acc", "", ""))).unwrap();
        let schema = tool.schema();
        assert_eq!(schema.input_schema["required"], json!([]));

        let result = tool
            .execute(json!({"connector_ids": ["github_main"]}))
            .await
            .unwrap();
        assert!(result.is_error.is_none());
    }
}
