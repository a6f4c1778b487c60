// Execution log download tool

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{ParamSpecError, ScopeArgs, Tool, ToolContext, ToolDefinition, ToolParams};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Download the log archive of an execution to a local directory
pub struct DownloadExecutionLogsTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct DownloadLogsArgs {
    plan_execution_id: String,
    logs_directory: PathBuf,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl DownloadExecutionLogsTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "download_execution_logs",
            "Downloads logs for an execution inside Harness",
            ToolParams::new()
                .required_string("plan_execution_id", "The ID of the plan execution")
                .required_string(
                    "logs_directory",
                    "The absolute path to the directory where the logs should get downloaded",
                )
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for DownloadExecutionLogsTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: DownloadLogsArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let logs = self.ctx.client.logs();
        let link = logs.download_url(&scope, &args.plan_execution_id).await?;

        let folder = args
            .logs_directory
            .join(format!("logs-{}", args.plan_execution_id));
        tokio::fs::create_dir_all(&folder)
            .await
            .with_context(|| format!("failed to create logs folder {}", folder.display()))?;

        let zip_path = folder.join("logs.zip");
        let written = logs.download_archive(&link, &zip_path).await?;
        tracing::info!(
            plan_execution_id = %args.plan_execution_id,
            bytes = written,
            "Downloaded execution logs"
        );

        Ok(CallToolResult::text(format!(
            "Successfully downloaded logs to {} ({} bytes)! You can unzip and analyze these logs.",
            zip_path.display(),
            written
        )))
    }
}
