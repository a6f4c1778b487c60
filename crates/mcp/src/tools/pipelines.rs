// Pipeline and execution tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{ParamSpecError, ScopeArgs, Tool, ToolContext, ToolDefinition, ToolParams};
use anyhow::Result;
use harness_core::pagination::PaginationOptions;
use harness_core::pipeline::{PipelineExecutionOptions, PipelineListOptions};
use serde::Deserialize;

/// Get details of a pipeline
pub struct GetPipelineTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct GetPipelineArgs {
    pipeline_id: String,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl GetPipelineTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "get_pipeline",
            "Get details of a specific pipeline in a Harness repository.",
            ToolParams::new()
                .required_string("pipeline_id", "The ID of the pipeline")
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for GetPipelineTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetPipelineArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let pipeline = self
            .ctx
            .client
            .pipelines()
            .get(&scope, &args.pipeline_id)
            .await?;
        Ok(CallToolResult::json(&pipeline.data)?)
    }
}

/// List pipelines
pub struct ListPipelinesTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct ListPipelinesArgs {
    #[serde(default)]
    search_term: Option<String>,
    page: u32,
    size: u32,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl ListPipelinesTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "list_pipelines",
            "List pipelines in a Harness repository.",
            ToolParams::new()
                .string("search_term", "Optional search term to filter pipelines")
                .pagination()
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for ListPipelinesTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListPipelinesArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let opts = PipelineListOptions {
            pagination: PaginationOptions::new(args.page, args.size),
            search_term: args.search_term,
        };
        let list = self.ctx.client.pipelines().list(&scope, opts).await?;
        Ok(CallToolResult::json(&list.data)?)
    }
}

/// Fetch the UI link of an execution
pub struct FetchExecutionUrlTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct FetchExecutionUrlArgs {
    pipeline_id: String,
    plan_execution_id: String,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl FetchExecutionUrlTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "fetch_execution_url",
            "Fetch the execution URL for a pipeline execution in Harness.",
            ToolParams::new()
                .required_string("pipeline_id", "The ID of the pipeline")
                .required_string("plan_execution_id", "The ID of the plan execution")
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for FetchExecutionUrlTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: FetchExecutionUrlArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let url = self
            .ctx
            .client
            .pipelines()
            .fetch_execution_url(&scope, &args.pipeline_id, &args.plan_execution_id)
            .await?;
        Ok(CallToolResult::text(url))
    }
}

/// Get one execution
pub struct GetExecutionTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct GetExecutionArgs {
    plan_execution_id: String,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl GetExecutionTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "get_execution",
            "Get details of a specific pipeline execution in Harness.",
            ToolParams::new()
                .required_string("plan_execution_id", "The ID of the plan execution")
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for GetExecutionTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetExecutionArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let execution = self
            .ctx
            .client
            .pipelines()
            .get_execution(&scope, &args.plan_execution_id)
            .await?;
        Ok(CallToolResult::json(&execution.data)?)
    }
}

/// List executions
pub struct ListExecutionsTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct ListExecutionsArgs {
    #[serde(default)]
    search_term: Option<String>,
    #[serde(default)]
    pipeline_identifier: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    branch: Option<String>,
    #[serde(default)]
    my_deployments: bool,
    page: u32,
    size: u32,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl ListExecutionsTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "list_executions",
            "List pipeline executions in a Harness repository.",
            ToolParams::new()
                .string("search_term", "Optional search term to filter executions")
                .string(
                    "pipeline_identifier",
                    "Optional pipeline identifier to filter executions",
                )
                .string(
                    "status",
                    "Optional status to filter executions (e.g., Running, Success, Failed)",
                )
                .string("branch", "Optional branch to filter executions")
                .boolean("my_deployments", "Optional flag to show only my deployments")
                .pagination()
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for ListExecutionsTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListExecutionsArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let opts = PipelineExecutionOptions {
            pagination: PaginationOptions::new(args.page, args.size),
            status: args.status,
            my_deployments: args.my_deployments,
            branch: args.branch,
            search_term: args.search_term,
            pipeline_identifier: args.pipeline_identifier,
        };
        let list = self
            .ctx
            .client
            .pipelines()
            .list_executions(&scope, opts)
            .await?;
        Ok(CallToolResult::json(&list.data)?)
    }
}
