// MCP (Model Context Protocol) server exposing Harness APIs as tools
// to agent clients over stdio

pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod toolsets;

pub use config::{ServerConfig, DEFAULT_TOOLSETS};
pub use server::McpServer;
pub use toolsets::{Toolset, ToolsetError, ToolsetGroup};

use anyhow::Result;
use harness_sdk::HarnessClient;
use std::sync::Arc;
use tools::connectors::ListConnectorsTool;
use tools::logs::DownloadExecutionLogsTool;
use tools::pipelines::{
    FetchExecutionUrlTool, GetExecutionTool, GetPipelineTool, ListExecutionsTool,
    ListPipelinesTool,
};
use tools::pull_requests::{CreatePullRequestTool, GetPullRequestTool, ListPullRequestsTool};
use tools::repositories::{
    CreateRepositoryTool, GetCommitTool, GetRepositoryTool, ListCommitsTool, ListRepositoriesTool,
};
use tools::{Tool, ToolContext, ToolRegistry};

/// Build every toolset and enable the configured ones.
pub fn init_toolsets(client: Arc<HarnessClient>, config: &ServerConfig) -> Result<ToolsetGroup> {
    let ctx = ToolContext::new(client, config.scope_defaults());
    let mut group = ToolsetGroup::new(config.read_only);

    group.add_toolset(
        Toolset::new("pipelines", "Harness Pipeline related tools").add_read_tools([
            tool(ListPipelinesTool::new(ctx.clone())?),
            tool(GetPipelineTool::new(ctx.clone())?),
            tool(FetchExecutionUrlTool::new(ctx.clone())?),
            tool(GetExecutionTool::new(ctx.clone())?),
            tool(ListExecutionsTool::new(ctx.clone())?),
        ]),
    );

    group.add_toolset(
        Toolset::new("pullrequests", "Harness Pull Request related tools")
            .add_read_tools([
                tool(GetPullRequestTool::new(ctx.clone())?),
                tool(ListPullRequestsTool::new(ctx.clone())?),
            ])
            .add_write_tools([tool(CreatePullRequestTool::new(ctx.clone())?)]),
    );

    group.add_toolset(
        Toolset::new("repositories", "Harness Repository related tools")
            .add_read_tools([
                tool(GetRepositoryTool::new(ctx.clone())?),
                tool(ListRepositoriesTool::new(ctx.clone())?),
                tool(ListCommitsTool::new(ctx.clone())?),
                tool(GetCommitTool::new(ctx.clone())?),
            ])
            .add_write_tools([tool(CreateRepositoryTool::new(ctx.clone())?)]),
    );

    group.add_toolset(
        Toolset::new("logs", "Harness Logs related tools")
            .add_read_tools([tool(DownloadExecutionLogsTool::new(ctx.clone())?)]),
    );

    group.add_toolset(
        Toolset::new("connectors", "Harness Connector related tools")
            .add_read_tools([tool(ListConnectorsTool::new(ctx)?)]),
    );

    group.enable_toolsets(config.toolsets.as_slice())?;
    Ok(group)
}

/// Tools of every enabled toolset, ready for the server.
pub fn build_registry(group: &ToolsetGroup) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    group.register_tools(&mut registry);
    registry
}

fn tool(t: impl Tool + 'static) -> Arc<dyn Tool> {
    Arc::new(t)
}
