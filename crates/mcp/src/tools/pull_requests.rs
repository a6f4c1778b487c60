// Pull request tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{ParamSpecError, ScopeArgs, Tool, ToolContext, ToolDefinition, ToolParams};
use anyhow::Result;
use harness_core::pagination::PageLimitOptions;
use harness_core::pullrequest::{CreatePullRequest, PullRequestOptions};
use serde::Deserialize;

const REPO_IDENTIFIER: &str = "The identifier of the repository";

/// Get a pull request by number
pub struct GetPullRequestTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct GetPullRequestArgs {
    repo_identifier: String,
    pullreq_number: i64,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl GetPullRequestTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "get_pull_request",
            "Get a specific pull request",
            ToolParams::new()
                .required_string("repo_identifier", REPO_IDENTIFIER)
                .required_number("pullreq_number", "The pull request number")
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for GetPullRequestTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetPullRequestArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let pr = self
            .ctx
            .client
            .pull_requests()
            .get(&scope, &args.repo_identifier, args.pullreq_number)
            .await?;
        Ok(CallToolResult::json(&pr)?)
    }
}

/// List pull requests of a repository
pub struct ListPullRequestsTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct ListPullRequestsArgs {
    repo_identifier: String,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    source_repo_ref: Option<String>,
    #[serde(default)]
    source_branch: Option<String>,
    #[serde(default)]
    target_branch: Option<String>,
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    created_by: Option<i64>,
    #[serde(default)]
    author_id: Option<i64>,
    #[serde(default)]
    order: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    include_checks: bool,
    page: i64,
    limit: i64,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl ListPullRequestsTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "list_pull_requests",
            "List pull requests for a repository",
            ToolParams::new()
                .required_string("repo_identifier", REPO_IDENTIFIER)
                .string(
                    "state",
                    "Comma separated states to filter by (open, closed, merged)",
                )
                .string("source_repo_ref", "Filter by source repository reference")
                .string("source_branch", "Filter by source branch")
                .string("target_branch", "Filter by target branch")
                .string("query", "Search query")
                .number("created_by", "Filter by creator user ID")
                .number("author_id", "Filter by author user ID")
                .string("order", "Order of results (asc, desc)")
                .string("sort", "Sort field (created, updated)")
                .boolean("include_checks", "Include the status check summary")
                .page_limit()
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for ListPullRequestsTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListPullRequestsArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let state = args
            .state
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let opts = PullRequestOptions {
            pagination: PageLimitOptions::new(args.page, args.limit),
            state,
            source_repo_ref: args.source_repo_ref,
            source_branch: args.source_branch,
            target_branch: args.target_branch,
            query: args.query,
            created_by: args.created_by.into_iter().collect(),
            order: args.order,
            sort: args.sort,
            author_id: args.author_id,
            include_checks: args.include_checks,
            ..Default::default()
        };
        let prs = self
            .ctx
            .client
            .pull_requests()
            .list(&scope, &args.repo_identifier, opts)
            .await?;
        Ok(CallToolResult::json(&prs)?)
    }
}

/// Open a pull request. Write tool.
pub struct CreatePullRequestTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct CreatePullRequestArgs {
    repo_identifier: String,
    title: String,
    source_branch: String,
    #[serde(default)]
    target_branch: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_draft: bool,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl CreatePullRequestTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "create_pull_request",
            "Create a new pull request",
            ToolParams::new()
                .required_string("repo_identifier", REPO_IDENTIFIER)
                .required_string("title", "Title of the pull request")
                .required_string("source_branch", "Source branch name")
                .string(
                    "target_branch",
                    "Target branch name, the repository default branch when omitted",
                )
                .string("description", "Description of the pull request")
                .boolean("is_draft", "Whether the pull request is a draft")
                .default_value(false)
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for CreatePullRequestTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreatePullRequestArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let body = CreatePullRequest {
            title: args.title,
            description: args.description.unwrap_or_default(),
            source_branch: args.source_branch,
            target_branch: args.target_branch.unwrap_or_default(),
            is_draft: args.is_draft,
        };
        let pr = self
            .ctx
            .client
            .pull_requests()
            .create(&scope, &args.repo_identifier, &body)
            .await?;
        Ok(CallToolResult::json(&pr)?)
    }
}
