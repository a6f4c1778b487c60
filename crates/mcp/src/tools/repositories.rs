// Repository tools

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{ParamSpecError, ScopeArgs, Tool, ToolContext, ToolDefinition, ToolParams};
use anyhow::Result;
use harness_core::pagination::PageLimitOptions;
use harness_core::repository::{CommitOptions, CreateRepository, RepositoryOptions};
use serde::Deserialize;

/// Get a repository
pub struct GetRepositoryTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct GetRepositoryArgs {
    repo_identifier: String,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl GetRepositoryTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "get_repository",
            "Get repository information by identifier",
            ToolParams::new()
                .required_string(
                    "repo_identifier",
                    "The identifier of the repository to retrieve",
                )
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for GetRepositoryTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetRepositoryArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let repo = self
            .ctx
            .client
            .repositories()
            .get(&scope, &args.repo_identifier)
            .await?;
        Ok(CallToolResult::json(&repo)?)
    }
}

/// List repositories
pub struct ListRepositoriesTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct ListRepositoriesArgs {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    order: Option<String>,
    page: i64,
    limit: i64,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl ListRepositoriesTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "list_repositories",
            "List repositories in a Harness project",
            ToolParams::new()
                .string("query", "Optional search term to filter repositories")
                .string("sort", "Sort field (identifier, created, updated)")
                .string("order", "Order of results (asc, desc)")
                .page_limit()
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for ListRepositoriesTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListRepositoriesArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let opts = RepositoryOptions {
            pagination: PageLimitOptions::new(args.page, args.limit),
            query: args.query,
            sort: args.sort,
            order: args.order,
        };
        let repos = self.ctx.client.repositories().list(&scope, opts).await?;
        Ok(CallToolResult::json(&repos)?)
    }
}

/// Create a repository
pub struct CreateRepositoryTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct CreateRepositoryArgs {
    identifier: String,
    is_public: bool,
    readme: bool,
    #[serde(default)]
    default_branch: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    fork_id: Option<i64>,
    #[serde(default)]
    git_ignore: Option<String>,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    parent_ref: Option<String>,
    #[serde(default)]
    uid: Option<String>,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl CreateRepositoryTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "create_repository",
            "Create a new repository in Harness",
            ToolParams::new()
                .required_string("identifier", "Unique identifier for the repository")
                .required_boolean("is_public", "Whether the repository is public")
                .required_boolean("readme", "Whether to initialize with a README")
                .string("default_branch", "Default branch name")
                .string("description", "Repository description")
                .number("fork_id", "ID of the repository to fork from")
                .string("git_ignore", "Git ignore template")
                .string("license", "License template")
                .string("parent_ref", "Parent reference for the repository")
                .string("uid", "Unique ID for the repository")
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for CreateRepositoryTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: CreateRepositoryArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let body = CreateRepository {
            identifier: args.identifier,
            is_public: args.is_public,
            readme: args.readme,
            default_branch: args.default_branch.unwrap_or_default(),
            description: args.description.unwrap_or_default(),
            fork_id: args.fork_id.unwrap_or_default(),
            git_ignore: args.git_ignore.unwrap_or_default(),
            license: args.license.unwrap_or_default(),
            parent_ref: args.parent_ref.unwrap_or_default(),
            uid: args.uid.unwrap_or_default(),
        };
        let repo = self.ctx.client.repositories().create(&scope, &body).await?;
        Ok(CallToolResult::json(&repo)?)
    }
}

/// List commits of a repository
pub struct ListCommitsTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct ListCommitsArgs {
    repo_identifier: String,
    #[serde(default)]
    git_ref: Option<String>,
    #[serde(default)]
    after: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    committer: Option<String>,
    #[serde(default)]
    since: Option<i64>,
    #[serde(default)]
    until: Option<i64>,
    #[serde(default)]
    include_stats: bool,
    page: i64,
    limit: i64,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl ListCommitsTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "list_commits",
            "List commits for a repository",
            ToolParams::new()
                .required_string("repo_identifier", "The identifier of the repository")
                .string("git_ref", "Git reference (branch, tag, etc.)")
                .string("after", "Commit SHA to start listing from")
                .string("path", "Filter commits by file path")
                .number("since", "Timestamp to filter commits created after")
                .number("until", "Timestamp to filter commits created before")
                .string("committer", "Filter by committer")
                .boolean("include_stats", "Whether to include commit stats")
                .page_limit()
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for ListCommitsTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ListCommitsArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let opts = CommitOptions {
            pagination: PageLimitOptions::new(args.page, args.limit),
            git_ref: args.git_ref,
            after: args.after,
            path: args.path,
            committer: args.committer,
            since: args.since,
            until: args.until,
            include_stats: args.include_stats,
        };
        let commits = self
            .ctx
            .client
            .repositories()
            .list_commits(&scope, &args.repo_identifier, opts)
            .await?;
        Ok(CallToolResult::json(&commits)?)
    }
}

/// Get a commit
pub struct GetCommitTool {
    ctx: ToolContext,
    def: ToolDefinition,
}

#[derive(Debug, Deserialize)]
struct GetCommitArgs {
    repo_identifier: String,
    commit_sha: String,
    #[serde(flatten)]
    scope: ScopeArgs,
}

impl GetCommitTool {
    pub fn new(ctx: ToolContext) -> Result<Self, ParamSpecError> {
        let def = ToolDefinition::new(
            "get_commit",
            "Get a specific commit",
            ToolParams::new()
                .required_string("repo_identifier", "The identifier of the repository")
                .required_string("commit_sha", "The commit SHA")
                .scope(&ctx.scope, true),
        )?;
        Ok(Self { ctx, def })
    }
}

#[async_trait::async_trait]
impl Tool for GetCommitTool {
    fn schema(&self) -> ToolSchema {
        self.def.schema()
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: GetCommitArgs = self.def.decode(arguments)?;
        let scope = self.ctx.scope.resolve(&args.scope, true)?;

        let commit = self
            .ctx
            .client
            .repositories()
            .get_commit(&scope, &args.repo_identifier, &args.commit_sha)
            .await?;
        Ok(CallToolResult::json(&commit)?)
    }
}
