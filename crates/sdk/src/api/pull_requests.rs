//! Pull requests API endpoints.

use crate::client::HarnessClient;
use crate::error::{HarnessError, HarnessResult};
use harness_core::pullrequest::{CreatePullRequest, PullRequest, PullRequestOptions};
use harness_core::{QueryParams, Scope};

const REPOS_PATH: &str = "code/api/v1/repos";

/// Pull requests API for code repositories.
pub struct PullRequestsApi<'a> {
    client: &'a HarnessClient,
}

impl<'a> PullRequestsApi<'a> {
    pub(crate) fn new(client: &'a HarnessClient) -> Self {
        Self { client }
    }

    /// Get a pull request by number.
    pub async fn get(&self, scope: &Scope, repo_id: &str, number: i64) -> HarnessResult<PullRequest> {
        self.client
            .http
            .get(
                &format!("{}/{}/pullreq/{}", REPOS_PATH, repo_id, number),
                &scope.to_params(),
                &[],
            )
            .await
            .map_err(|e| HarnessError::context("failed to get pull request", e))
    }

    /// List pull requests. Pages are one-indexed.
    pub async fn list(
        &self,
        scope: &Scope,
        repo_id: &str,
        mut opts: PullRequestOptions,
    ) -> HarnessResult<Vec<PullRequest>> {
        self.client
            .config()
            .page_limits
            .normalize_one_indexed(&mut opts.pagination);

        let params = list_params(scope, opts);
        self.client
            .http
            .get(&format!("{}/{}/pullreq", REPOS_PATH, repo_id), &params, &[])
            .await
            .map_err(|e| HarnessError::context("failed to list pull requests", e))
    }

    /// Open a pull request. Never retried.
    pub async fn create(
        &self,
        scope: &Scope,
        repo_id: &str,
        body: &CreatePullRequest,
    ) -> HarnessResult<PullRequest> {
        self.client
            .http
            .post(
                &format!("{}/{}/pullreq", REPOS_PATH, repo_id),
                &scope.to_params(),
                body,
                None,
            )
            .await
            .map_err(|e| HarnessError::context("failed to create pull request", e))
    }
}

fn list_params(scope: &Scope, opts: PullRequestOptions) -> QueryParams {
    let mut params = scope.to_params();
    params.insert("page".to_string(), opts.pagination.page.to_string());
    params.insert("limit".to_string(), opts.pagination.limit.to_string());

    if !opts.state.is_empty() {
        params.insert("state".to_string(), opts.state.join(","));
    }
    if !opts.created_by.is_empty() {
        let ids: Vec<String> = opts.created_by.iter().map(i64::to_string).collect();
        params.insert("created_by".to_string(), ids.join(","));
    }

    let strings = [
        ("source_repo_ref", opts.source_repo_ref),
        ("source_branch", opts.source_branch),
        ("target_branch", opts.target_branch),
        ("query", opts.query),
        ("order", opts.order),
        ("sort", opts.sort),
    ];
    for (key, value) in strings {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            params.insert(key.to_string(), value);
        }
    }

    let numbers = [
        ("created_lt", opts.created_lt),
        ("created_gt", opts.created_gt),
        ("updated_lt", opts.updated_lt),
        ("updated_gt", opts.updated_gt),
        ("author_id", opts.author_id),
    ];
    for (key, value) in numbers {
        if let Some(value) = value.filter(|v| *v > 0) {
            params.insert(key.to_string(), value.to_string());
        }
    }

    if opts.include_checks {
        params.insert("include_checks".to_string(), "true".to_string());
    }
    params
}
