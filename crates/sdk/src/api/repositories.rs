//! Repositories API endpoints.

use crate::client::HarnessClient;
use crate::error::{HarnessError, HarnessResult};
use harness_core::repository::{
    Commit, CommitList, CommitOptions, CreateRepository, Repository, RepositoryOptions,
};
use harness_core::{QueryParams, Scope};

const REPOS_PATH: &str = "code/api/v1/repos";

/// Repositories API.
pub struct RepositoriesApi<'a> {
    client: &'a HarnessClient,
}

impl<'a> RepositoriesApi<'a> {
    pub(crate) fn new(client: &'a HarnessClient) -> Self {
        Self { client }
    }

    /// Get a repository by identifier.
    pub async fn get(&self, scope: &Scope, repo_id: &str) -> HarnessResult<Repository> {
        self.client
            .http
            .get(&format!("{}/{}", REPOS_PATH, repo_id), &scope.to_params(), &[])
            .await
            .map_err(|e| HarnessError::context("failed to get repository", e))
    }

    /// List repositories. Pages are one-indexed.
    pub async fn list(
        &self,
        scope: &Scope,
        mut opts: RepositoryOptions,
    ) -> HarnessResult<Vec<Repository>> {
        self.client
            .config()
            .page_limits
            .normalize_one_indexed(&mut opts.pagination);

        let mut params = scope.to_params();
        params.insert("page".to_string(), opts.pagination.page.to_string());
        params.insert("limit".to_string(), opts.pagination.limit.to_string());
        for (key, value) in [("query", opts.query), ("sort", opts.sort), ("order", opts.order)] {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                params.insert(key.to_string(), value);
            }
        }

        self.client
            .http
            .get(REPOS_PATH, &params, &[])
            .await
            .map_err(|e| HarnessError::context("failed to list repositories", e))
    }

    /// Create a repository. Never retried.
    pub async fn create(&self, scope: &Scope, body: &CreateRepository) -> HarnessResult<Repository> {
        self.client
            .http
            .post(REPOS_PATH, &scope.to_params(), body, None)
            .await
            .map_err(|e| HarnessError::context("failed to create repository", e))
    }

    /// List commits of a repository. Pages are one-indexed.
    pub async fn list_commits(
        &self,
        scope: &Scope,
        repo_id: &str,
        mut opts: CommitOptions,
    ) -> HarnessResult<CommitList> {
        self.client
            .config()
            .page_limits
            .normalize_one_indexed(&mut opts.pagination);

        let params = commit_params(scope, opts);
        self.client
            .http
            .get(&format!("{}/{}/commits", REPOS_PATH, repo_id), &params, &[])
            .await
            .map_err(|e| HarnessError::context("failed to list commits", e))
    }

    /// Get a commit by SHA.
    pub async fn get_commit(&self, scope: &Scope, repo_id: &str, sha: &str) -> HarnessResult<Commit> {
        self.client
            .http
            .get(
                &format!("{}/{}/commits/{}", REPOS_PATH, repo_id, sha),
                &scope.to_params(),
                &[],
            )
            .await
            .map_err(|e| HarnessError::context("failed to get commit", e))
    }
}

fn commit_params(scope: &Scope, opts: CommitOptions) -> QueryParams {
    let mut params = scope.to_params();
    params.insert("page".to_string(), opts.pagination.page.to_string());
    params.insert("limit".to_string(), opts.pagination.limit.to_string());

    let strings = [
        ("git_ref", opts.git_ref),
        ("after", opts.after),
        ("path", opts.path),
        ("committer", opts.committer),
    ];
    for (key, value) in strings {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            params.insert(key.to_string(), value);
        }
    }
    for (key, value) in [("since", opts.since), ("until", opts.until)] {
        if let Some(value) = value.filter(|v| *v > 0) {
            params.insert(key.to_string(), value.to_string());
        }
    }
    if opts.include_stats {
        params.insert("include_stats".to_string(), "true".to_string());
    }
    params
}
