// Pull request records for the code-hosting module

use crate::pagination::PageLimitOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequest {
    pub author: PullRequestAuthor,
    pub check_summary: PullRequestCheckSummary,
    pub closed: i64,
    pub created: i64,
    pub description: String,
    pub edited: i64,
    pub is_draft: bool,
    pub labels: Vec<PullRequestLabel>,
    pub merge_base_sha: String,
    pub merge_check_status: String,
    pub merge_conflicts: Vec<String>,
    pub merge_method: String,
    pub merge_target_sha: String,
    pub merged: i64,
    pub merger: PullRequestAuthor,
    pub number: i64,
    pub rebase_check_status: String,
    pub rebase_conflicts: Vec<String>,
    pub rules: Vec<PullRequestRule>,
    pub source_branch: String,
    pub source_repo_id: i64,
    pub source_sha: String,
    pub state: String,
    pub stats: PullRequestStats,
    pub target_branch: String,
    pub target_repo_id: i64,
    pub title: String,
    pub updated: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestAuthor {
    pub created: i64,
    pub display_name: String,
    pub email: String,
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub uid: String,
    pub updated: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestCheckSummary {
    pub error: i64,
    pub failure: i64,
    pub pending: i64,
    pub running: i64,
    pub success: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestLabel {
    pub color: String,
    pub id: i64,
    pub key: String,
    pub scope: i64,
    pub value: String,
    pub value_color: String,
    pub value_count: i64,
    pub value_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestRule {
    pub identifier: String,
    pub repo_path: String,
    pub space_path: String,
    pub state: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PullRequestStats {
    pub additions: i64,
    pub commits: i64,
    pub conversations: i64,
    pub deletions: i64,
    pub files_changed: i64,
    pub unresolved_count: i64,
}

/// Request body for opening a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePullRequest {
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub source_branch: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_branch: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_draft: bool,
}

/// Filters for pull request listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestOptions {
    pub pagination: PageLimitOptions,
    pub state: Vec<String>,
    pub source_repo_ref: Option<String>,
    pub source_branch: Option<String>,
    pub target_branch: Option<String>,
    pub query: Option<String>,
    pub created_by: Vec<i64>,
    pub order: Option<String>,
    pub sort: Option<String>,
    pub created_lt: Option<i64>,
    pub created_gt: Option<i64>,
    pub updated_lt: Option<i64>,
    pub updated_gt: Option<i64>,
    pub author_id: Option<i64>,
    pub include_checks: bool,
}
