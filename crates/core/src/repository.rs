use crate::pagination::PageLimitOptions;
use serde::{Deserialize, Serialize};

/// A code repository hosted on the platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub archived: bool,
    pub created: i64,
    pub created_by: i64,
    pub default_branch: String,
    pub deleted: i64,
    pub description: String,
    pub fork_id: i64,
    pub git_ssh_url: String,
    pub git_url: String,
    pub id: i64,
    pub identifier: String,
    pub importing: bool,
    pub is_empty: bool,
    pub is_public: bool,
    pub last_git_push: i64,
    pub num_closed_pulls: i64,
    pub num_forks: i64,
    pub num_merged_pulls: i64,
    pub num_open_pulls: i64,
    pub num_pulls: i64,
    pub parent_id: i64,
    pub path: String,
    pub size: i64,
    pub size_updated: i64,
    pub state: i64,
    pub updated: i64,
}

/// Body of a repository creation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateRepository {
    pub identifier: String,
    pub is_public: bool,
    pub readme: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "is_zero")]
    pub fork_id: i64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub git_ignore: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub license: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_ref: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Author or committer of a commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub identity: Identity,
    pub when: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Commit {
    pub sha: String,
    pub parent_shas: Vec<String>,
    pub title: String,
    pub message: String,
    pub author: Signature,
    pub committer: Signature,
    /// Only returned when stats were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<serde_json::Value>,
}

/// One page of a repository's history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitList {
    pub commits: Vec<Commit>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rename_details: Vec<serde_json::Value>,
    pub total_commits: i64,
}

/// Filters for commit listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitOptions {
    pub pagination: PageLimitOptions,
    pub git_ref: Option<String>,
    pub after: Option<String>,
    pub path: Option<String>,
    pub committer: Option<String>,
    /// Unix timestamps in milliseconds.
    pub since: Option<i64>,
    pub until: Option<i64>,
    pub include_stats: bool,
}

/// Filters for repository listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryOptions {
    pub pagination: PageLimitOptions,
    pub query: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_repository_omits_empty_fields() {
        let body = CreateRepository {
            identifier: "web".to_string(),
            readme: true,
            ..Default::default()
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"identifier": "web", "is_public": false, "readme": true})
        );
    }

    #[test]
    fn test_commit_list_deserialization() {
        let json = r#"{
            "commits": [{
                "sha": "a1b2c3",
                "parent_shas": ["000111"],
                "title": "Fix flaky test",
                "author": {"identity": {"name": "Dev", "email": "dev@example.com"}, "when": "2025-04-01T10:00:00Z"}
            }],
            "total_commits": 42
        }"#;
        let list: CommitList = serde_json::from_str(json).unwrap();
        assert_eq!(list.total_commits, 42);
        assert_eq!(list.commits[0].author.identity.email, "dev@example.com");
        assert!(list.commits[0].stats.is_none());
    }
}
