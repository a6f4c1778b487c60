use crate::types::QueryParams;
use serde::{Deserialize, Serialize};

/// Tenancy context of a remote call.
///
/// The account is always required by the platform. Organization and project
/// may be empty for account-level endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scope {
    #[serde(rename = "accountIdentifier")]
    pub account_id: String,
    #[serde(rename = "orgIdentifier")]
    pub org_id: String,
    #[serde(rename = "projectIdentifier")]
    pub project_id: String,
}

impl Scope {
    pub fn new(
        account_id: impl Into<String>,
        org_id: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            org_id: org_id.into(),
            project_id: project_id.into(),
        }
    }

    /// Write all three identifiers into `params`, overwriting existing values.
    ///
    /// Empty identifiers are still written.
    pub fn apply(&self, params: &mut QueryParams) {
        params.insert("accountIdentifier".to_string(), self.account_id.clone());
        params.insert("orgIdentifier".to_string(), self.org_id.clone());
        params.insert("projectIdentifier".to_string(), self.project_id.clone());
    }

    /// Fresh parameter map holding only the scope.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.apply(&mut params);
        params
    }
}
