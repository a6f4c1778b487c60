// Scope resolution from configured identifiers and tool arguments

use anyhow::{bail, Result};
use harness_core::Scope;
use serde::Deserialize;

/// Identifiers configured at startup. Empty means "ask the caller".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeDefaults {
    pub account_id: String,
    pub org_id: String,
    pub project_id: String,
}

/// The `org_id`/`project_id` arguments a tool may receive.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScopeArgs {
    #[serde(default)]
    pub org_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ScopeDefaults {
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

    /// Configured values win; arguments only fill what is not configured.
    pub fn resolve(&self, args: &ScopeArgs, required: bool) -> Result<Scope> {
        if self.account_id.is_empty() {
            bail!("account ID is required");
        }

        let org_id = pick(&self.org_id, args.org_id.as_deref());
        let project_id = pick(&self.project_id, args.project_id.as_deref());

        if required && (org_id.is_empty() || project_id.is_empty()) {
            bail!("org ID and project ID are required");
        }

        Ok(Scope::new(self.account_id.clone(), org_id, project_id))
    }
}

fn pick(configured: &str, requested: Option<&str>) -> String {
    if configured.is_empty() {
        requested.unwrap_or_default().to_string()
    } else {
        configured.to_string()
    }
}
