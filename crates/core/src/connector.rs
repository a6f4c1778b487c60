// Connector listing

use crate::pagination::PaginationOptions;
use serde::{Deserialize, Serialize};

/// Body of a `listV2` connector query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConnectorRequest {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connector_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connector_identifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    pub filter_type: String,
}

impl Default for ListConnectorRequest {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            connector_names: Vec::new(),
            connector_identifiers: Vec::new(),
            types: Vec::new(),
            filter_type: "Connector".to_string(),
        }
    }
}

/// Filters for connector listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectorListOptions {
    pub pagination: PaginationOptions,
    pub filter: ListConnectorRequest,
}

/// One entry of the connector listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectorSummary {
    pub connector: ConnectorInfo,
    pub created_at: i64,
    pub last_modified_at: i64,
    pub status: serde_json::Value,
    pub activity_details: serde_json::Value,
    pub harness_managed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectorInfo {
    pub name: String,
    pub identifier: String,
    pub description: String,
    pub org_identifier: String,
    pub project_identifier: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub spec: serde_json::Value,
}
