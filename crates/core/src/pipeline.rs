// Pipeline and pipeline execution records

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineData {
    pub yaml_pipeline: String,
    pub resolved_templates_pipeline_yaml: String,
    pub git_details: GitDetails,
    pub entity_validity_details: EntityValidityDetails,
    pub modules: Vec<String>,
    pub store_type: String,
    pub connector_ref: String,
    pub allow_dynamic_executions: bool,
    #[serde(rename = "isInlineHCEntity")]
    pub is_inline_hc_entity: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GitDetails {
    pub valid: bool,
    pub invalid_yaml: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityValidityDetails {
    pub valid: bool,
    pub invalid_yaml: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineListItem {
    pub name: String,
    pub identifier: String,
    pub description: String,
    pub tags: HashMap<String, String>,
    pub version: i64,
    pub num_of_stages: i64,
    pub created_at: i64,
    pub last_updated_at: i64,
    pub modules: Vec<String>,
    pub execution_summary_info: ExecutionSummaryInfo,
    pub filters: HashMap<String, serde_json::Value>,
    pub stage_names: Vec<String>,
    pub store_type: String,
    pub connector_ref: String,
    pub is_draft: bool,
    pub yaml_version: String,
    #[serde(rename = "isInlineHCEntity")]
    pub is_inline_hc_entity: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionSummaryInfo {
    pub num_of_errors: Vec<i64>,
    pub deployments: Vec<i64>,
    pub last_execution_ts: i64,
    pub last_execution_status: String,
    pub last_execution_id: String,
}

/// Filters for pipeline listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineListOptions {
    pub pagination: crate::pagination::PaginationOptions,
    pub search_term: Option<String>,
}

/// Filters for execution listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineExecutionOptions {
    pub pagination: crate::pagination::PaginationOptions,
    pub status: Option<String>,
    pub my_deployments: bool,
    pub branch: Option<String>,
    pub search_term: Option<String>,
    pub pipeline_identifier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineExecution {
    pub pipeline_identifier: String,
    pub project_identifier: String,
    pub org_identifier: String,
    pub plan_execution_id: String,
    pub name: String,
    pub status: String,
    pub failure_info: ExecutionFailureInfo,
    pub start_ts: i64,
    pub end_ts: i64,
    pub created_at: i64,
    pub connector_ref: String,
    pub successful_stages_count: i64,
    pub failed_stages_count: i64,
    pub running_stages_count: i64,
    pub total_stages_running_count: i64,
    pub stages_executed: Vec<String>,
    pub aborted_by: User,
    pub queued_type: String,
    pub run_sequence: i32,
    pub should_use_simplified_base_key: bool,
}

/// Wrapper returned by the v2 execution endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineExecutionResponse {
    pub pipeline_execution_summary: PipelineExecution,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExecutionFailureInfo {
    pub failure_type_list: Vec<String>,
    pub response_messages: Vec<ExecutionResponseMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionResponseMessage {
    pub code: String,
    pub message: String,
    pub level: String,
    pub exception: ExecutionException,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionException {
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub user_name: String,
    pub created_at: i64,
}
