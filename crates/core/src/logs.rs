use crate::pipeline::PipelineExecution;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Presigned archive link returned by the log service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogDownloadResponse {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

/// Log-service key prefix for an execution.
///
/// Newer executions use the simplified key layout; older ones are keyed by the
/// full scope path down to the pipeline level.
pub fn log_key_prefix(account_id: &str, execution: &PipelineExecution) -> String {
    if execution.should_use_simplified_base_key {
        format!(
            "{}/pipeline/{}/{}/-{}",
            account_id,
            execution.pipeline_identifier,
            execution.run_sequence,
            execution.plan_execution_id
        )
    } else {
        format!(
            "accountId:{}/orgId:{}/projectId:{}/pipelineId:{}/runSequence:{}/level0:pipeline",
            account_id,
            execution.org_identifier,
            execution.project_identifier,
            execution.pipeline_identifier,
            execution.run_sequence
        )
    }
}
