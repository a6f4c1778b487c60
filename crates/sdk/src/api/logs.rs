//! Execution logs API endpoints.

use crate::client::HarnessClient;
use crate::error::{HarnessError, HarnessResult};
use harness_core::logs::{log_key_prefix, LogDownloadResponse};
use harness_core::{QueryParams, Scope};
use std::path::Path;

const LOG_DOWNLOAD_PATH: &str = "log-service/blob/download";

/// Logs API for pipeline execution logs.
pub struct LogsApi<'a> {
    client: &'a HarnessClient,
}

impl<'a> LogsApi<'a> {
    pub(crate) fn new(client: &'a HarnessClient) -> Self {
        Self { client }
    }

    /// Presigned link to the log archive of an execution.
    pub async fn download_url(&self, scope: &Scope, plan_execution_id: &str) -> HarnessResult<String> {
        let execution = self
            .client
            .pipelines()
            .get_execution(scope, plan_execution_id)
            .await?;

        let mut params = QueryParams::new();
        params.insert("accountID".to_string(), scope.account_id.clone());
        params.insert(
            "prefix".to_string(),
            log_key_prefix(&scope.account_id, &execution.data),
        );

        let response: LogDownloadResponse = self
            .client
            .http
            .post(
                LOG_DOWNLOAD_PATH,
                &params,
                &serde_json::Value::Null,
                Some(&self.client.config().retry_config),
            )
            .await
            .map_err(|e| HarnessError::context("failed to fetch log download URL", e))?;

        Ok(response.link)
    }

    /// Fetch the archive behind a presigned link into `dest`.
    ///
    /// The link is fetched without the API key.
    pub async fn download_archive(&self, link: &str, dest: &Path) -> HarnessResult<u64> {
        self.client
            .http
            .download_to_file(link, dest)
            .await
            .map_err(|e| HarnessError::context("failed to download logs", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_url_uses_execution_prefix() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pipeline/api/pipelines/execution/v2/exec-5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "SUCCESS",
                "data": {"pipelineExecutionSummary": {
                    "pipelineIdentifier": "build",
                    "planExecutionId": "exec-5",
                    "runSequence": 12,
                    "shouldUseSimplifiedBaseKey": true
                }}
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/log-service/blob/download"))
            .and(query_param("accountID", "acc"))
            .and(query_param("prefix", "acc/pipeline/build/12/-exec-5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "link": "https://storage.example/logs.zip",
                "status": "success",
                "expires": "2025-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HarnessClient::builder()
            .base_url(server.uri())
            .api_key("pat.test")
            .build()
            .unwrap();
        let link = client
            .logs()
            .download_url(&Scope::new("acc", "org", "proj"), "exec-5")
            .await
            .unwrap();
        assert_eq!(link, "https://storage.example/logs.zip");
    }
}
