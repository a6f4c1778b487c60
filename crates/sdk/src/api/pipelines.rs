//! Pipelines API endpoints.

use crate::client::HarnessClient;
use crate::error::{HarnessError, HarnessResult};
use harness_core::pipeline::{
    PipelineData, PipelineExecution, PipelineExecutionOptions, PipelineExecutionResponse,
    PipelineListItem, PipelineListOptions,
};
use harness_core::{Entity, ListOutput, Scope};
use serde_json::json;

const PIPELINE_PATH: &str = "pipeline/api/pipelines";
const PIPELINE_LIST_PATH: &str = "pipeline/api/pipelines/list";
const EXECUTION_URL_PATH: &str = "pipeline/api/pipelines/execution/url";
const EXECUTION_GET_PATH: &str = "pipeline/api/pipelines/execution/v2";
const EXECUTION_SUMMARY_PATH: &str = "pipeline/api/pipelines/execution/summary";

/// Pipelines API for pipelines and their executions.
pub struct PipelinesApi<'a> {
    client: &'a HarnessClient,
}

impl<'a> PipelinesApi<'a> {
    pub(crate) fn new(client: &'a HarnessClient) -> Self {
        Self { client }
    }

    /// Get a pipeline definition.
    pub async fn get(&self, scope: &Scope, pipeline_id: &str) -> HarnessResult<Entity<PipelineData>> {
        self.client
            .http
            .get(&format!("{}/{}", PIPELINE_PATH, pipeline_id), &scope.to_params(), &[])
            .await
            .map_err(|e| HarnessError::context("failed to get pipeline", e))
    }

    /// List pipelines. Pages are zero-indexed.
    pub async fn list(
        &self,
        scope: &Scope,
        mut opts: PipelineListOptions,
    ) -> HarnessResult<ListOutput<PipelineListItem>> {
        self.client.config().page_limits.normalize(&mut opts.pagination);

        let mut params = scope.to_params();
        params.insert("page".to_string(), opts.pagination.page.to_string());
        params.insert("size".to_string(), opts.pagination.size.to_string());
        if let Some(term) = opts.search_term.filter(|t| !t.is_empty()) {
            params.insert("searchTerm".to_string(), term);
        }

        self.client
            .http
            .post(
                PIPELINE_LIST_PATH,
                &params,
                &json!({ "filterType": "PipelineSetup" }),
                Some(&self.client.config().retry_config),
            )
            .await
            .map_err(|e| HarnessError::context("failed to list pipelines", e))
    }

    /// List pipeline executions. Pages are zero-indexed.
    pub async fn list_executions(
        &self,
        scope: &Scope,
        mut opts: PipelineExecutionOptions,
    ) -> HarnessResult<ListOutput<PipelineExecution>> {
        self.client.config().page_limits.normalize(&mut opts.pagination);

        let mut params = scope.to_params();
        params.insert("page".to_string(), opts.pagination.page.to_string());
        params.insert("size".to_string(), opts.pagination.size.to_string());

        let optional = [
            ("searchTerm", opts.search_term),
            ("pipelineIdentifier", opts.pipeline_identifier),
            ("status", opts.status),
            ("branch", opts.branch),
        ];
        for (key, value) in optional {
            if let Some(value) = value.filter(|v| !v.is_empty()) {
                params.insert(key.to_string(), value);
            }
        }

        if opts.my_deployments {
            params.insert("myDeployments".to_string(), "true".to_string());
        } else {
            params.insert("showAllExecutions".to_string(), "false".to_string());
        }

        self.client
            .http
            .post(
                EXECUTION_SUMMARY_PATH,
                &params,
                &json!({ "filterType": "PipelineExecution" }),
                Some(&self.client.config().retry_config),
            )
            .await
            .map_err(|e| HarnessError::context("failed to list pipeline executions", e))
    }

    /// Get the summary of one execution.
    pub async fn get_execution(
        &self,
        scope: &Scope,
        plan_execution_id: &str,
    ) -> HarnessResult<Entity<PipelineExecution>> {
        let response: Entity<PipelineExecutionResponse> = self
            .client
            .http
            .get(
                &format!("{}/{}", EXECUTION_GET_PATH, plan_execution_id),
                &scope.to_params(),
                &[],
            )
            .await
            .map_err(|e| HarnessError::context("failed to get execution details", e))?;

        Ok(Entity {
            status: response.status,
            data: response.data.pipeline_execution_summary,
        })
    }

    /// Get the UI link of an execution.
    pub async fn fetch_execution_url(
        &self,
        scope: &Scope,
        pipeline_id: &str,
        plan_execution_id: &str,
    ) -> HarnessResult<String> {
        let mut params = scope.to_params();
        params.insert("pipelineIdentifier".to_string(), pipeline_id.to_string());
        params.insert("planExecutionId".to_string(), plan_execution_id.to_string());

        let response: Entity<String> = self
            .client
            .http
            .post(
                EXECUTION_URL_PATH,
                &params,
                &serde_json::Value::Null,
                Some(&self.client.config().retry_config),
            )
            .await
            .map_err(|e| HarnessError::context("failed to fetch execution URL", e))?;

        Ok(response.data)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::RetryConfig;
    use crate::HarnessClient;
    use harness_core::pagination::PaginationOptions;
    use harness_core::pipeline::{PipelineExecutionOptions, PipelineListOptions};
    use harness_core::Scope;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> HarnessClient {
        HarnessClient::builder()
            .base_url(server.uri())
            .api_key("pat.test")
            .retry_config(RetryConfig {
                initial_backoff: Duration::from_millis(1),
                ..Default::default()
            })
            .build()
            .unwrap()
    }

    fn scope() -> Scope {
        Scope::new("acc", "org", "proj")
    }

    #[tokio::test]
    async fn test_list_applies_default_page_size() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pipeline/api/pipelines/list"))
            .and(query_param("accountIdentifier", "acc"))
            .and(query_param("page", "0"))
            .and(query_param("size", "5"))
            .and(query_param("searchTerm", "deploy"))
            .and(body_json(serde_json::json!({"filterType": "PipelineSetup"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "SUCCESS",
                "data": {"content": [{"identifier": "deploy_prod", "name": "Deploy Prod"}], "totalElements": 1}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let opts = PipelineListOptions {
            pagination: PaginationOptions::new(0, 0),
            search_term: Some("deploy".to_string()),
        };
        let list = client(&server).pipelines().list(&scope(), opts).await.unwrap();
        assert_eq!(list.data.content[0].identifier, "deploy_prod");
    }

    #[tokio::test]
    async fn test_list_retries_server_errors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pipeline/api/pipelines/list"))
            .respond_with(ResponseTemplate::new(502))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/pipeline/api/pipelines/list"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"status": "SUCCESS", "data": {"content": []}})),
            )
            .with_priority(2)
            .mount(&server)
            .await;

        let list = client(&server)
            .pipelines()
            .list(&scope(), PipelineListOptions::default())
            .await
            .unwrap();
        assert!(list.data.content.is_empty());
    }

    #[tokio::test]
    async fn test_list_executions_query_shape() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pipeline/api/pipelines/execution/summary"))
            .and(query_param("size", "20"))
            .and(query_param("page", "2"))
            .and(query_param("status", "Failed"))
            .and(query_param("showAllExecutions", "false"))
            .and(body_json(serde_json::json!({"filterType": "PipelineExecution"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "SUCCESS",
                "data": {"content": [{"planExecutionId": "e1", "status": "Failed"}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let opts = PipelineExecutionOptions {
            pagination: PaginationOptions::new(2, 100),
            status: Some("Failed".to_string()),
            ..Default::default()
        };
        let list = client(&server)
            .pipelines()
            .list_executions(&scope(), opts)
            .await
            .unwrap();
        assert_eq!(list.data.content[0].plan_execution_id, "e1");
    }

    #[tokio::test]
    async fn test_get_execution_unwraps_summary() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pipeline/api/pipelines/execution/v2/exec-9"))
            .and(query_param("projectIdentifier", "proj"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "SUCCESS",
                "data": {"pipelineExecutionSummary": {"planExecutionId": "exec-9", "runSequence": 3}}
            })))
            .mount(&server)
            .await;

        let execution = client(&server)
            .pipelines()
            .get_execution(&scope(), "exec-9")
            .await
            .unwrap();
        assert_eq!(execution.status, "SUCCESS");
        assert_eq!(execution.data.run_sequence, 3);
    }

    #[tokio::test]
    async fn test_fetch_execution_url() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pipeline/api/pipelines/execution/url"))
            .and(query_param("pipelineIdentifier", "build"))
            .and(query_param("planExecutionId", "exec-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "SUCCESS",
                "data": "https://app.harness.io/ng/account/acc/executions/exec-1"
            })))
            .mount(&server)
            .await;

        let url = client(&server)
            .pipelines()
            .fetch_execution_url(&scope(), "build", "exec-1")
            .await
            .unwrap();
        assert!(url.ends_with("/executions/exec-1"));
    }

    #[tokio::test]
    async fn test_get_wraps_errors_with_operation() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/pipeline/api/pipelines/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_string(""))
            .mount(&server)
            .await;

        let err = client(&server)
            .pipelines()
            .get(&scope(), "missing")
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to get pipeline: not found"));
    }
}
