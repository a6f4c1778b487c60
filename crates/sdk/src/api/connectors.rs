//! Connectors API endpoints.

use crate::client::HarnessClient;
use crate::error::{HarnessError, HarnessResult};
use harness_core::connector::{ConnectorListOptions, ConnectorSummary};
use harness_core::{ListOutput, Scope};

const CONNECTORS_LIST_PATH: &str = "ng/api/connectors/listV2";

/// Connectors API.
pub struct ConnectorsApi<'a> {
    client: &'a HarnessClient,
}

impl<'a> ConnectorsApi<'a> {
    pub(crate) fn new(client: &'a HarnessClient) -> Self {
        Self { client }
    }

    /// List connectors matching the filter. Pages are zero-indexed.
    pub async fn list(
        &self,
        scope: &Scope,
        mut opts: ConnectorListOptions,
    ) -> HarnessResult<ListOutput<ConnectorSummary>> {
        self.client.config().page_limits.normalize(&mut opts.pagination);

        let mut params = scope.to_params();
        params.insert("pageIndex".to_string(), opts.pagination.page.to_string());
        params.insert("pageSize".to_string(), opts.pagination.size.to_string());
        params.insert("getDefaultFromOtherRepo".to_string(), "true".to_string());
        params.insert("getDistinctFromBranches".to_string(), "true".to_string());
        params.insert("onlyFavorites".to_string(), "false".to_string());
        params.insert("sortOrders".to_string(), "orderType=ASC".to_string());

        self.client
            .http
            .post(
                CONNECTORS_LIST_PATH,
                &params,
                &opts.filter,
                Some(&self.client.config().retry_config),
            )
            .await
            .map_err(|e| HarnessError::context("failed to list connectors", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harness_core::connector::ListConnectorRequest;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_connectors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/ng/api/connectors/listV2"))
            .and(query_param("pageIndex", "0"))
            .and(query_param("pageSize", "5"))
            .and(query_param("sortOrders", "orderType=ASC"))
            .and(body_json(serde_json::json!({
                "types": ["Aws"],
                "filterType": "Connector"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "SUCCESS",
                "data": {"content": [{"connector": {"identifier": "aws_prod", "type": "Aws"}}]}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = HarnessClient::builder()
            .base_url(server.uri())
            .api_key("pat.test")
            .build()
            .unwrap();
        let opts = ConnectorListOptions {
            filter: ListConnectorRequest {
                types: vec!["Aws".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let list = client
            .connectors()
            .list(&Scope::new("acc", "org", "proj"), opts)
            .await
            .unwrap();
        assert_eq!(list.data.content[0].connector.kind, "Aws");
    }
}
