//! HTTP transport layer for the Harness SDK.

use crate::config::{ClientConfig, RetryPolicy};
use crate::error::{HarnessError, HarnessResult, StatusClass};
use bytes::Bytes;
use harness_core::{ErrorResponse, QueryParams};
use reqwest::{header, Client, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};
use url::Url;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// A decoded response together with the retries it took to get it.
#[derive(Debug, Clone, PartialEq)]
pub struct Retried<T> {
    pub value: T,
    pub retries: u32,
}

/// HTTP transport for making API requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    /// Client without the API key, for presigned third-party URLs.
    download_client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> HarnessResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(HarnessError::Config("API key is required".to_string()));
        }

        let mut api_key = header::HeaderValue::from_str(&config.api_key)
            .map_err(|_| HarnessError::Config("Invalid API key format".to_string()))?;
        api_key.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert(header::HeaderName::from_static(API_KEY_HEADER), api_key);

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;
        let download_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            download_client,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Join `path` onto the base URL with exactly one `/` between them.
    pub fn build_url(&self, path: &str) -> HarnessResult<Url> {
        if path.is_empty() {
            return Ok(self.config.base_url.clone());
        }
        let joined = format!(
            "{}/{}",
            self.config.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }

    /// Execute a GET request.
    ///
    /// A failing status is reported even when the body decodes. When the body
    /// does not decode either, the decode failure is attached to the status
    /// error.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        headers: &[(&str, &str)],
    ) -> HarnessResult<T> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        let request = with_headers(self.client.get(url).query(&flatten_query(params)), headers);
        let response = request.send().await?;
        let class = StatusClass::classify(response.status().as_u16());
        let body = response.bytes().await?;

        match decode_body::<T>(class, &body) {
            Ok(_) if class.is_error() => Err(HarnessError::Status {
                class,
                detail: None,
            }),
            Ok(value) => Ok(value),
            Err(err @ HarnessError::Api { .. }) => Err(err),
            Err(err) if class.is_error() => Err(HarnessError::Status {
                class,
                detail: Some(err.to_string()),
            }),
            Err(err) => Err(err),
        }
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        params: &QueryParams,
        body: &B,
        retry: Option<&dyn RetryPolicy>,
    ) -> HarnessResult<T> {
        let payload = serde_json::to_vec(body).map_err(HarnessError::Serialize)?;
        let response = self
            .post_raw(path, params, Bytes::from(payload), &[], retry)
            .await?;
        Ok(response.value)
    }

    /// Execute a POST request with an already serialized body.
    pub async fn post_raw<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &QueryParams,
        body: Bytes,
        headers: &[(&str, &str)],
        retry: Option<&dyn RetryPolicy>,
    ) -> HarnessResult<Retried<T>> {
        self.execute_post(path, params, body, headers, retry, |bytes| {
            decode_body(StatusClass::None, bytes)
        })
        .await
    }

    async fn execute_post<T, F>(
        &self,
        path: &str,
        params: &QueryParams,
        body: Bytes,
        headers: &[(&str, &str)],
        retry: Option<&dyn RetryPolicy>,
        decode: F,
    ) -> HarnessResult<Retried<T>>
    where
        F: Fn(&[u8]) -> HarnessResult<T>,
    {
        let url = self
            .build_url(path)
            .map_err(|e| HarnessError::Request(e.to_string()))?;
        let query = flatten_query(params);

        let Some(policy) = retry else {
            let bytes = self.post_once(&url, &query, body, headers).await?;
            return Ok(Retried {
                value: decode(&bytes[..])?,
                retries: 0,
            });
        };

        let max_attempts = policy.max_attempts().max(1);
        let mut retries = 0;

        loop {
            let attempt = self
                .post_once(&url, &query, body.clone(), headers)
                .await
                .and_then(|bytes| decode(&bytes[..]));

            match attempt {
                Ok(value) => return Ok(Retried { value, retries }),
                Err(err) if err.is_transient() && retries + 1 < max_attempts => {
                    let backoff = policy.next_delay(retries);
                    retries += 1;
                    warn!(
                        retry_count = retries,
                        next_retry_in_ms = backoff.as_millis() as u64,
                        error = %err,
                        "Retrying request due to error"
                    );
                    tokio::time::sleep(backoff).await;
                }
                Err(err) if err.is_transient() || retries > 0 => {
                    return Err(HarnessError::RetriesExhausted {
                        retries,
                        source: Box::new(err),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One POST attempt. Returns the body of a 2xx response.
    async fn post_once(
        &self,
        url: &Url,
        query: &[(String, String)],
        body: Bytes,
        headers: &[(&str, &str)],
    ) -> HarnessResult<Bytes> {
        debug!(url = %url, "POST request");

        let request = self
            .client
            .post(url.clone())
            .query(query)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);
        let response = with_headers(request, headers).send().await?;

        let class = StatusClass::classify(response.status().as_u16());
        let bytes = response.bytes().await?;

        if class.is_error() {
            return Err(structured_error(class, &bytes).unwrap_or(HarnessError::Status {
                class,
                detail: None,
            }));
        }
        Ok(bytes)
    }

    /// Stream an unauthenticated GET of `url` into `dest`.
    ///
    /// Returns the number of bytes written.
    pub async fn download_to_file(&self, url: &str, dest: &Path) -> HarnessResult<u64> {
        let url = Url::parse(url)?;
        debug!(host = url.host_str().unwrap_or_default(), "Downloading archive");

        let mut response = self.download_client.get(url).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            return Err(HarnessError::Status {
                class: StatusClass::classify(status),
                detail: Some(format!("unexpected status code {}", status)),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

/// Expand every comma-separated value into repeated entries of its key.
pub fn flatten_query(params: &QueryParams) -> Vec<(String, String)> {
    params
        .iter()
        .flat_map(|(key, value)| {
            value
                .split(',')
                .map(move |part| (key.clone(), part.to_string()))
        })
        .collect()
}

fn with_headers(mut request: RequestBuilder, headers: &[(&str, &str)]) -> RequestBuilder {
    for (name, value) in headers {
        request = request.header(*name, *value);
    }
    request
}

/// Structured error document of a 4xx/5xx response, when it has a code or message.
fn structured_error(class: StatusClass, body: &[u8]) -> Option<HarnessError> {
    if !class.is_error() || matches!(class, StatusClass::Redirect(_)) {
        return None;
    }
    let doc: ErrorResponse = serde_json::from_slice(body).ok()?;
    doc.is_present().then(|| HarnessError::Api {
        class,
        code: doc.code,
        message: doc.message,
    })
}

fn decode_body<T: DeserializeOwned>(class: StatusClass, body: &[u8]) -> HarnessResult<T> {
    if let Some(err) = structured_error(class, body) {
        return Err(err);
    }

    serde_json::from_slice(body).map_err(|source| HarnessError::Decode {
        source,
        body: String::from_utf8_lossy(body).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryConfig;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestResponse {
        message: String,
        value: i32,
    }

    fn create_config(base_url: &str) -> Arc<ClientConfig> {
        Arc::new(ClientConfig::new(
            url::Url::parse(base_url).unwrap(),
            "pat.test-key",
        ))
    }

    fn transport(base_url: &str) -> HttpTransport {
        HttpTransport::new(create_config(base_url)).unwrap()
    }

    fn fast_retry(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_backoff: Duration::from_millis(1),
            max_backoff: Duration::from_millis(5),
            backoff_multiplier: 2.0,
        }
    }

    fn ok_body() -> TestResponse {
        TestResponse {
            message: "success".to_string(),
            value: 42,
        }
    }

    #[test]
    fn test_flatten_query_splits_commas() {
        let mut params = QueryParams::new();
        params.insert("state".to_string(), "open,closed".to_string());
        params.insert("page".to_string(), "1".to_string());

        assert_eq!(
            flatten_query(&params),
            vec![
                ("page".to_string(), "1".to_string()),
                ("state".to_string(), "open".to_string()),
                ("state".to_string(), "closed".to_string()),
            ]
        );
    }

    #[test]
    fn test_flatten_query_keeps_empty_value() {
        let mut params = QueryParams::new();
        params.insert("orgIdentifier".to_string(), String::new());

        assert_eq!(
            flatten_query(&params),
            vec![("orgIdentifier".to_string(), String::new())]
        );
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let config = Arc::new(ClientConfig::new(
            url::Url::parse("https://app.harness.io").unwrap(),
            "",
        ));
        let result = HttpTransport::new(config);
        assert!(matches!(result, Err(HarnessError::Config(_))));
    }

    #[tokio::test]
    async fn test_build_url() {
        let t = transport("http://localhost:8080");
        assert_eq!(
            t.build_url("/api/test").unwrap().as_str(),
            "http://localhost:8080/api/test"
        );

        let t = transport("http://localhost:8080/");
        assert_eq!(
            t.build_url("api/test").unwrap().as_str(),
            "http://localhost:8080/api/test"
        );

        let t = transport("http://localhost:8080/gateway/");
        assert_eq!(
            t.build_url("//code/api/v1/repos").unwrap().as_str(),
            "http://localhost:8080/gateway/code/api/v1/repos"
        );
        assert_eq!(
            t.build_url("").unwrap().as_str(),
            "http://localhost:8080/gateway/"
        );
    }

    #[tokio::test]
    async fn test_get_sends_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/test"))
            .and(header("x-api-key", "pat.test-key"))
            .and(query_param("accountIdentifier", "acc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut params = QueryParams::new();
        params.insert("accountIdentifier".to_string(), "acc".to_string());

        let result: TestResponse = transport(&server.uri())
            .get("api/test", &params, &[])
            .await
            .unwrap();
        assert_eq!(result, ok_body());
    }

    #[tokio::test]
    async fn test_get_extra_headers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/test"))
            .and(header("Harness-Account", "acc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;

        let result: TestResponse = transport(&server.uri())
            .get("api/test", &QueryParams::new(), &[("Harness-Account", "acc")])
            .await
            .unwrap();
        assert_eq!(result.value, 42);
    }

    #[tokio::test]
    async fn test_comma_values_sent_as_repeated_entries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/code/api/v1/repos/r/pullreq"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let mut params = QueryParams::new();
        params.insert("state".to_string(), "open,closed".to_string());

        let _: Vec<serde_json::Value> = transport(&server.uri())
            .get("code/api/v1/repos/r/pullreq", &params, &[])
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        let states: Vec<String> = requests[0]
            .url
            .query_pairs()
            .filter(|(k, _)| k == "state")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(states, vec!["open", "closed"]);
    }

    #[tokio::test]
    async fn test_get_structured_error_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "code": "RESOURCE_NOT_FOUND",
                "message": "Pipeline [build] not found"
            })))
            .mount(&server)
            .await;

        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .get("api/missing", &QueryParams::new(), &[])
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "API error: Pipeline [build] not found");
        assert_eq!(err.status_class(), Some(StatusClass::NotFound));
    }

    #[tokio::test]
    async fn test_get_structured_error_with_null_code() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/pipeline"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": null,
                "message": "pipeline missing"
            })))
            .mount(&server)
            .await;

        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .get("api/pipeline", &QueryParams::new(), &[])
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "API error: pipeline missing");
        assert_eq!(err.status_class(), Some(StatusClass::BadRequest));
    }

    #[tokio::test]
    async fn test_get_status_error_with_undecodable_body() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/bad"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .get("api/bad", &QueryParams::new(), &[])
            .await;
        match result {
            Err(HarnessError::Status {
                class,
                detail: Some(detail),
            }) => {
                assert_eq!(class, StatusClass::Server(502));
                assert!(detail.contains("<html>gateway</html>"));
            }
            other => panic!("Expected status error with detail, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_error_document_without_code_or_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/denied"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_json(serde_json::json!({"status": "ERROR", "detail": "nope"})),
            )
            .mount(&server)
            .await;

        let result: HarnessResult<serde_json::Value> = transport(&server.uri())
            .get("api/denied", &QueryParams::new(), &[])
            .await;
        match result {
            Err(HarnessError::Status {
                class,
                detail: None,
            }) => assert_eq!(class, StatusClass::Client(403)),
            other => panic!("Expected plain status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_decode_failure_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .get("api/test", &QueryParams::new(), &[])
            .await;
        assert!(matches!(result, Err(HarnessError::Decode { .. })));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/pipeline/api/pipelines/list"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"filterType": "PipelineSetup"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .mount(&server)
            .await;

        let result: TestResponse = transport(&server.uri())
            .post(
                "pipeline/api/pipelines/list",
                &QueryParams::new(),
                &serde_json::json!({"filterType": "PipelineSetup"}),
                None,
            )
            .await
            .unwrap();
        assert_eq!(result, ok_body());
    }

    #[tokio::test]
    async fn test_post_retries_transient_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .with_priority(1)
            .expect(2)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .with_priority(2)
            .expect(1)
            .mount(&server)
            .await;

        let policy = fast_retry(3);
        let result: Retried<TestResponse> = transport(&server.uri())
            .post_raw(
                "api/list",
                &QueryParams::new(),
                Bytes::from_static(b"{}"),
                &[],
                Some(&policy),
            )
            .await
            .unwrap();

        assert_eq!(result.value, ok_body());
        assert_eq!(result.retries, 2);
    }

    #[tokio::test]
    async fn test_post_retries_rate_limit() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .with_priority(2)
            .mount(&server)
            .await;

        let policy = fast_retry(3);
        let result: Retried<TestResponse> = transport(&server.uri())
            .post_raw(
                "api/list",
                &QueryParams::new(),
                Bytes::new(),
                &[],
                Some(&policy),
            )
            .await
            .unwrap();
        assert_eq!(result.retries, 1);
    }

    #[tokio::test]
    async fn test_post_bad_request_not_retried() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let policy = fast_retry(5);
        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .post("api/list", &QueryParams::new(), &(), Some(&policy))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.status_class(), Some(StatusClass::BadRequest));
        assert_eq!(err.to_string(), "bad request");
    }

    #[tokio::test]
    async fn test_post_retries_exhausted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(503))
            .expect(3)
            .mount(&server)
            .await;

        let policy = fast_retry(3);
        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .post("api/list", &QueryParams::new(), &(), Some(&policy))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.retries(), 2);
        assert_eq!(
            err.to_string(),
            "request failed after 2 retries: received server side error status code 503"
        );
    }

    #[tokio::test]
    async fn test_post_retries_transport_failure() {
        // nothing listens on port 1
        let policy = fast_retry(3);
        let result: HarnessResult<TestResponse> = transport("http://127.0.0.1:1")
            .post("api/list", &QueryParams::new(), &(), Some(&policy))
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.retries(), 2);
        match err {
            HarnessError::RetriesExhausted { source, .. } => {
                assert!(matches!(*source, HarnessError::Transport(_)));
            }
            other => panic!("expected RetriesExhausted, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_post_retries_decode_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{truncated"))
            .up_to_n_times(1)
            .with_priority(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ok_body()))
            .with_priority(2)
            .mount(&server)
            .await;

        let policy = fast_retry(3);
        let result: Retried<TestResponse> = transport(&server.uri())
            .post_raw(
                "api/list",
                &QueryParams::new(),
                Bytes::new(),
                &[],
                Some(&policy),
            )
            .await
            .unwrap();
        assert_eq!(result.retries, 1);
    }

    #[tokio::test]
    async fn test_post_without_policy_single_attempt() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/create"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .post("api/create", &QueryParams::new(), &(), None)
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.status_class(), Some(StatusClass::Server(503)));
        assert_eq!(err.retries(), 0);
    }

    #[tokio::test]
    async fn test_post_structured_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/create"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "message": "pull request already exists"
            })))
            .mount(&server)
            .await;

        let result: HarnessResult<TestResponse> = transport(&server.uri())
            .post("api/create", &QueryParams::new(), &(), None)
            .await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "API error: pull request already exists"
        );
    }

    #[tokio::test]
    async fn test_download_omits_api_key() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/bucket/logs.zip"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"PK\x03\x04data".to_vec()))
            .mount(&server)
            .await;

        let dir = std::env::temp_dir().join(format!("harness-sdk-dl-{}", std::process::id()));
        tokio::fs::create_dir_all(&dir).await.unwrap();
        let dest = dir.join("logs.zip");

        let written = transport(&server.uri())
            .download_to_file(&format!("{}/bucket/logs.zip", server.uri()), &dest)
            .await
            .unwrap();
        assert_eq!(written, 8);
        assert_eq!(tokio::fs::read(&dest).await.unwrap(), b"PK\x03\x04data");

        let requests = server.received_requests().await.unwrap();
        assert!(requests[0].headers.get(API_KEY_HEADER).is_none());

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
