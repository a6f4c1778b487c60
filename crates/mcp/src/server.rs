// MCP server: JSON-RPC dispatch over newline-delimited stdio

use crate::protocol::*;
use crate::tools::ToolRegistry;
use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio_util::codec::{FramedRead, FramedWrite, LinesCodec};
use tracing::{debug, error, info, warn};

pub const SERVER_NAME: &str = "harness-mcp-server";

pub struct McpServer {
    registry: ToolRegistry,
    version: String,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Serve requests line by line until the reader closes.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = FramedRead::new(reader, LinesCodec::new());
        let mut sink = FramedWrite::new(writer, LinesCodec::new());

        info!(tools = self.registry.len(), "MCP server listening on stdio");

        while let Some(line) = lines.next().await {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                sink.send(serde_json::to_string(&response)?).await?;
            }
        }

        info!("stdin closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw message. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparseable message");
                return Some(JsonRpcResponse::error(Value::Null, JsonRpcError::parse_error()));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle_request(request).await,
            Err(_) => Some(JsonRpcResponse::error(id, JsonRpcError::invalid_request())),
        }
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "Received request");

        // notifications (initialized, cancelled, ...) need no answer
        if request.is_notification() {
            return None;
        }
        let id = request.id.clone().unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::from_result(id, &self.initialize(request.params)),
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            "tools/list" => JsonRpcResponse::from_result(
                id,
                &ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            method => JsonRpcResponse::error(id, JsonRpcError::method_not_found(method)),
        };
        Some(response)
    }

    fn initialize(&self, params: Option<Value>) -> InitializeResult {
        let requested = params
            .and_then(|p| serde_json::from_value::<InitializeParams>(p).ok())
            .map(|p| {
                info!(client = %p.client_info.name, version = %p.client_info.version, "Client connected");
                p.protocol_version
            });

        InitializeResult {
            protocol_version: requested.unwrap_or_else(|| PROTOCOL_VERSION.to_string()),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: self.version.clone(),
            },
        }
    }

    async fn call_tool(&self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params.map(serde_json::from_value::<CallToolParams>) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(id, JsonRpcError::invalid_params(e.to_string()))
            }
            None => {
                return JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_params("Missing tool call params"),
                )
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_params(format!("Unknown tool: {}", params.name)),
            );
        };

        let result = match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                error!(tool = %params.name, error = %format!("{:#}", e), "Tool call failed");
                CallToolResult::error(format!("{:#}", e))
            }
        };
        JsonRpcResponse::from_result(id, &result)
    }
}
