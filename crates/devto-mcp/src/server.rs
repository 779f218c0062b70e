//! Stdio MCP server loop.
//!
//! Reads one JSON-RPC message per line from stdin and writes one response
//! per line to stdout. Logging goes to stderr; stdout carries only
//! protocol traffic.

use std::sync::Arc;

use devto_core::Result;
use devto_tools::ToolRegistry;
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::types::{
    InitializeResult, JsonRpcRequest, JsonRpcResponse, ListToolsResult, McpTool, ServerCapabilities,
    ServerInfo, ToolCallParams, ToolCallResult, ToolsCapability, INTERNAL_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};

pub struct McpServer {
    registry: Arc<ToolRegistry>,
    info: ServerInfo,
}

impl McpServer {
    pub fn new(name: impl Into<String>, version: impl Into<String>, registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            info: ServerInfo {
                name: name.into(),
                version: version.into(),
            },
        }
    }

    /// Serve until stdin reaches EOF.
    pub async fn run_stdio(&self) -> Result<()> {
        info!(server = %self.info.name, "MCP server listening on stdio");

        let mut reader = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut line = String::new();

        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("stdin closed, shutting down");
                    break;
                }
                Ok(_) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if let Some(response) = self.handle_line(trimmed).await {
                        let encoded = serde_json::to_string(&response)?;
                        stdout.write_all(encoded.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                Err(e) => {
                    error!("Error reading from stdin: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    async fn handle_line(&self, raw: &str) -> Option<JsonRpcResponse> {
        debug!("received: {}", raw);
        match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => Some(JsonRpcResponse::error(
                Value::Null,
                PARSE_ERROR,
                format!("Parse error: {e}"),
            )),
        }
    }

    /// Dispatch a single request. Returns `None` for notifications.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => {
                let id = id?;
                let result = InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability {
                            list_changed: Some(false),
                        }),
                    },
                    server_info: self.info.clone(),
                };
                Some(self.result_response(id, &result))
            }
            "notifications/initialized" => None,
            "ping" => Some(JsonRpcResponse::result(id?, Value::Object(Default::default()))),
            "tools/list" => {
                let id = id?;
                let tools: Vec<McpTool> = self
                    .registry
                    .get_all()
                    .iter()
                    .map(|tool| McpTool {
                        name: tool.name().to_string(),
                        description: tool.description().to_string(),
                        input_schema: tool.schema(),
                    })
                    .collect();
                Some(self.result_response(id, &ListToolsResult { tools }))
            }
            "tools/call" => {
                let id = id?;
                let params: ToolCallParams =
                    match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                        Ok(params) => params,
                        Err(e) => {
                            return Some(JsonRpcResponse::error(
                                id,
                                INVALID_PARAMS,
                                format!("Invalid params: {e}"),
                            ))
                        }
                    };

                let Some(tool) = self.registry.get(&params.name) else {
                    return Some(JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        format!("Unknown tool: {}", params.name),
                    ));
                };

                debug!(tool = %params.name, "invoking tool");
                let result = match tool.execute(params.arguments).await {
                    Ok(text) => ToolCallResult::text(text),
                    Err(e) => {
                        error!(tool = %params.name, "tool failed: {}", e);
                        ToolCallResult::failure(e.to_string())
                    }
                };
                Some(self.result_response(id, &result))
            }
            other => {
                debug!("unhandled method: {}", other);
                let id = id?;
                Some(JsonRpcResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {other}"),
                ))
            }
        }
    }

    fn result_response<T: serde::Serialize>(&self, id: Value, result: &T) -> JsonRpcResponse {
        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::result(id, value),
            Err(e) => JsonRpcResponse::error(id, INTERNAL_ERROR, format!("Internal error: {e}")),
        }
    }
}
