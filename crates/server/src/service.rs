//! MCP request dispatch.
//!
//! One dispatcher serves both transports. Typed errors from the data
//! and domain layers stay typed until this boundary, where resource and
//! tool payloads render them as `"Error: {message}"` text. Protocol
//! faults (bad params, unknown methods) are JSON-RPC errors instead.

use serde_json::{Value, json};
use tracing::debug;

use subgraph_mcp_data::PositionSource;
use subgraph_mcp_domain::PoolAnalytics;

use crate::message::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};

/// MCP protocol revision spoken by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";
/// Server name reported during the handshake.
pub const SERVER_NAME: &str = "subgraph-analytics";
/// Uri of the position history resource.
pub const POSITIONS_RESOURCE_URI: &str = "uniswap-data://history";
/// Name of the analytics tool.
pub const ANALYTICS_TOOL: &str = "pool_analytics";

/// MCP server over a position source.
pub struct McpServer<S> {
    source: S,
}

impl<S: PositionSource> McpServer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Handles one incoming message. Notifications produce no response.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            debug!(method = %request.method, "notification received");
            return None;
        };
        let response = match self.dispatch(&request.method, &request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: &Value) -> Result<Value, JsonRpcError> {
        debug!(method, "dispatching request");
        match method {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "resources/list" => Ok(self.list_resources()),
            "resources/read" => self.read_resource(params).await,
            "tools/list" => Ok(self.list_tools()),
            "tools/call" => self.call_tool(params).await,
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "resources": {},
                "tools": {},
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn list_resources(&self) -> Value {
        json!({
            "resources": [{
                "uri": POSITIONS_RESOURCE_URI,
                "name": "Uniswap position history",
                "description": "Liquidity positions fetched from the Uniswap v3 subgraph",
                "mimeType": "application/json",
            }]
        })
    }

    async fn read_resource(&self, params: &Value) -> Result<Value, JsonRpcError> {
        let uri = params
            .get("uri")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::invalid_params("missing resource uri"))?;
        if uri != POSITIONS_RESOURCE_URI {
            return Err(JsonRpcError::resource_not_found(uri));
        }

        let (mime_type, text) = match self.source.fetch_positions().await {
            Ok(positions) => {
                let body = serde_json::to_string(&positions)
                    .map_err(|e| JsonRpcError::internal_error(e.to_string()))?;
                ("application/json", body)
            }
            Err(e) => ("text/plain", format!("Error: {e}")),
        };

        Ok(json!({
            "contents": [{
                "uri": uri,
                "mimeType": mime_type,
                "text": text,
            }]
        }))
    }

    fn list_tools(&self) -> Value {
        json!({
            "tools": [{
                "name": ANALYTICS_TOOL,
                "description": "Aggregate pool analytics over the fetched positions",
                "inputSchema": {
                    "type": "object",
                    "properties": {},
                    "required": [],
                },
            }]
        })
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, JsonRpcError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::invalid_params("missing tool name"))?;

        let (text, is_error) = if name == ANALYTICS_TOOL {
            match self.analytics_summary().await {
                Ok(text) => (text, false),
                Err(message) => (message, true),
            }
        } else {
            (format!("Error: unknown tool {name:?}"), true)
        };

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "isError": is_error,
        }))
    }

    /// Fetches once and aggregates; either failure collapses to the
    /// boundary string. No partial results.
    async fn analytics_summary(&self) -> Result<String, String> {
        let positions = self
            .source
            .fetch_positions()
            .await
            .map_err(|e| format!("Error: {e}"))?;
        let analytics =
            PoolAnalytics::from_positions(&positions).map_err(|e| format!("Error: {e}"))?;
        Ok(analytics.summary())
    }
}
