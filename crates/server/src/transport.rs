//! Transports for the MCP dispatcher.
//!
//! Stdio speaks line-delimited JSON-RPC and is the default for MCP
//! clients; the HTTP transport exposes the same dispatcher on a single
//! POST route.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::post};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use subgraph_mcp_data::PositionSource;

use crate::error::ServerError;
use crate::message::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::service::McpServer;

/// Serves line-delimited JSON-RPC over stdin/stdout until EOF.
///
/// Stdout carries protocol frames only; logging goes to stderr.
pub async fn serve_stdio<S: PositionSource>(server: McpServer<S>) -> Result<(), ServerError> {
    let mut reader = BufReader::new(tokio::io::stdin());
    let mut stdout = tokio::io::stdout();
    let mut buf = String::new();
    info!("MCP server listening on stdio");
    loop {
        buf.clear();
        if reader.read_line(&mut buf).await? == 0 {
            break;
        }
        if buf.trim().is_empty() {
            continue;
        }
        let response = match serde_json::from_str::<JsonRpcRequest>(&buf) {
            Ok(request) => server.handle(request).await,
            Err(_) => Some(JsonRpcResponse::error(
                Value::Null,
                JsonRpcError::parse_error(),
            )),
        };
        if let Some(response) = response {
            let line = serde_json::to_string(&response)?;
            stdout.write_all(line.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}

/// Serves the dispatcher on `POST /mcp`.
pub async fn serve_http<S>(server: McpServer<S>, addr: SocketAddr) -> Result<(), ServerError>
where
    S: PositionSource + 'static,
{
    let app = Router::new()
        .route("/mcp", post(handle::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(server));

    info!(%addr, "MCP server listening on http");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle<S: PositionSource + 'static>(
    State(server): State<Arc<McpServer<S>>>,
    Json(payload): Json<Value>,
) -> Json<Value> {
    let response = match serde_json::from_value::<JsonRpcRequest>(payload) {
        Ok(request) => server.handle(request).await,
        Err(_) => Some(JsonRpcResponse::error(
            Value::Null,
            JsonRpcError::parse_error(),
        )),
    };
    match response {
        Some(response) => Json(serde_json::to_value(response).unwrap_or(Value::Null)),
        // Notifications are acknowledged with an empty body.
        None => Json(json!(null)),
    }
}
