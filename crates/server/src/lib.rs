//! Model Context Protocol server over the position source.
//!
//! Exposes the position history as an MCP resource and the pool
//! analytics as an MCP tool, speaking JSON-RPC 2.0 over stdio or HTTP:
//! - Message types and error codes
//! - Dispatcher shared by both transports
//! - Line-delimited stdio transport and an axum `POST /mcp` route

/// Error types.
pub mod error;
/// JSON-RPC 2.0 message types.
pub mod message;
/// Request dispatch.
pub mod service;
/// Stdio and HTTP transports.
pub mod transport;

pub use error::ServerError;
pub use message::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
pub use service::{ANALYTICS_TOOL, McpServer, POSITIONS_RESOURCE_URI, PROTOCOL_VERSION};
pub use transport::{serve_http, serve_stdio};
