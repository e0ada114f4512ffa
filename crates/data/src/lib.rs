//! Data retrieval from The Graph gateway.
//!
//! This crate owns the boundary to the remote indexing API:
//! - Environment-driven endpoint configuration
//! - The fixed positions query and its wire types
//! - A reqwest-backed client behind the [`PositionSource`] seam

/// Endpoint configuration.
pub mod config;
/// Error types.
pub mod error;
/// GraphQL client and wire types.
pub mod subgraph;

pub use config::{SUBGRAPH_API_KEY_ENV, SUBGRAPH_ID_ENV, SubgraphConfig};
pub use error::{ConfigError, DataError};
pub use subgraph::SubgraphClient;

use async_trait::async_trait;
use subgraph_mcp_domain::Position;

/// Seam between data retrieval and consumers.
///
/// One implementation queries the live subgraph; tests substitute
/// in-memory sources. One network round trip per invocation, no retry,
/// no caching.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn fetch_positions(&self) -> Result<Vec<Position>, DataError>;
}
