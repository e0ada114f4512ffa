//! Domain types for subgraph position analytics.
//!
//! This crate holds the data model shared by the data and server layers:
//! - Liquidity position records as returned by the subgraph
//! - Pool-level aggregation with guarded arithmetic

/// Aggregated pool analytics.
pub mod analytics;
/// Liquidity position records.
pub mod position;

pub use analytics::{AnalyticsError, PoolAnalytics};
pub use position::Position;
