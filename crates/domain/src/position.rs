use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A flattened liquidity position as reported by the subgraph.
///
/// One record per position entry in a query result. Records carry no
/// identity beyond their field tuple and are discarded after aggregation.
/// Serde names mirror the subgraph schema so the serialized list matches
/// the raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Symbol of the pool's first token.
    pub token0: String,
    /// Symbol of the pool's second token.
    pub token1: String,
    /// Lifetime transaction count of the pool.
    #[serde(rename = "txCount")]
    pub tx_count: u64,
    /// Total value locked in the pool, in USD.
    #[serde(rename = "totalValueLockedUSD")]
    pub total_value_locked_usd: Decimal,
    /// Lifetime traded volume of the pool, in USD.
    #[serde(rename = "volumeUSD")]
    pub volume_usd: Decimal,
}

impl Position {
    pub fn new(
        token0: impl Into<String>,
        token1: impl Into<String>,
        tx_count: u64,
        total_value_locked_usd: Decimal,
        volume_usd: Decimal,
    ) -> Self {
        Self {
            token0: token0.into(),
            token1: token1.into(),
            tx_count,
            total_value_locked_usd,
            volume_usd,
        }
    }
}
