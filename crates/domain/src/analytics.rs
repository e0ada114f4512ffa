//! Pool-level aggregation over position records.
//!
//! Aggregation is a pure function of its input and holds no state
//! across calls. Every division is guarded, so callers receive a typed
//! error instead of an arithmetic fault.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::Position;

/// Errors from aggregating a position set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The query returned no positions.
    #[error("no positions to aggregate")]
    NoPositions,
    /// Every position reported zero locked value.
    #[error("total value locked is zero, average price is undefined")]
    ZeroLiquidity,
    /// Every position reported zero transactions.
    #[error("transaction count is zero, average volume is undefined")]
    ZeroTxCount,
}

/// Summary statistics over one query's position set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolAnalytics {
    /// Sum of locked value across positions, in USD.
    pub total_liquidity: Decimal,
    /// Sum of traded volume across positions, in USD.
    pub total_volume: Decimal,
    /// Sum of transaction counts across positions.
    pub tx_count: u64,
    /// Volume per unit of locked value.
    pub average_price: Decimal,
    /// Volume per transaction, in USD.
    pub average_volume: Decimal,
}

impl PoolAnalytics {
    /// Aggregates a position set into pool analytics.
    ///
    /// # Errors
    /// Returns an error when the set is empty or when either average
    /// would divide by zero.
    pub fn from_positions(positions: &[Position]) -> Result<Self, AnalyticsError> {
        if positions.is_empty() {
            return Err(AnalyticsError::NoPositions);
        }

        let total_liquidity: Decimal = positions.iter().map(|p| p.total_value_locked_usd).sum();
        let total_volume: Decimal = positions.iter().map(|p| p.volume_usd).sum();
        let tx_count: u64 = positions.iter().map(|p| p.tx_count).sum();

        if total_liquidity.is_zero() {
            return Err(AnalyticsError::ZeroLiquidity);
        }
        if tx_count == 0 {
            return Err(AnalyticsError::ZeroTxCount);
        }

        let average_price = total_volume / total_liquidity;
        let average_volume = total_volume / Decimal::from(tx_count);

        Ok(Self {
            total_liquidity,
            total_volume,
            tx_count,
            average_price,
            average_volume,
        })
    }

    /// Renders the one-line report served at the tool boundary.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Average Price: {}, Average Volume: {}",
            self.average_price, self.average_volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_positions() -> Vec<Position> {
        vec![
            Position::new("WETH", "USDC", 5, dec!(100), dec!(50)),
            Position::new("WBTC", "USDT", 15, dec!(300), dec!(150)),
        ]
    }

    #[test]
    fn test_aggregates_known_values() {
        let analytics = PoolAnalytics::from_positions(&sample_positions()).unwrap();

        assert_eq!(analytics.total_liquidity, dec!(400));
        assert_eq!(analytics.total_volume, dec!(200));
        assert_eq!(analytics.tx_count, 20);
        assert_eq!(analytics.average_price, dec!(0.5));
        assert_eq!(analytics.average_volume, dec!(10));
    }

    #[test]
    fn test_summary_line() {
        let analytics = PoolAnalytics::from_positions(&sample_positions()).unwrap();
        assert_eq!(analytics.summary(), "Average Price: 0.5, Average Volume: 10");
    }

    #[test]
    fn test_empty_set_is_an_error() {
        assert_eq!(
            PoolAnalytics::from_positions(&[]),
            Err(AnalyticsError::NoPositions)
        );
    }

    #[test]
    fn test_zero_liquidity_is_an_error() {
        let positions = vec![Position::new("WETH", "USDC", 5, dec!(0), dec!(50))];
        assert_eq!(
            PoolAnalytics::from_positions(&positions),
            Err(AnalyticsError::ZeroLiquidity)
        );
    }

    #[test]
    fn test_zero_tx_count_is_an_error() {
        let positions = vec![Position::new("WETH", "USDC", 0, dec!(100), dec!(50))];
        assert_eq!(
            PoolAnalytics::from_positions(&positions),
            Err(AnalyticsError::ZeroTxCount)
        );
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let positions = sample_positions();
        let first = PoolAnalytics::from_positions(&positions).unwrap();
        let second = PoolAnalytics::from_positions(&positions).unwrap();
        assert_eq!(first, second);
    }
}
