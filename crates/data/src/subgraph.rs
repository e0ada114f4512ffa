//! GraphQL client for the positions query.
//!
//! Issues the fixed query against the gateway endpoint and flattens the
//! nested pool fields into [`Position`] records. One round trip per call,
//! failures propagate immediately to the caller.

use std::str::FromStr;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, warn};

use subgraph_mcp_domain::Position;

use crate::PositionSource;
use crate::config::SubgraphConfig;
use crate::error::DataError;

/// Positions query document; the page size arrives as `$first`.
pub const POSITIONS_QUERY: &str = r#"
query Positions($first: Int!) {
    positions(first: $first) {
        id
        pool {
            id
            token0 { id symbol }
            token1 { id symbol }
            txCount
            totalValueLockedUSD
            volumeUSD
        }
    }
}
"#;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

/// Wire shape of a GraphQL-over-HTTP response. Query-level errors can
/// arrive alongside an HTTP 200, so both halves are decoded.
#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<PositionsData>,
    #[serde(default)]
    errors: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PositionsData {
    positions: Vec<PositionEntry>,
}

#[derive(Debug, Deserialize)]
struct PositionEntry {
    pool: PoolEntry,
}

/// Nested pool fields. The subgraph serializes BigInt and BigDecimal
/// values as JSON strings, coerced exactly during flattening.
#[derive(Debug, Deserialize)]
struct PoolEntry {
    token0: TokenEntry,
    token1: TokenEntry,
    #[serde(rename = "txCount")]
    tx_count: String,
    #[serde(rename = "totalValueLockedUSD")]
    total_value_locked_usd: String,
    #[serde(rename = "volumeUSD")]
    volume_usd: String,
}

#[derive(Debug, Deserialize)]
struct TokenEntry {
    symbol: String,
}

/// Reqwest-backed client for the gateway endpoint.
pub struct SubgraphClient {
    http: Client,
    endpoint: String,
    page_size: u32,
}

impl SubgraphClient {
    /// Creates a client for the configured endpoint.
    #[must_use]
    pub fn new(config: &SubgraphConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.endpoint_url(),
            page_size: config.page_size,
        }
    }

    async fn execute(&self) -> Result<GraphQlResponse, DataError> {
        let body = GraphQlRequest {
            query: POSITIONS_QUERY,
            variables: json!({ "first": self.page_size }),
        };
        debug!(page_size = self.page_size, "querying subgraph");
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<GraphQlResponse>().await?)
    }
}

#[async_trait]
impl PositionSource for SubgraphClient {
    async fn fetch_positions(&self) -> Result<Vec<Position>, DataError> {
        decode(self.execute().await?)
    }
}

/// Turns a decoded response into position records, failing on
/// query-level errors or missing data.
fn decode(response: GraphQlResponse) -> Result<Vec<Position>, DataError> {
    if !response.errors.is_empty() {
        warn!(count = response.errors.len(), "subgraph returned query errors");
        return Err(DataError::Query(Value::Array(response.errors)));
    }
    let data = response.data.ok_or(DataError::MissingData)?;
    data.positions.into_iter().map(flatten_entry).collect()
}

fn flatten_entry(entry: PositionEntry) -> Result<Position, DataError> {
    let pool = entry.pool;
    Ok(Position::new(
        pool.token0.symbol,
        pool.token1.symbol,
        parse_count("txCount", pool.tx_count)?,
        parse_usd("totalValueLockedUSD", pool.total_value_locked_usd)?,
        parse_usd("volumeUSD", pool.volume_usd)?,
    ))
}

fn parse_count(field: &'static str, value: String) -> Result<u64, DataError> {
    value
        .parse::<u64>()
        .map_err(|_| DataError::InvalidField { field, value })
}

fn parse_usd(field: &'static str, value: String) -> Result<Decimal, DataError> {
    Decimal::from_str(&value).map_err(|_| DataError::InvalidField { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn parse(payload: &str) -> GraphQlResponse {
        serde_json::from_str(payload).unwrap()
    }

    const TWO_POSITIONS: &str = r#"{
        "data": {
            "positions": [
                {
                    "id": "1",
                    "pool": {
                        "id": "0xaaa",
                        "token0": { "id": "0x1", "symbol": "WETH" },
                        "token1": { "id": "0x2", "symbol": "USDC" },
                        "txCount": "5",
                        "totalValueLockedUSD": "100",
                        "volumeUSD": "50"
                    }
                },
                {
                    "id": "2",
                    "pool": {
                        "id": "0xbbb",
                        "token0": { "id": "0x3", "symbol": "WBTC" },
                        "token1": { "id": "0x4", "symbol": "USDT" },
                        "txCount": "15",
                        "totalValueLockedUSD": "300.25",
                        "volumeUSD": "150.5"
                    }
                }
            ]
        }
    }"#;

    #[test]
    fn test_decode_flattens_every_entry() {
        let positions = decode(parse(TWO_POSITIONS)).unwrap();

        assert_eq!(positions.len(), 2);
        assert_eq!(
            positions[0],
            Position::new("WETH", "USDC", 5, dec!(100), dec!(50))
        );
        assert_eq!(
            positions[1],
            Position::new("WBTC", "USDT", 15, dec!(300.25), dec!(150.5))
        );
    }

    #[test]
    fn test_query_errors_fail_the_call() {
        let payload = r#"{
            "data": null,
            "errors": [{ "message": "indexer timeout" }]
        }"#;

        let err = decode(parse(payload)).unwrap_err();
        match err {
            DataError::Query(value) => {
                assert_eq!(value[0]["message"], "indexer timeout");
            }
            other => panic!("expected query error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_data_fails_the_call() {
        let err = decode(parse("{}")).unwrap_err();
        assert!(matches!(err, DataError::MissingData));
    }

    #[test]
    fn test_unparsable_count_names_the_field() {
        let payload = r#"{
            "data": {
                "positions": [
                    {
                        "id": "1",
                        "pool": {
                            "id": "0xaaa",
                            "token0": { "id": "0x1", "symbol": "WETH" },
                            "token1": { "id": "0x2", "symbol": "USDC" },
                            "txCount": "not-a-number",
                            "totalValueLockedUSD": "100",
                            "volumeUSD": "50"
                        }
                    }
                ]
            }
        }"#;

        let err = decode(parse(payload)).unwrap_err();
        match err {
            DataError::InvalidField { field, value } => {
                assert_eq!(field, "txCount");
                assert_eq!(value, "not-a-number");
            }
            other => panic!("expected field error, got {other:?}"),
        }
    }
}
