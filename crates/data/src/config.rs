use std::env;

use crate::error::ConfigError;

/// Environment variable holding The Graph gateway API key.
pub const SUBGRAPH_API_KEY_ENV: &str = "SUBGRAPH_API_KEY";
/// Environment variable overriding the queried subgraph id.
pub const SUBGRAPH_ID_ENV: &str = "SUBGRAPH_ID";

/// The Graph gateway base URL.
pub const GATEWAY_BASE_URL: &str = "https://gateway.thegraph.com/api";
/// Uniswap v3 mainnet subgraph id.
pub const UNISWAP_V3_SUBGRAPH_ID: &str = "5zvR82QoaXYFyDEKLZ9t6v9adgnptxYpKpSbxtgVENFV";
/// Positions fetched per query.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Endpoint configuration for the subgraph client.
#[derive(Debug, Clone)]
pub struct SubgraphConfig {
    /// Gateway API key, embedded in the endpoint path.
    pub api_key: String,
    /// Subgraph id to query.
    pub subgraph_id: String,
    /// Number of positions requested per query.
    pub page_size: u32,
}

impl SubgraphConfig {
    /// Creates a config for the default Uniswap v3 subgraph.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            subgraph_id: UNISWAP_V3_SUBGRAPH_ID.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Reads the config from the process environment.
    ///
    /// # Errors
    /// Returns an error if `SUBGRAPH_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(SUBGRAPH_API_KEY_ENV)
            .map_err(|_| ConfigError::MissingApiKey(SUBGRAPH_API_KEY_ENV))?;
        let mut config = Self::new(api_key);
        if let Ok(id) = env::var(SUBGRAPH_ID_ENV) {
            config.subgraph_id = id;
        }
        Ok(config)
    }

    /// Sets the subgraph id.
    #[must_use]
    pub fn with_subgraph_id(mut self, id: impl Into<String>) -> Self {
        self.subgraph_id = id.into();
        self
    }

    /// Sets the page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Full gateway endpoint URL for the configured subgraph.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}/subgraphs/id/{}",
            GATEWAY_BASE_URL, self.api_key, self.subgraph_id
        )
    }
}
