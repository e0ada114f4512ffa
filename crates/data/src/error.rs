use serde_json::Value;
use thiserror::Error;

/// Errors reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The gateway API key variable is absent.
    #[error("environment variable {0} is not set")]
    MissingApiKey(&'static str),
}

/// Errors from one subgraph query.
///
/// Rendering as user-visible text is left to the serving boundary;
/// nothing below it formats error strings.
#[derive(Debug, Error)]
pub enum DataError {
    /// Transport or HTTP-status failure.
    #[error("subgraph request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The response decoded but carried a non-empty `errors` array.
    /// The wrapped value is the error payload verbatim.
    #[error("subgraph query failed: {0}")]
    Query(Value),
    /// The response carried neither data nor errors.
    #[error("subgraph response carried no data")]
    MissingData,
    /// A numeric field failed exact coercion.
    #[error("field {field} does not parse as a number: {value:?}")]
    InvalidField {
        /// Subgraph field name.
        field: &'static str,
        /// Raw value as received.
        value: String,
    },
}
