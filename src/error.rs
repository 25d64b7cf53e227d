use thiserror::Error;

/// Errors that abort an import for a single URL
#[derive(Error, Debug)]
pub enum ImportError {
    /// The input was not an absolute URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure, timeout, too many redirects or a non-success status
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// The HTTP client could not be constructed from the configuration
    #[error("HTTP client error: {0}")]
    ClientError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Outcome of a structured-data sub-parser that found nothing usable.
///
/// These never leave the structured extractor; they are logged and the next
/// syntax is tried.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExtractError {
    /// Every JSON-LD block on the page failed to parse
    #[error("{0} JSON-LD block(s) present but none could be parsed")]
    MalformedJson(usize),
}
