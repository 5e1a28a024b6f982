use thiserror::Error;

/// Failures while talking to a billing or log endpoint.
///
/// The UI collapses all of these into one fixed message per domain; the
/// variants only exist so the cause can be logged.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Log query rejected: {0}")]
    Rejected(String),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(#[from] arboard::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find home directory")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid endpoint mapping: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Endpoint mapping must be a JSON object of name to URL")]
    NotAnObject,

    #[error("Endpoint '{name}' has an invalid URL: {reason}")]
    InvalidUrl { name: String, reason: String },

    #[error("No endpoints configured")]
    NoEndpoints,

    #[error("http.timeout_secs must be greater than 0")]
    ZeroTimeout,
}
