use thiserror::Error;

/// Errors that can occur while fetching a recipe feed
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request URL could not be turned into an http(s) URL
    #[error("Malformed request URL {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },

    /// Connection, timeout or body read failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Server answered with anything but 200
    #[error("Error response code: {0}")]
    HttpStatus(u16),

    /// Server answered 200 with nothing in the body
    #[error("Response body was empty")]
    EmptyBody,

    /// Body was not a valid recipe document
    #[error("Failed to parse recipes: {0}")]
    Parse(#[from] serde_json::Error),

    /// Blocking runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
