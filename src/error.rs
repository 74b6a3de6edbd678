use std::path::PathBuf;

/// All errors that can occur while talking to the Skillonx backend or
/// persisting a session.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// HTTP request failed (network, DNS, TLS, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The configured base URL cannot be used to build request URLs.
    #[error("invalid base url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    Api {
        url: String,
        status: reqwest::StatusCode,
        message: Option<String>,
    },

    /// Failed to read the response body.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A success response did not have the expected JSON shape.
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    /// Reading or writing persisted session state failed.
    #[error("session storage failed at {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize a value for persistence.
    #[error("failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl Error {
    /// The human-readable message the server attached to a failed request,
    /// if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            Error::Api {
                message: Some(message),
                ..
            } => Some(message.as_str()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
