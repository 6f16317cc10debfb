//! Error types shared by the library modules. The binary wraps these with
//! `anyhow` context at startup.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path:?}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// No API key in the environment variable named by the config.
    #[error("no API key found; set the {var} environment variable")]
    MissingApiKey { var: String },

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("{0}")]
    Http(#[from] reqwest::Error),

    /// Non-200 answer from the generation endpoint.
    #[error("{code} - {reason}")]
    Status { code: u16, reason: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl Error {
    /// Whether a failed request is worth sending again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Error::Status { code, .. } => *code == 429 || (500..600).contains(code),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
