use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Exit code for setup failures (bad flags, missing directory or list file).
pub const EXIT_SETUP: u8 = 1;

/// Exit code for anything that aborts a run once it has started.
pub const EXIT_FATAL: u8 = 255;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{kind} not found: {}", .path.display())]
    NotFound { kind: &'static str, path: PathBuf },

    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("bad {endpoint} response code: {status}")]
    BadStatus {
        endpoint: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("could not decode search response ({} bytes): {source}", .body.len())]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error(
        "invalid search response count: {observed}, must be more than previous: {previous}"
    )]
    ConsistencyViolation {
        observed: usize,
        previous: usize,
        body: String,
    },
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Io(_) | Self::Config(_) | Self::NotFound { .. } => EXIT_SETUP,
            Self::Http(_)
            | Self::Encode(_)
            | Self::BadStatus { .. }
            | Self::Decode { .. }
            | Self::ConsistencyViolation { .. } => EXIT_FATAL,
        }
    }

    /// Raw response body attached to decode and consistency failures.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Decode { body, .. }
            | Self::ConsistencyViolation { body, .. } => Some(body),
            _ => None,
        }
    }
}
