use thiserror::Error;

#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("FEC API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: Box<CollectorError>,
    },

    #[error("Storage error at {path}: {source}")]
    Storage {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CollectorError {
    /// True when the upstream rejected the query itself (HTTP 400), either
    /// directly or as the last failure of an exhausted retry loop.
    pub fn is_bad_request(&self) -> bool {
        match self {
            CollectorError::Api { status, .. } => *status == 400,
            CollectorError::RetriesExhausted { last, .. } => last.is_bad_request(),
            _ => false,
        }
    }

    /// Failures that came from talking to the upstream API, as opposed to
    /// local storage or configuration problems.
    pub fn is_request_failure(&self) -> bool {
        matches!(
            self,
            CollectorError::Http(_)
                | CollectorError::Api { .. }
                | CollectorError::RetriesExhausted { .. }
                | CollectorError::JsonError(_)
        )
    }

    pub fn storage(path: impl AsRef<std::path::Path>, source: std::io::Error) -> Self {
        CollectorError::Storage {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CollectorError>;
