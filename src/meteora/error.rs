use thiserror::Error;

/// Why a single endpoint failed to produce a usable batch.
///
/// Every variant is recoverable: the fetcher moves on to the next endpoint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("HTTP status {status}")]
    Status { status: u16 },

    #[error("malformed JSON body: {0}")]
    Parse(String),

    #[error("no pool collection found in payload")]
    NoCollection,

    #[error("none of {raw} records could be normalized")]
    NoneNormalized { raw: usize },

    #[error("none of {normalized} normalized pools passed admission")]
    NoneAdmitted { normalized: usize },
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => FetchError::Status { status: status.as_u16() },
            None => FetchError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
