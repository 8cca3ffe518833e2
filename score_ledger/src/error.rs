use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("unknown game mode: {0}")]
    UnknownMode(String),

    #[error("failed to access score file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed score data: {0}")]
    Json(#[from] serde_json::Error),
}
