use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrameError {
    #[error("empty frame")]
    Empty,
    #[error("invalid message: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("object record {index}: {source}")]
    Invalid {
        index: usize,
        source: serde_json::Error,
    },
}
