use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[cfg(feature = "serde")]
    #[error("Malformed feed document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feed document is empty")]
    Empty,
}
