use thiserror::Error;

#[derive(Error, Debug)]
pub enum MutationError {
    #[error("invalid admission review body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    #[error("admission review is not a JSON object: {0}")]
    InvalidReview(#[source] serde_json::Error),

    #[error("cannot serialize JSON Patch: {0}")]
    SerializePatch(#[source] serde_json::Error),
}
