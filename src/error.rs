use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Every way a ledger operation or its surrounding plumbing can fail.
///
/// The first five variants are the caller-visible taxonomy: a violated
/// precondition is reported synchronously as one of these, and the ledger
/// state is guaranteed unchanged. The transparent variants wrap
/// infrastructure failures at the relay and generator boundaries.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Duplicate vote: {0}")]
    DuplicateVote(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn duplicate_vote(msg: impl Into<String>) -> Self {
        Self::DuplicateVote(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedInput(msg.into())
    }
}
