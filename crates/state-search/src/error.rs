//! Error type shared by the domain models and the catalog lookups.
//!
//! Search failures are not errors: a search that finds nothing returns a
//! `SearchResult` with `found == false`.

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid state: {reason}")]
    InvalidState { reason: String },
    #[error("invalid puzzle configuration: {0}")]
    InvalidLayout(String),
    #[error("unknown direction '{0}'")]
    UnknownDirection(String),
    #[error("unknown heuristic '{0}'")]
    UnknownHeuristic(String),
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}

impl Error {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Error::InvalidState {
            reason: reason.into(),
        }
    }
}
