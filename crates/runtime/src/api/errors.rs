//! Unified error types surfaced by the arena API.
//!
//! Wraps failures from the worker, the stores, and the rule layer so clients
//! can bubble them up with consistent context, and classifies each into a
//! transport-agnostic [`ErrorKind`].

use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::repository::RepositoryError;
use crate::types::MatchId;

use arena_core::ProgressionError;

pub type Result<T> = std::result::Result<T, ArenaError>;

#[derive(Debug, Error)]
pub enum ArenaError {
    #[error("caller identity is missing or invalid")]
    Unauthenticated,

    #[error("user is banned")]
    Banned,

    #[error("unknown stat name: {0}")]
    UnknownStat(String),

    #[error("match {0} not found")]
    MatchNotFound(MatchId),

    #[error("no energy left to enter a battle")]
    NoEnergy,

    #[error("no skill points available to spend")]
    NoSkillPoints,

    #[error("no crate keys left to open")]
    NoKeys,

    #[error("arena worker command channel closed")]
    CommandChannelClosed,

    #[error("arena worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("arena worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ProgressionError> for ArenaError {
    fn from(error: ProgressionError) -> Self {
        match error {
            ProgressionError::NoSkillPoints => ArenaError::NoSkillPoints,
        }
    }
}

/// Coarse classification for mapping errors onto a transport.
///
/// Note what is *absent*: a malformed move choice never errors (it falls
/// back to the default move), and re-resolving a settled match returns the
/// stored outcome instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No usable caller identity.
    Unauthenticated,
    /// The request itself is malformed.
    InvalidArgument,
    /// The referenced entity does not exist (or isn't the caller's).
    NotFound,
    /// The caller's state forbids the operation right now.
    PreconditionFailed,
    /// Plumbing failure; nothing the caller did.
    Internal,
}

impl ArenaError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArenaError::Unauthenticated => ErrorKind::Unauthenticated,
            ArenaError::UnknownStat(_) => ErrorKind::InvalidArgument,
            ArenaError::MatchNotFound(_) => ErrorKind::NotFound,
            ArenaError::Banned
            | ArenaError::NoEnergy
            | ArenaError::NoSkillPoints
            | ArenaError::NoKeys => ErrorKind::PreconditionFailed,
            ArenaError::CommandChannelClosed
            | ArenaError::ReplyChannelClosed(_)
            | ArenaError::WorkerJoin(_)
            | ArenaError::Repository(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_the_taxonomy() {
        assert_eq!(ArenaError::Unauthenticated.kind(), ErrorKind::Unauthenticated);
        assert_eq!(
            ArenaError::UnknownStat("luck".into()).kind(),
            ErrorKind::InvalidArgument
        );
        assert_eq!(
            ArenaError::MatchNotFound(MatchId(1)).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(ArenaError::NoEnergy.kind(), ErrorKind::PreconditionFailed);
        assert_eq!(ArenaError::NoKeys.kind(), ErrorKind::PreconditionFailed);
    }
}
