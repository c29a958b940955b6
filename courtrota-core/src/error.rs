//! Error types for the scheduling engine

use thiserror::Error;

use crate::types::Mode;

/// Result type for scheduling operations
pub type Result<T> = std::result::Result<T, SchedulerError>;

/// Scheduling errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    /// Roster too small to fill a single court
    #[error("Not enough entries for {mode}: need at least {required}, found {found}")]
    InsufficientRoster {
        mode: Mode,
        required: usize,
        found: usize,
    },

    /// A solver ran out of candidates without covering every entry
    #[error("No feasible partition of {count} entries")]
    NoFeasiblePartition { count: usize },

    /// Two roster entries share the same identifier
    #[error("Duplicate roster entry: {0}")]
    DuplicateIdentifier(String),

    /// Score text that is neither empty nor a non-negative integer
    #[error("Malformed score: {0:?}")]
    MalformedScore(String),

    /// Court count of zero
    #[error("Invalid court count: {0}")]
    InvalidCourtCount(usize),

    /// Score entry addressed to a match that does not exist
    #[error("No match on court {court} in round {round}")]
    UnknownCourt { round: usize, court: usize },

    /// Rounds are generated on demand only in rotating-doubles mode
    #[error("Fixed-team schedules are generated up front")]
    FixedSchedule,

    /// Persisted record that cannot be restored
    #[error("Invalid tournament record: {0}")]
    InvalidRecord(String),
}
