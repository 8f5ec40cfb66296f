//! Error types shared by the container, config and grid layers.

use std::path::PathBuf;

use thiserror::Error;

/// Failure taxonomy for every fallible `satchel` operation.
///
/// `InvalidArgument`, `InvalidState` and `CapacityExceeded` are caller bugs and are
/// never retried. `PersistenceFailure` on the config store is fatal for the
/// process (see [`crate::config::ConfigStore::open_or_exit`]).
#[derive(Error, Debug)]
pub enum SatchelError {
    /// A required value was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The operation is not allowed in the current state (actor offline, view reopened).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// An explicit write tried to store more occupied slots than the tier holds.
    #[error("Capacity exceeded: {occupied} occupied slots, capacity is {capacity}")]
    CapacityExceeded {
        /// Occupied entries in the rejected write.
        occupied: usize,
        /// Slot count of the current tier.
        capacity: usize,
    },

    /// Reading or writing durable state failed.
    #[error("Persistence failure at {}: {reason}", path.display())]
    PersistenceFailure {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying error text.
        reason: String,
    },
}

impl SatchelError {
    /// What: Shorthand for building an [`SatchelError::InvalidArgument`].
    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// What: Shorthand for building an [`SatchelError::InvalidState`].
    pub(crate) fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// What: Wrap an I/O or serialization failure for `path`.
    pub(crate) fn persistence(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::PersistenceFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SatchelError>;
