//! Error types for Randomych

use thiserror::Error;

/// Core error type
///
/// Every variant except `Io` / `Serialization` is a caller contract violation:
/// it aborts the current session and is never retried.
#[derive(Error, Debug)]
pub enum RrError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Invalid transition: cannot {action} while {state}")]
    InvalidTransition { action: String, state: String },

    #[error("Invalid spin count: {0}")]
    InvalidSpinCount(usize),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RrError {
    /// Is this a collaborator contract violation (as opposed to an I/O failure)?
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput(_) | Self::InvalidTransition { .. } | Self::InvalidSpinCount(_)
        )
    }
}

/// Result type alias
pub type RrResult<T> = Result<T, RrError>;
