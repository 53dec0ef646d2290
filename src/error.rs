use thiserror::Error;

use crate::quiz::{Operation, Phase};

/// Errors raised by the question pool and the session controller
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The configuration asks for more questions than the table can supply
    #[error("cannot draw {requested} questions from a table of {available}")]
    InsufficientData { requested: usize, available: usize },
    /// An operation was invoked in a state that does not allow it.
    /// Callers treat this as a no-op; the session is left untouched.
    #[error("{op} is not allowed while {phase}")]
    InvalidStateTransition { op: Operation, phase: Phase },
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_message() {
        let err = Error::InsufficientData {
            requested: 20,
            available: 15,
        };
        assert_eq!(
            err.to_string(),
            "cannot draw 20 questions from a table of 15"
        );
    }

    #[test]
    fn invalid_transition_message() {
        let err = Error::InvalidStateTransition {
            op: Operation::Submit,
            phase: Phase::Revealed,
        };
        assert_eq!(err.to_string(), "submit is not allowed while revealed");
    }
}
