//! Error types for datasets, learners and evaluation.

use thiserror::Error;

/// # Overview
///
/// Errors that can occur when loading data, training a classifier or running
/// an evaluation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("classifier has not been trained")]
    NotTrained,

    #[error("dataset cannot be empty")]
    EmptyDataset,

    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("network did not converge after {epochs} epochs (error {error:.6})")]
    DidNotConverge { epochs: usize, error: f64 },

    #[error("fold {fold} is empty")]
    EmptyFold { fold: usize },

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error)
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into()
        }
    }

    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into()
        }
    }
}

/// # Overview
///
/// Result type for learnkit operations.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            Error::parse(3, "unknown value 'x'").to_string(),
            "line 3: unknown value 'x'"
        );
        assert_eq!(
            Error::DimensionMismatch {
                expected: 4,
                got:      3
            }
            .to_string(),
            "dimension mismatch: expected 4, got 3"
        );
        assert_eq!(Error::EmptyFold { fold: 2 }.to_string(), "fold 2 is empty");
    }

    #[test]
    fn io_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
