//! Training summaries.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of training a network.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FitResult {
    /// Number of epochs actually run.
    pub epochs_run:    usize,
    /// Number of single-example weight updates.
    pub presentations: usize,
    /// Summed squared error of the last epoch.
    pub final_error:   f64,
    /// Error per epoch.
    pub history:       Vec<f64>
}

impl FitResult {
    /// Creates FitResult with error history.
    #[must_use]
    pub fn with_history(epochs_run: usize, presentations: usize, history: Vec<f64>) -> Self {
        Self {
            epochs_run,
            presentations,
            final_error: history.last().copied().unwrap_or(0.0),
            history
        }
    }

    /// True when the last epoch improved on the first.
    pub fn improved(&self) -> bool {
        match (self.history.first(), self.history.last()) {
            (Some(first), Some(last)) => last < first,
            _ => false
        }
    }
}
