//! Configuration and builder for the backpropagation network.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// # Overview
///
/// Hyperparameters of a [`NeuralNetwork`](crate::NeuralNetwork).
///
/// Training stops once the summed squared error of an epoch drops to
/// `max_error`. Without `max_epochs` an unreachable threshold never stops.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[must_use]
pub struct Config {
    pub learning_rate: f64,
    pub hidden:        usize,
    pub max_error:     f64,
    pub max_epochs:    Option<usize>,
    pub seed:          Option<u64>
}

impl Default for Config {
    fn default() -> Self {
        Self {
            learning_rate: 0.01,
            hidden:        5,
            max_error:     0.3,
            max_epochs:    None,
            seed:          None
        }
    }
}

impl Config {
    /// # Overview
    ///
    /// Creates a new ConfigBuilder.
    #[inline]
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// # Overview
    ///
    /// Validates configuration parameters.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::invalid(
                "learning_rate",
                format!("must be positive, got {}", self.learning_rate)
            ));
        }
        if self.hidden == 0 {
            return Err(Error::invalid("hidden", "at least one hidden unit is required"));
        }
        if !(self.max_error.is_finite() && self.max_error >= 0.0) {
            return Err(Error::invalid(
                "max_error",
                format!("must be non-negative, got {}", self.max_error)
            ));
        }
        if self.max_epochs == Some(0) {
            return Err(Error::invalid("max_epochs", "must be at least 1"));
        }
        Ok(())
    }
}

/// # Overview
///
/// Builder for Config with validation.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    learning_rate: Option<f64>,
    hidden:        Option<usize>,
    max_error:     Option<f64>,
    max_epochs:    Option<usize>,
    seed:          Option<u64>
}

impl ConfigBuilder {
    /// # Overview
    ///
    /// Sets the learning rate (default: 0.01).
    pub fn learning_rate(mut self, n: f64) -> Self {
        self.learning_rate = Some(n);
        self
    }

    /// # Overview
    ///
    /// Sets the number of hidden units (default: 5).
    pub fn hidden(mut self, j: usize) -> Self {
        self.hidden = Some(j);
        self
    }

    /// # Overview
    ///
    /// Sets the epoch error at which training stops (default: 0.3).
    pub fn max_error(mut self, error: f64) -> Self {
        self.max_error = Some(error);
        self
    }

    /// # Overview
    ///
    /// Caps the number of epochs; hitting the cap fails training with
    /// `DidNotConverge`.
    pub fn max_epochs(mut self, epochs: usize) -> Self {
        self.max_epochs = Some(epochs);
        self
    }

    /// # Overview
    ///
    /// Seeds weight initialization and epoch shuffling.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// # Overview
    ///
    /// Builds and validates the Config.
    pub fn build(self) -> Result<Config> {
        let defaults = Config::default();
        let config = Config {
            learning_rate: self.learning_rate.unwrap_or(defaults.learning_rate),
            hidden:        self.hidden.unwrap_or(defaults.hidden),
            max_error:     self.max_error.unwrap_or(defaults.max_error),
            max_epochs:    self.max_epochs,
            seed:          self.seed
        };
        config.validate()?;
        Ok(config)
    }
}
