//! A single encoded example.

use core::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// # Overview
///
/// Encoded attribute values in attribute order, class value last.
///
/// Numeric values are stored as is; nominal values are the index of the value
/// in the attribute's domain.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Example {
    values: Vec<f64>
}

impl Example {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values
        }
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Class value (the last element).
    #[inline]
    pub fn class_value(&self) -> Option<f64> {
        self.values.last().copied()
    }

    /// Values without the trailing class value.
    #[inline]
    pub fn features(&self) -> &[f64] {
        &self.values[..self.values.len().saturating_sub(1)]
    }
}

impl Index<usize> for Example {
    type Output = f64;

    #[inline]
    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_value_is_last() {
        let e = Example::new(vec![1.0, 2.0, 0.0]);
        assert_eq!(e.class_value(), Some(0.0));
        assert_eq!(e.features(), &[1.0, 2.0]);
        assert_eq!(e[1], 2.0);
    }

    #[test]
    fn empty_example() {
        let e = Example::default();
        assert!(e.is_empty());
        assert_eq!(e.class_value(), None);
        assert!(e.features().is_empty());
    }
}
