//! The contract shared by every learner.

use crate::{
    dataset::Dataset,
    error::{Error, Result},
    example::Example
};

/// Unified interface for all classifiers.
///
/// The evaluator only ever talks to a learner through this trait, so any
/// implementation can be cross-validated, including test doubles.
///
/// # Example
///
/// ```
/// use learnkit::{Classifier, Dataset, DecisionTree};
///
/// let data: Dataset = "@dataset and
/// @attribute a 0 1
/// @attribute b 0 1
/// @attribute y 0 1
/// @examples
/// 0 0 0
/// 0 1 0
/// 1 0 0
/// 1 1 1"
///     .parse()
///     .unwrap();
///
/// let mut tree = DecisionTree::new();
/// tree.train(&data).unwrap();
/// assert_eq!(tree.accuracy(&data).unwrap(), 1.0);
/// ```
pub trait Classifier {
    /// Short model name used in reports and logs.
    fn name(&self) -> &str;

    /// Learns from `dataset`, discarding anything learned before.
    fn train(&mut self, dataset: &Dataset) -> Result<()>;

    /// Predicts the class value of a single example.
    ///
    /// The example carries a value for every attribute; its class slot is
    /// ignored.
    fn classify(&self, example: &Example) -> Result<f64>;

    /// Batch prediction for every example of a dataset.
    fn classify_all(&self, dataset: &Dataset) -> Result<Vec<f64>> {
        dataset.iter().map(|e| self.classify(e)).collect()
    }

    /// Number of examples whose prediction differs from their class value.
    fn misclassified(&self, dataset: &Dataset) -> Result<usize> {
        let class_index = dataset.class_index();
        let mut errors = 0;
        for example in dataset {
            if self.classify(example)? != example[class_index] {
                errors += 1;
            }
        }
        Ok(errors)
    }

    /// Fraction of correctly classified examples.
    ///
    /// # Errors
    ///
    /// `EmptyDataset` when there is nothing to score.
    fn accuracy(&self, dataset: &Dataset) -> Result<f64> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let n = dataset.len();
        Ok((n - self.misclassified(dataset)?) as f64 / n as f64)
    }
}
