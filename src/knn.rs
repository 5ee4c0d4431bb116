//! k-nearest-neighbour classifier.

use std::sync::Arc;

use tracing::debug;

use crate::{
    attribute::Attributes,
    classifier::Classifier,
    dataset::{Dataset, Frequency},
    error::{Error, Result},
    example::Example
};

/// # Overview
///
/// Lazy learner that votes among the `k` closest training examples.
///
/// Distance is Euclidean over the non-class attributes: numeric attributes
/// contribute their squared difference, nominal attributes contribute 1 when
/// the values differ. On a tied vote the class whose member is nearest wins.
#[derive(Debug, Clone)]
pub struct NearestNeighbor {
    k:          usize,
    memory:     Vec<Example>,
    attributes: Option<Arc<Attributes>>
}

impl NearestNeighbor {
    /// # Overview
    ///
    /// Creates a k-NN classifier.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when `k` is zero.
    pub fn new(k: usize) -> Result<Self> {
        if k == 0 {
            return Err(Error::invalid("k", "at least one neighbour is required"));
        }
        Ok(Self {
            k,
            memory: Vec::new(),
            attributes: None
        })
    }

    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Distance between two examples over the non-class attributes.
    pub fn distance(attributes: &Attributes, a: &Example, b: &Example) -> f64 {
        let class_index = attributes.class_index();
        attributes
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != class_index)
            .map(|(i, attribute)| {
                if attribute.is_numeric() {
                    (a[i] - b[i]).powi(2)
                } else if a[i] != b[i] {
                    1.0
                } else {
                    0.0
                }
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Class values of the `k` nearest training examples, nearest first.
    fn neighbours(&self, attributes: &Attributes, example: &Example) -> Vec<f64> {
        let class_index = attributes.class_index();
        let mut scored: Vec<(f64, f64)> = self
            .memory
            .iter()
            .map(|e| (Self::distance(attributes, example, e), e[class_index]))
            .collect();
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.into_iter().take(self.k).map(|(_, class)| class).collect()
    }
}

impl Classifier for NearestNeighbor {
    fn name(&self) -> &str {
        "kNN"
    }

    fn train(&mut self, dataset: &Dataset) -> Result<()> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        self.memory = dataset.examples().to_vec();
        self.attributes = Some(dataset.shared_attributes());
        debug!(k = self.k, examples = self.memory.len(), "stored training examples");
        Ok(())
    }

    fn classify(&self, example: &Example) -> Result<f64> {
        let attributes = self.attributes.as_ref().ok_or(Error::NotTrained)?;
        if example.len() != attributes.len() {
            return Err(Error::DimensionMismatch {
                expected: attributes.len(),
                got:      example.len()
            });
        }
        Frequency::from_values(self.neighbours(attributes, example))
            .mode()
            .ok_or(Error::NotTrained)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: &str = "@dataset points
@attribute x numeric
@attribute colour red blue
@attribute y a b
@examples
0.0 red a
0.1 red a
0.2 blue a
5.0 blue b
5.1 blue b
5.2 red b";

    #[test]
    fn rejects_zero_k() {
        assert!(NearestNeighbor::new(0).is_err());
    }

    #[test]
    fn distance_mixes_numeric_and_nominal() {
        let ds: Dataset = POINTS.parse().unwrap();
        let a = &ds.examples()[0];
        let b = &ds.examples()[3];
        let d = NearestNeighbor::distance(ds.attributes(), a, b);

        assert!((d - (25.0f64 + 1.0).sqrt()).abs() < 1e-12);
        assert_eq!(NearestNeighbor::distance(ds.attributes(), a, a), 0.0);
    }

    #[test]
    fn classifies_by_majority_of_neighbours() {
        let ds: Dataset = POINTS.parse().unwrap();
        let mut knn = NearestNeighbor::new(3).unwrap();
        knn.train(&ds).unwrap();

        assert_eq!(knn.accuracy(&ds).unwrap(), 1.0);
        assert_eq!(knn.classify(&Example::new(vec![4.0, 0.0, 0.0])).unwrap(), 1.0);
    }

    #[test]
    fn tie_goes_to_nearest() {
        let ds: Dataset = POINTS.parse().unwrap();
        let mut knn = NearestNeighbor::new(2).unwrap();
        knn.train(&ds.subset(&[0, 3])).unwrap();

        assert_eq!(knn.classify(&Example::new(vec![1.0, 0.0, 0.0])).unwrap(), 0.0);
    }

    #[test]
    fn classify_before_train_fails() {
        let knn = NearestNeighbor::new(1).unwrap();
        assert!(matches!(
            knn.classify(&Example::new(vec![0.0, 0.0, 0.0])),
            Err(Error::NotTrained)
        ));
    }
}
