//! Whole-dataset transforms.
//!
//! Every transform builds a new attribute collection and new examples from
//! the old ones; the source dataset is left untouched.

use std::sync::Arc;

use tracing::debug;

use super::Dataset;
use crate::{
    attribute::Attributes,
    error::{Error, Result},
    example::Example
};

/// # Overview
///
/// Z-score parameters fitted on one dataset and applied to any dataset over
/// the same attributes.
///
/// Fitting on a training set and applying to both training and test sets
/// gives a raw value the same encoding on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardizer {
    attributes: Arc<Attributes>,
    columns:    Vec<Option<(f64, f64)>>
}

impl Standardizer {
    /// Mean and population deviation of every numeric non-class column.
    pub fn fit(dataset: &Dataset) -> Self {
        let class_index = dataset.class_index();
        let columns = dataset
            .attributes
            .iter()
            .enumerate()
            .map(|(i, a)| {
                (i != class_index && a.is_numeric()).then(|| (dataset.mean(i), dataset.std_dev(i)))
            })
            .collect();
        Self {
            attributes: dataset.shared_attributes(),
            columns
        }
    }

    /// Fitted `(mean, std_dev)` of a column; `None` for columns left as is.
    pub fn column(&self, index: usize) -> Option<(f64, f64)> {
        self.columns.get(index).copied().flatten()
    }

    /// # Overview
    ///
    /// Standardizes `dataset` with the fitted parameters. A column with zero
    /// fitted deviation is only centred.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `dataset` has different attributes from the
    /// fitted one.
    pub fn apply(&self, dataset: &Dataset) -> Result<Dataset> {
        if *dataset.attributes != *self.attributes {
            return Err(Error::invalid("dataset", "attributes differ from the fitted dataset"));
        }
        Ok(self.transform(dataset))
    }

    fn transform(&self, dataset: &Dataset) -> Dataset {
        let examples = dataset
            .examples
            .iter()
            .map(|e| {
                let values = e
                    .values()
                    .iter()
                    .zip(&self.columns)
                    .map(|(&v, stat)| match *stat {
                        Some((mean, sd)) if sd > 0.0 => (v - mean) / sd,
                        Some((mean, _)) => v - mean,
                        None => v
                    })
                    .collect();
                Example::new(values)
            })
            .collect();

        debug!(
            columns = self.columns.iter().filter(|s| s.is_some()).count(),
            examples = dataset.len(),
            "standardized numeric columns"
        );
        Dataset {
            name: dataset.name.clone(),
            attributes: dataset.shared_attributes(),
            examples
        }
    }
}

impl Dataset {
    /// # Overview
    ///
    /// Z-score standardizes every numeric non-class column with this
    /// dataset's own statistics.
    ///
    /// A constant column has zero deviation; it is only centred. Use
    /// [`Standardizer`] to encode a test set with training statistics.
    #[must_use]
    pub fn standardize(&self) -> Dataset {
        Standardizer::fit(self).transform(self)
    }

    /// # Overview
    ///
    /// Replaces every non-class nominal attribute with more than two values
    /// by one binary attribute per value.
    ///
    /// For each example exactly one of the new columns is 1.0, the one
    /// matching its original value.
    #[must_use]
    pub fn binarize(&self) -> Dataset {
        let class_index = self.class_index();
        let expand: Vec<bool> = self
            .attributes
            .iter()
            .enumerate()
            .map(|(i, a)| i != class_index && a.is_nominal() && a.domain_size() > 2)
            .collect();

        let attributes: Attributes = self
            .attributes
            .iter()
            .zip(&expand)
            .flat_map(|(a, &split)| if split { a.split_into_binary() } else { vec![a.clone()] })
            .collect();

        let examples = self
            .examples
            .iter()
            .map(|e| {
                let mut values = Vec::with_capacity(attributes.len());
                for (i, &v) in e.values().iter().enumerate() {
                    if expand[i] {
                        let width = self.attributes[i].domain_size();
                        values.extend((0..width).map(|k| if v == k as f64 { 1.0 } else { 0.0 }));
                    } else {
                        values.push(v);
                    }
                }
                Example::new(values)
            })
            .collect();

        debug!(
            before = self.attributes.len(),
            after = attributes.len(),
            "binarized nominal attributes"
        );
        Dataset {
            name: self.name.clone(),
            attributes: Arc::new(attributes),
            examples
        }
    }

    /// Standardizes numeric columns, then binarizes nominal ones.
    #[must_use]
    pub fn normalize(&self) -> Dataset {
        self.standardize().binarize()
    }
}
