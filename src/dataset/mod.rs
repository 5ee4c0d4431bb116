//! Dataset: a shared attribute collection plus owned encoded examples.
//!
//! Submodules add column statistics and ID3 helpers (`stats`), whole-dataset
//! transforms (`transform`) and the text format reader/writer (`parse`).

mod parse;
mod stats;
mod transform;


use std::sync::Arc;

pub use parse::TrainTestSets;
pub use stats::Frequency;
pub use transform::Standardizer;

use crate::{
    attribute::{Attribute, Attributes},
    error::{Error, Result},
    example::Example
};

/// # Overview
///
/// Attributes and the examples encoded against them.
///
/// The attribute collection sits behind an [`Arc`] so subsets produced by
/// splitting or fold construction share it read-only. Every example has
/// exactly one value per attribute.
///
/// # Examples
///
/// ```
/// use learnkit::{Attribute, Attributes, Dataset, Example};
///
/// let attributes: Attributes = vec![
///     Attribute::numeric("x"),
///     Attribute::nominal("class", ["no", "yes"]),
/// ]
/// .into();
///
/// let mut dataset = Dataset::new(attributes).unwrap();
/// dataset.push(Example::new(vec![0.5, 1.0])).unwrap();
///
/// assert_eq!(dataset.len(), 1);
/// assert_eq!(dataset.class_index(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    name:       Option<String>,
    attributes: Arc<Attributes>,
    examples:   Vec<Example>
}

impl Dataset {
    /// # Overview
    ///
    /// Creates an empty dataset over the given attributes.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if there are no attributes.
    pub fn new(attributes: Attributes) -> Result<Self> {
        Self::with_examples(Arc::new(attributes), Vec::new())
    }

    /// # Overview
    ///
    /// Creates a dataset over shared attributes.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if there are no attributes, `DimensionMismatch` if
    /// an example does not have one value per attribute.
    pub fn with_examples(attributes: Arc<Attributes>, examples: Vec<Example>) -> Result<Self> {
        if attributes.is_empty() {
            return Err(Error::invalid("attributes", "at least one attribute is required"));
        }
        if let Some(bad) = examples.iter().find(|e| e.len() != attributes.len()) {
            return Err(Error::DimensionMismatch {
                expected: attributes.len(),
                got:      bad.len()
            });
        }
        Ok(Self {
            name: None,
            attributes,
            examples
        })
    }

    /// Sets the dataset name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[inline]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Another handle to the shared attribute collection.
    #[inline]
    pub fn shared_attributes(&self) -> Arc<Attributes> {
        Arc::clone(&self.attributes)
    }

    #[inline]
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    #[inline]
    pub fn class_index(&self) -> usize {
        self.attributes.class_index()
    }

    #[inline]
    pub fn class_attribute(&self) -> &Attribute {
        &self.attributes[self.class_index()]
    }

    #[inline]
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Example> {
        self.examples.iter()
    }

    /// Class value of the example at `index`.
    pub fn class_value_at(&self, index: usize) -> Option<f64> {
        self.examples.get(index).map(|e| e[self.class_index()])
    }

    /// # Overview
    ///
    /// Appends an example.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the example length differs from the attribute
    /// count.
    pub fn push(&mut self, example: Example) -> Result<()> {
        self.check_dimension(&example)?;
        self.examples.push(example);
        Ok(())
    }

    /// # Overview
    ///
    /// New dataset with copies of the examples at `indices`, sharing this
    /// dataset's attributes.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            name:       self.name.clone(),
            attributes: self.shared_attributes(),
            examples:   indices.iter().map(|&i| self.examples[i].clone()).collect()
        }
    }

    /// Checks that an example has one value per attribute.
    pub fn check_dimension(&self, example: &Example) -> Result<()> {
        if example.len() != self.attributes.len() {
            return Err(Error::DimensionMismatch {
                expected: self.attributes.len(),
                got:      example.len()
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Example;
    type IntoIter = core::slice::Iter<'a, Example>;

    fn into_iter(self) -> Self::IntoIter {
        self.examples.iter()
    }
}
