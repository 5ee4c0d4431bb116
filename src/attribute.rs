//! Attribute descriptors and the ordered attribute collection.

use core::{fmt, ops::Index};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// # Overview
///
/// Legal values of an attribute.
///
/// Nominal values are stored in declaration order; an example encodes a
/// nominal value as its index into this list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Domain {
    Nominal(Vec<String>),
    Numeric
}

/// # Overview
///
/// A named feature and its domain.
///
/// # Examples
///
/// ```
/// use learnkit::Attribute;
///
/// let outlook = Attribute::nominal("outlook", ["sunny", "overcast", "rain", "sunny"]);
/// assert_eq!(outlook.domain_size(), 3);
/// assert_eq!(outlook.index_of("rain"), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    name:   String,
    domain: Domain
}

impl Attribute {
    /// # Overview
    ///
    /// Creates a nominal attribute. Duplicate values are dropped, keeping the
    /// first occurrence.
    pub fn nominal<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>
    {
        let mut attribute = Self {
            name:   name.into(),
            domain: Domain::Nominal(Vec::new())
        };
        for value in values {
            let _ = attribute.add_value(value);
        }
        attribute
    }

    /// # Overview
    ///
    /// Creates a numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            domain: Domain::Numeric
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[inline]
    pub fn is_nominal(&self) -> bool {
        matches!(self.domain, Domain::Nominal(_))
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self.domain, Domain::Numeric)
    }

    /// Nominal values in index order; empty for numeric attributes.
    pub fn values(&self) -> &[String] {
        match &self.domain {
            Domain::Nominal(values) => values,
            Domain::Numeric => &[]
        }
    }

    /// Number of nominal values; 0 for numeric attributes.
    #[inline]
    pub fn domain_size(&self) -> usize {
        self.values().len()
    }

    /// # Overview
    ///
    /// Appends a value to a nominal domain and returns its index. A value
    /// already present keeps its original index.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the attribute is numeric.
    pub fn add_value(&mut self, value: impl Into<String>) -> Result<usize> {
        let value = value.into();
        match &mut self.domain {
            Domain::Nominal(values) => match values.iter().position(|v| *v == value) {
                Some(index) => Ok(index),
                None => {
                    values.push(value);
                    Ok(values.len() - 1)
                }
            },
            Domain::Numeric => Err(Error::invalid(
                "value",
                format!("numeric attribute '{}' has no nominal domain", self.name)
            ))
        }
    }

    /// Index of a nominal value.
    pub fn index_of(&self, value: &str) -> Option<usize> {
        self.values().iter().position(|v| v == value)
    }

    /// Nominal value at an index.
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values().get(index).map(String::as_str)
    }

    /// # Overview
    ///
    /// Expands a nominal attribute into one binary attribute per value.
    ///
    /// Each binary attribute is named `name=value` with domain `{0, 1}`, so its
    /// encoded value is 0.0 or 1.0. Numeric attributes and nominal attributes
    /// with fewer than two values are returned unchanged.
    pub fn split_into_binary(&self) -> Vec<Attribute> {
        if self.domain_size() < 2 {
            return vec![self.clone()];
        }
        self.values()
            .iter()
            .map(|value| Attribute::nominal(format!("{}={}", self.name, value), ["0", "1"]))
            .collect()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@attribute {}", self.name)?;
        match &self.domain {
            Domain::Numeric => write!(f, " numeric"),
            Domain::Nominal(values) => {
                for value in values {
                    write!(f, " {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// # Overview
///
/// Ordered attribute collection. The last attribute is the class attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attributes {
    attributes: Vec<Attribute>
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Attribute> {
        self.attributes.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// # Overview
    ///
    /// Index of the class attribute (the last one).
    ///
    /// A collection is never handed to a dataset empty, so this is always a
    /// valid index there.
    #[inline]
    pub fn class_index(&self) -> usize {
        self.attributes.len().saturating_sub(1)
    }

    pub fn class_attribute(&self) -> Option<&Attribute> {
        self.attributes.last()
    }

    /// Position of the attribute with the given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name == name)
    }

    pub fn has_nominal(&self) -> bool {
        self.attributes.iter().any(Attribute::is_nominal)
    }

    pub fn has_numeric(&self) -> bool {
        self.attributes.iter().any(Attribute::is_numeric)
    }
}

impl From<Vec<Attribute>> for Attributes {
    fn from(attributes: Vec<Attribute>) -> Self {
        Self {
            attributes
        }
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect()
        }
    }
}

impl Index<usize> for Attributes {
    type Output = Attribute;

    fn index(&self, index: usize) -> &Attribute {
        &self.attributes[index]
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = core::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl fmt::Display for Attributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for attribute in &self.attributes {
            writeln!(f, "{attribute}")?;
        }
        Ok(())
    }
}
