//! Column statistics and the information-theoretic helpers used by ID3.

use super::Dataset;
use crate::{
    error::{Error, Result},
    example::Example,
    utils
};

/// # Overview
///
/// Value counts of one column, in first-seen order.
///
/// Insertion order matters: [`Frequency::mode`] breaks ties in favour of the
/// value that was seen first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frequency {
    counts: Vec<(f64, usize)>
}

impl Frequency {
    /// Counts values from an iterator.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut frequency = Self::default();
        for value in values {
            frequency.add(value);
        }
        frequency
    }

    pub fn add(&mut self, value: f64) {
        match self.counts.iter_mut().find(|(v, _)| *v == value) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((value, 1))
        }
    }

    /// Number of distinct values.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of counted values.
    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, c)| c).sum()
    }

    pub fn count(&self, value: f64) -> usize {
        self.counts
            .iter()
            .find(|(v, _)| *v == value)
            .map_or(0, |(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.counts.iter().copied()
    }

    /// # Overview
    ///
    /// Most frequent value; the first to reach the maximum count wins.
    pub fn mode(&self) -> Option<f64> {
        let mut best: Option<(f64, usize)> = None;
        for &(value, count) in &self.counts {
            if best.is_none_or(|(_, c)| count > c) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }

    /// # Overview
    ///
    /// Shannon entropy of the distribution, in bits.
    pub fn entropy(&self) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }
        self.counts
            .iter()
            .map(|&(_, count)| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum()
    }
}

impl Dataset {
    /// Values of one column.
    pub fn column(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.examples.iter().map(move |e| e[index])
    }

    /// Mean of a column; 0.0 for an empty dataset.
    pub fn mean(&self, index: usize) -> f64 {
        utils::mean(&self.column(index).collect::<Vec<_>>())
    }

    /// Population standard deviation of a column.
    pub fn std_dev(&self, index: usize) -> f64 {
        utils::std_dev(&self.column(index).collect::<Vec<_>>())
    }

    /// Value counts of a column.
    pub fn frequency(&self, index: usize) -> Frequency {
        Frequency::from_values(self.column(index))
    }

    /// Value counts of the class column.
    pub fn class_frequency(&self) -> Frequency {
        self.frequency(self.class_index())
    }

    /// True when every example has the same class value.
    pub fn is_homogeneous(&self) -> bool {
        self.class_frequency().len() == 1
    }

    /// Most frequent class value; `None` for an empty dataset.
    pub fn majority_class(&self) -> Option<f64> {
        self.class_frequency().mode()
    }

    /// Entropy of the values of a column over this dataset.
    pub fn entropy(&self, index: usize) -> f64 {
        self.frequency(index).entropy()
    }

    /// Entropy of the class column.
    pub fn class_entropy(&self) -> f64 {
        self.entropy(self.class_index())
    }

    /// # Overview
    ///
    /// Information gain of splitting on `index`:
    /// `H(class) - sum_v P(v) * H(class | attribute = v)`.
    ///
    /// Clamped at zero to absorb rounding.
    pub fn info_gain(&self, index: usize) -> f64 {
        let n = self.len() as f64;
        if n == 0.0 {
            return 0.0;
        }
        let class_index = self.class_index();
        let remainder: f64 = self
            .frequency(index)
            .iter()
            .map(|(value, count)| {
                let subset = self
                    .examples
                    .iter()
                    .filter(|e| e[index] == value)
                    .map(|e| e[class_index]);
                (count as f64 / n) * Frequency::from_values(subset).entropy()
            })
            .sum();
        (self.class_entropy() - remainder).max(0.0)
    }

    /// Non-class nominal attributes, in index order.
    pub fn split_candidates(&self) -> Vec<usize> {
        let class_index = self.class_index();
        self.attributes
            .iter()
            .enumerate()
            .filter(|&(i, a)| i != class_index && a.is_nominal())
            .map(|(i, _)| i)
            .collect()
    }

    /// # Overview
    ///
    /// Candidate with the highest information gain; ties go to the lowest
    /// attribute index.
    pub fn best_split_among(&self, candidates: &[usize]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &index in candidates {
            let gain = self.info_gain(index);
            let better = match best {
                None => true,
                Some((best_index, best_gain)) => {
                    gain > best_gain || (gain == best_gain && index < best_index)
                }
            };
            if better {
                best = Some((index, gain));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Best split over every non-class nominal attribute.
    pub fn best_split_attribute(&self) -> Option<usize> {
        self.best_split_among(&self.split_candidates())
    }

    /// # Overview
    ///
    /// Partitions the examples by the value of a nominal attribute.
    ///
    /// Returns one `(value, subset)` pair per domain value, in domain order.
    /// Values with no matching examples yield an empty subset. Subsets share
    /// this dataset's attributes.
    ///
    /// # Errors
    ///
    /// `EmptyDataset` when there is nothing to split, `InvalidParameter` when
    /// `index` is the class, out of range or numeric.
    pub fn split_on_attribute(&self, index: usize) -> Result<Vec<(f64, Dataset)>> {
        if self.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let attribute = self
            .attribute(index)
            .filter(|_| index != self.class_index())
            .ok_or_else(|| Error::invalid("attribute", format!("{index} is not a split candidate")))?;
        if !attribute.is_nominal() {
            return Err(Error::invalid(
                "attribute",
                format!("'{}' is numeric", attribute.name())
            ));
        }

        let mut partitions: Vec<Vec<Example>> = vec![Vec::new(); attribute.domain_size()];
        for example in &self.examples {
            let slot = example[index];
            if slot >= 0.0 && (slot as usize) < partitions.len() && slot.fract() == 0.0 {
                partitions[slot as usize].push(example.clone());
            }
        }

        Ok(partitions
            .into_iter()
            .enumerate()
            .map(|(value, examples)| {
                let subset = Dataset {
                    name: self.name.clone(),
                    attributes: self.shared_attributes(),
                    examples
                };
                (value as f64, subset)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_prefers_first_seen_on_tie() {
        let f = Frequency::from_values([2.0, 1.0, 1.0, 2.0, 3.0]);
        assert_eq!(f.mode(), Some(2.0));
        assert_eq!(f.count(1.0), 2);
        assert_eq!(f.total(), 5);
    }

    #[test]
    fn entropy_of_fair_coin_is_one_bit() {
        let f = Frequency::from_values([0.0, 1.0, 0.0, 1.0]);
        assert!((f.entropy() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn entropy_of_single_value_is_zero() {
        let f = Frequency::from_values([4.0, 4.0, 4.0]);
        assert_eq!(f.entropy(), 0.0);
        assert_eq!(Frequency::default().entropy(), 0.0);
    }
}
