//! ID3 decision tree.

use std::{fmt, sync::Arc};

use tracing::{debug, info};

use crate::{
    attribute::Attributes,
    classifier::Classifier,
    dataset::Dataset,
    error::{Error, Result},
    example::Example
};

/// # Overview
///
/// A node of a trained tree.
///
/// Internal nodes keep the majority class of the examples that reached them;
/// classification falls back to it when an example carries a value no child
/// was grown for.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Leaf {
        label: f64
    },
    Internal {
        attribute: usize,
        label:     f64,
        children:  Vec<(f64, Node)>
    }
}

impl Node {
    #[inline]
    pub fn label(&self) -> f64 {
        match self {
            Self::Leaf {
                label
            }
            | Self::Internal {
                label, ..
            } => *label
        }
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }

    /// Child grown for `value`, if any.
    pub fn child(&self, value: f64) -> Option<&Node> {
        match self {
            Self::Leaf { .. } => None,
            Self::Internal {
                children, ..
            } => children.iter().find(|(v, _)| *v == value).map(|(_, n)| n)
        }
    }

    /// Longest root-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Internal {
                children, ..
            } => 1 + children.iter().map(|(_, c)| c.depth()).max().unwrap_or(0)
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Internal {
                children, ..
            } => children.iter().map(|(_, c)| c.leaf_count()).sum()
        }
    }

    fn classify(&self, example: &Example) -> f64 {
        let mut node = self;
        loop {
            match node {
                Self::Leaf {
                    label
                } => return *label,
                Self::Internal {
                    attribute,
                    label,
                    ..
                } => match node.child(example[*attribute]) {
                    Some(child) => node = child,
                    None => return *label
                }
            }
        }
    }
}

/// Result of growing one partition.
#[derive(Debug)]
enum Branch {
    Leaf(f64),
    Internal {
        attribute: usize,
        label:     f64,
        children:  Vec<(f64, Node)>
    },
    /// The partition held no examples.
    Empty
}

impl Branch {
    fn into_node(self, fallback: f64) -> Node {
        match self {
            Self::Leaf(label) => Node::Leaf {
                label
            },
            Self::Internal {
                attribute,
                label,
                children
            } => Node::Internal {
                attribute,
                label,
                children
            },
            Self::Empty => Node::Leaf {
                label: fallback
            }
        }
    }
}

/// # Overview
///
/// Decision tree grown by recursive partitioning on the attribute with the
/// highest information gain.
///
/// Only nominal attributes are tested; each is used at most once along any
/// root-to-leaf path.
///
/// # Examples
///
/// ```
/// use learnkit::{Classifier, Dataset, DecisionTree};
///
/// let data: Dataset = "@dataset or
/// @attribute a 0 1
/// @attribute b 0 1
/// @attribute y 0 1
/// @examples
/// 0 0 0
/// 0 1 1
/// 1 0 1
/// 1 1 1"
///     .parse()
///     .unwrap();
///
/// let mut tree = DecisionTree::new();
/// tree.train(&data).unwrap();
///
/// assert_eq!(tree.classify(&data.examples()[0]).unwrap(), 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DecisionTree {
    root:       Option<Node>,
    attributes: Option<Arc<Attributes>>,
    max_depth:  Option<usize>
}

impl DecisionTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// # Overview
    ///
    /// Limits the number of tests on any path. Nodes at the limit become
    /// majority leaves.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Root of the trained tree.
    #[inline]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_ref()
    }

    fn grow(&self, dataset: &Dataset, candidates: &[usize], depth: usize) -> Result<Branch> {
        let Some(label) = dataset.majority_class() else {
            return Ok(Branch::Empty);
        };
        let at_limit = self.max_depth.is_some_and(|max| depth >= max);
        if dataset.is_homogeneous() || candidates.is_empty() || at_limit {
            return Ok(Branch::Leaf(label));
        }

        let Some(attribute) = dataset.best_split_among(candidates) else {
            return Ok(Branch::Leaf(label));
        };
        debug!(
            depth,
            attribute,
            gain = dataset.info_gain(attribute),
            examples = dataset.len(),
            "split"
        );

        let remaining: Vec<usize> = candidates.iter().copied().filter(|&c| c != attribute).collect();
        let mut children = Vec::new();
        for (value, subset) in dataset.split_on_attribute(attribute)? {
            let branch = self.grow(&subset, &remaining, depth + 1)?;
            children.push((value, branch.into_node(label)));
        }

        if children.is_empty() {
            return Ok(Branch::Leaf(label));
        }
        Ok(Branch::Internal {
            attribute,
            label,
            children
        })
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, node: &Node, indent: usize) -> fmt::Result {
        let Some(attributes) = &self.attributes else {
            return Ok(());
        };
        let class = &attributes[attributes.class_index()];
        let class_name = |label: f64| {
            class
                .value_at(label as usize)
                .map_or_else(|| label.to_string(), str::to_owned)
        };

        match node {
            Node::Leaf {
                label
            } => writeln!(f, "{:indent$}-> {}", "", class_name(*label)),
            Node::Internal {
                attribute,
                children,
                ..
            } => {
                let tested = &attributes[*attribute];
                for (value, child) in children {
                    let value_name = tested
                        .value_at(*value as usize)
                        .map_or_else(|| value.to_string(), str::to_owned);
                    writeln!(f, "{:indent$}{} = {}", "", tested.name(), value_name)?;
                    self.fmt_node(f, child, indent + 2)?;
                }
                Ok(())
            }
        }
    }
}

impl Classifier for DecisionTree {
    fn name(&self) -> &str {
        "ID3"
    }

    fn train(&mut self, dataset: &Dataset) -> Result<()> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let candidates = dataset.split_candidates();
        let branch = self.grow(dataset, &candidates, 0)?;
        let fallback = dataset.majority_class().ok_or(Error::EmptyDataset)?;
        let root = branch.into_node(fallback);

        info!(
            examples = dataset.len(),
            depth = root.depth(),
            leaves = root.leaf_count(),
            "trained decision tree"
        );
        self.root = Some(root);
        self.attributes = Some(dataset.shared_attributes());
        Ok(())
    }

    fn classify(&self, example: &Example) -> Result<f64> {
        let (Some(root), Some(attributes)) = (&self.root, &self.attributes) else {
            return Err(Error::NotTrained);
        };
        if example.len() != attributes.len() {
            return Err(Error::DimensionMismatch {
                expected: attributes.len(),
                got:      example.len()
            });
        }
        Ok(root.classify(example))
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => self.fmt_node(f, root, 0),
            None => writeln!(f, "(untrained)")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(text: &str) -> Dataset {
        text.parse().unwrap()
    }

    const XOR: &str = "@dataset xor
@attribute a 0 1
@attribute b 0 1
@attribute y 0 1
@examples
0 0 0
0 1 1
1 0 1
1 1 0";

    #[test]
    fn classify_before_train_fails() {
        let tree = DecisionTree::new();
        let err = tree.classify(&Example::new(vec![0.0, 0.0, 0.0])).unwrap_err();
        assert!(matches!(err, Error::NotTrained));
    }

    #[test]
    fn train_on_empty_fails() {
        let ds = dataset(XOR).subset(&[]);
        assert!(matches!(DecisionTree::new().train(&ds), Err(Error::EmptyDataset)));
    }

    #[test]
    fn learns_xor_despite_zero_first_gain() {
        let ds = dataset(XOR);
        let mut tree = DecisionTree::new();
        tree.train(&ds).unwrap();

        assert_eq!(tree.accuracy(&ds).unwrap(), 1.0);
        assert_eq!(tree.root().unwrap().depth(), 2);
        assert_eq!(tree.root().unwrap().leaf_count(), 4);
    }

    #[test]
    fn homogeneous_data_gives_single_leaf() {
        let ds = dataset(XOR).subset(&[0, 3]);
        let mut tree = DecisionTree::new();
        tree.train(&ds).unwrap();

        assert!(tree.root().unwrap().is_leaf());
        assert_eq!(tree.root().unwrap().label(), 0.0);
    }

    #[test]
    fn unseen_value_falls_back_to_node_label() {
        let ds = dataset(
            "@dataset d
@attribute colour red green blue
@attribute y yes no
@examples
red yes
red yes
green no"
        );
        let mut tree = DecisionTree::new();
        tree.train(&ds).unwrap();

        // blue never occurs in training; its child is a majority leaf.
        let blue = Example::new(vec![2.0, 0.0]);
        assert_eq!(tree.classify(&blue).unwrap(), 0.0);

        // a value with no child at all falls back to the root label.
        let unknown = Example::new(vec![7.0, 0.0]);
        assert_eq!(tree.classify(&unknown).unwrap(), 0.0);
    }

    #[test]
    fn conflicting_examples_terminate() {
        let ds = dataset(
            "@dataset d
@attribute a 0 1
@attribute y 0 1
@examples
0 0
0 1
0 1"
        );
        let mut tree = DecisionTree::new();
        tree.train(&ds).unwrap();

        assert_eq!(tree.classify(&Example::new(vec![0.0, 0.0])).unwrap(), 1.0);
    }

    #[test]
    fn max_depth_limits_growth() {
        let ds = dataset(XOR);
        let mut tree = DecisionTree::new().with_max_depth(1);
        tree.train(&ds).unwrap();

        assert_eq!(tree.root().unwrap().depth(), 1);
    }

    #[test]
    fn retraining_replaces_model() {
        let ds = dataset(XOR);
        let mut tree = DecisionTree::new();
        tree.train(&ds).unwrap();
        tree.train(&ds.subset(&[1, 2])).unwrap();

        assert!(tree.root().unwrap().is_leaf());
        assert_eq!(tree.classify(&ds.examples()[0]).unwrap(), 1.0);
    }

    #[test]
    fn rejects_wrong_example_length() {
        let ds = dataset(XOR);
        let mut tree = DecisionTree::new();
        tree.train(&ds).unwrap();

        assert!(matches!(
            tree.classify(&Example::new(vec![0.0])),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn display_names_tests_and_labels() {
        let ds = dataset(XOR);
        let mut tree = DecisionTree::new();
        tree.train(&ds).unwrap();
        let text = tree.to_string();

        assert!(text.starts_with("a = 0\n  b = 0\n    -> 0\n"));
    }
}
