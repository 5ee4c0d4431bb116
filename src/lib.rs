//! # learnkit
//!
//! Small supervised-learning toolkit built around one encoded dataset type.
//!
//! - [`Dataset`]: nominal and numeric attributes encoded as `f64`, with
//!   z-score standardization and binary expansion of nominal attributes
//! - [`DecisionTree`]: ID3 with information gain
//! - [`NeuralNetwork`]: one hidden layer, online backpropagation
//! - [`NearestNeighbor`]: k-nearest-neighbour voting
//! - [`Evaluator`]: holdout and k-fold cross-validation over any
//!   [`Classifier`]
//!
//! # Features
//!
//! - `serde`: Serialization of configs and evaluation reports
//!
//! # Examples
//!
//! ```
//! use learnkit::{Config, Dataset, Evaluator, NeuralNetwork};
//!
//! let data: Dataset = "@dataset or
//! @attribute a 0 1
//! @attribute b 0 1
//! @attribute y 0 1
//! @examples
//! 0 0 0
//! 0 1 1
//! 1 0 1
//! 1 1 1
//! 0 0 0
//! 0 1 1
//! 1 0 1
//! 1 1 1"
//!     .parse()
//!     .unwrap();
//!
//! let config = Config::builder()
//!     .learning_rate(0.5)
//!     .hidden(2)
//!     .max_error(0.1)
//!     .max_epochs(100_000)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//!
//! let mut nn = NeuralNetwork::new(config);
//! let report = Evaluator::with_seed(42).holdout(&mut nn, &data, 0.5).unwrap();
//!
//! assert!(report.mean_accuracy >= 0.0);
//! ```

mod attribute;
mod classifier;
mod config;
mod dataset;
pub mod error;
mod evaluator;
mod example;
mod knn;
mod network;
mod training;
mod tree;
pub mod utils;

pub use attribute::{Attribute, Attributes, Domain};
pub use classifier::Classifier;
pub use config::{Config, ConfigBuilder};
pub use dataset::{Dataset, Frequency, Standardizer, TrainTestSets};
pub use error::{Error, Result};
pub use evaluator::{EvaluationReport, Evaluator, FoldResult, Method};
pub use example::Example;
pub use knn::NearestNeighbor;
pub use network::{BIAS, NeuralNetwork};
pub use training::FitResult;
pub use tree::{DecisionTree, Node};
