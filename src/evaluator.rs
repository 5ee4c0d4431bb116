//! Holdout, k-fold cross-validation and test-set evaluation.

use core::fmt;

use rand::{Rng, seq::index};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    classifier::Classifier,
    dataset::Dataset,
    error::{Error, Result},
    utils::{self, FastRng, rng_from_option}
};

/// How an evaluation split the data.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    Holdout { proportion: f64 },
    CrossValidation { folds: usize }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Holdout {
                proportion
            } => write!(f, "p={proportion}"),
            Self::CrossValidation {
                folds
            } => write!(f, "folds={folds}")
        }
    }
}

/// Outcome of training on one fold set and testing on another.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FoldResult {
    pub train_size: usize,
    pub test_size:  usize,
    pub errors:     usize,
    pub accuracy:   f64,
    pub error:      f64
}

/// # Overview
///
/// Aggregate of an evaluation run.
///
/// `std_dev` is the population standard deviation of the per-fold
/// accuracies.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvaluationReport {
    pub classifier:    String,
    pub method:        Method,
    pub folds:         Vec<FoldResult>,
    pub mean_accuracy: f64,
    pub mean_error:    f64,
    pub std_dev:       f64
}

impl EvaluationReport {
    fn new(classifier: &str, method: Method, folds: Vec<FoldResult>) -> Self {
        let accuracies: Vec<f64> = folds.iter().map(|f| f.accuracy).collect();
        let errors: Vec<f64> = folds.iter().map(|f| f.error).collect();
        Self {
            classifier: classifier.to_owned(),
            method,
            mean_accuracy: utils::mean(&accuracies),
            mean_error: utils::mean(&errors),
            std_dev: utils::std_dev(&accuracies),
            folds
        }
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\t{}", self.classifier, self.method)?;
        writeln!(f, "Average Accuracy: {:.4}", self.mean_accuracy)?;
        writeln!(f, "Average Error: {:.4}", self.mean_error)?;
        write!(f, "Stdev: {:.4}", self.std_dev)
    }
}

/// # Overview
///
/// Drives any [`Classifier`] through train/test splits.
///
/// The evaluator never mutates datasets; folds are fresh subsets sharing the
/// source attributes. All sampling goes through the evaluator's own RNG so a
/// seeded evaluator reproduces its splits.
///
/// # Examples
///
/// ```
/// use learnkit::{Dataset, DecisionTree, Evaluator};
///
/// let data: Dataset = "@dataset parity
/// @attribute a 0 1
/// @attribute y 0 1
/// @examples
/// 0 0
/// 1 1
/// 0 0
/// 1 1"
///     .parse()
///     .unwrap();
///
/// let mut evaluator = Evaluator::with_seed(7);
/// let report = evaluator
///     .cross_validate(&mut DecisionTree::new(), &data, 2)
///     .unwrap();
///
/// assert_eq!(report.folds.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    rng: FastRng
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Evaluator {
    /// Evaluator seeded with `seed`, or from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from_option(seed)
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// # Overview
    ///
    /// Splits `0..n` for holdout: `ceil(p * n)` indices drawn without
    /// replacement form the second fold, the rest the first. Both folds keep
    /// dataset order.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `0 < p < 1`.
    pub fn holdout_split(&mut self, n: usize, p: f64) -> Result<[Vec<usize>; 2]> {
        if !(p > 0.0 && p < 1.0) {
            return Err(Error::invalid("proportion", format!("must be in (0, 1), got {p}")));
        }
        let held_out = ((n as f64) * p).ceil() as usize;
        let mut sampled = vec![false; n];
        for i in index::sample(&mut self.rng, n, held_out.min(n)) {
            sampled[i] = true;
        }
        let (second, first): (Vec<usize>, Vec<usize>) = (0..n).partition(|&i| sampled[i]);
        Ok([first, second])
    }

    /// # Overview
    ///
    /// Assigns `0..n` to `k` folds of at most `ceil(n / k)` indices.
    ///
    /// Each index goes to a uniformly random fold; a full fold is redrawn.
    /// Once the remaining indices are only just enough to give every empty
    /// fold one, non-empty folds are redrawn too, so no fold ends up empty.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` unless `2 <= k <= n`.
    pub fn assign_folds(&mut self, n: usize, k: usize) -> Result<Vec<Vec<usize>>> {
        if k < 2 || k > n {
            return Err(Error::invalid(
                "folds",
                format!("must be between 2 and the example count {n}, got {k}")
            ));
        }
        let capacity = n.div_ceil(k);
        let mut folds: Vec<Vec<usize>> = vec![Vec::with_capacity(capacity); k];
        let mut empty = k;

        for i in 0..n {
            let remaining = n - i;
            loop {
                let fold = self.rng.random_range(0..k);
                let len = folds[fold].len();
                if len >= capacity || (len > 0 && remaining <= empty) {
                    continue;
                }
                if len == 0 {
                    empty -= 1;
                }
                folds[fold].push(i);
                break;
            }
        }
        Ok(folds)
    }

    /// # Overview
    ///
    /// Two-way holdout: split by [`holdout_split`](Self::holdout_split), then
    /// train on each fold in turn and test on the other.
    ///
    /// # Errors
    ///
    /// `EmptyDataset`, `InvalidParameter` for a bad `p`, `EmptyFold` when a
    /// side of the split has no examples, or any classifier error.
    pub fn holdout<C: Classifier + ?Sized>(
        &mut self,
        classifier: &mut C,
        dataset: &Dataset,
        p: f64
    ) -> Result<EvaluationReport> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let split = self.holdout_split(dataset.len(), p)?;
        if let Some(fold) = split.iter().position(Vec::is_empty) {
            return Err(Error::EmptyFold {
                fold
            });
        }
        let folds = [dataset.subset(&split[0]), dataset.subset(&split[1])];

        let mut results = Vec::with_capacity(2);
        for (train, test) in [(0, 1), (1, 0)] {
            let result = run_fold(classifier, &folds[train], &folds[test], test)?;
            debug!(train, test, accuracy = result.accuracy, "holdout pass");
            results.push(result);
        }

        let report = EvaluationReport::new(classifier.name(), Method::Holdout {
            proportion: p
        }, results);
        log_report(&report);
        Ok(report)
    }

    /// # Overview
    ///
    /// k-fold cross-validation: for each fold, train on all the others and
    /// test on it.
    ///
    /// # Errors
    ///
    /// `EmptyDataset`, `InvalidParameter` for a bad `k`, or any classifier
    /// error.
    pub fn cross_validate<C: Classifier + ?Sized>(
        &mut self,
        classifier: &mut C,
        dataset: &Dataset,
        k: usize
    ) -> Result<EvaluationReport> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let assignment = self.assign_folds(dataset.len(), k)?;

        let mut results = Vec::with_capacity(k);
        for (i, fold) in assignment.iter().enumerate() {
            let training: Vec<usize> = assignment
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .flat_map(|(_, f)| f.iter().copied())
                .collect();
            let result = run_fold(classifier, &dataset.subset(&training), &dataset.subset(fold), i)?;
            debug!(fold = i, accuracy = result.accuracy, errors = result.errors, "fold done");
            results.push(result);
        }

        let report = EvaluationReport::new(classifier.name(), Method::CrossValidation {
            folds: k
        }, results);
        log_report(&report);
        Ok(report)
    }

    /// # Overview
    ///
    /// Trains on `train` and returns the accuracy on `test`.
    ///
    /// # Errors
    ///
    /// `EmptyFold` for an empty test set, or any classifier error.
    pub fn evaluate_testset<C: Classifier + ?Sized>(
        &self,
        classifier: &mut C,
        train: &Dataset,
        test: &Dataset
    ) -> Result<f64> {
        let result = run_fold(classifier, train, test, 0)?;
        info!(
            classifier = classifier.name(),
            accuracy = result.accuracy,
            "test set evaluation"
        );
        Ok(result.accuracy)
    }
}

fn run_fold<C: Classifier + ?Sized>(
    classifier: &mut C,
    train: &Dataset,
    test: &Dataset,
    test_fold: usize
) -> Result<FoldResult> {
    if test.is_empty() {
        return Err(Error::EmptyFold {
            fold: test_fold
        });
    }
    classifier.train(train)?;
    let errors = classifier.misclassified(test)?;
    let n = test.len() as f64;
    Ok(FoldResult {
        train_size: train.len(),
        test_size: test.len(),
        errors,
        accuracy: (n - errors as f64) / n,
        error: errors as f64 / n
    })
}

fn log_report(report: &EvaluationReport) {
    info!(
        classifier = %report.classifier,
        method = %report.method,
        accuracy = report.mean_accuracy,
        error = report.mean_error,
        std_dev = report.std_dev,
        "evaluation finished"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Example, tree::DecisionTree};

    /// Records what it was trained on and always predicts class 0.
    #[derive(Default)]
    struct Recorder {
        trained_on: Vec<Vec<Example>>
    }

    impl Classifier for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        fn train(&mut self, dataset: &Dataset) -> Result<()> {
            self.trained_on.push(dataset.examples().to_vec());
            Ok(())
        }

        fn classify(&self, _example: &Example) -> Result<f64> {
            Ok(0.0)
        }
    }

    fn numbered(n: usize) -> Dataset {
        let mut text = String::from("@dataset numbered\n@attribute id numeric\n@attribute y 0 1\n@examples\n");
        for i in 0..n {
            text.push_str(&format!("{i} {}\n", i % 2));
        }
        text.parse().unwrap()
    }

    #[test]
    fn holdout_split_sizes() {
        let mut ev = Evaluator::with_seed(3);
        for n in [1, 2, 7, 10, 31] {
            let [first, second] = ev.holdout_split(n, 0.5).unwrap();
            assert_eq!(first.len() + second.len(), n);
            assert_eq!(second.len(), n.div_ceil(2));
            assert_eq!(first.len(), n - n.div_ceil(2));
        }
    }

    #[test]
    fn holdout_split_is_a_partition() {
        let mut ev = Evaluator::with_seed(11);
        let [first, second] = ev.holdout_split(20, 0.3).unwrap();
        let mut all: Vec<usize> = first.iter().chain(&second).copied().collect();
        all.sort_unstable();

        assert_eq!(all, (0..20).collect::<Vec<_>>());
        assert_eq!(second.len(), 6);
    }

    #[test]
    fn holdout_rejects_bad_proportion() {
        let mut ev = Evaluator::with_seed(1);
        assert!(ev.holdout_split(10, 0.0).is_err());
        assert!(ev.holdout_split(10, 1.0).is_err());
        assert!(ev.holdout_split(10, f64::NAN).is_err());
    }

    #[test]
    fn holdout_trains_twice_on_swapped_folds() {
        let ds = numbered(10);
        let mut recorder = Recorder::default();
        let report = Evaluator::with_seed(5).holdout(&mut recorder, &ds, 0.5).unwrap();

        let trained = &recorder.trained_on;
        assert_eq!(trained.len(), 2);
        assert_eq!(trained[0].len() + trained[1].len(), 10);
        assert_eq!(report.folds.len(), 2);
        assert_eq!(report.folds[0].test_size, report.folds[1].train_size);
    }

    #[test]
    fn holdout_with_single_example_has_empty_fold() {
        let ds = numbered(1);
        let err = Evaluator::with_seed(5)
            .holdout(&mut Recorder::default(), &ds, 0.5)
            .unwrap_err();
        assert!(matches!(err, Error::EmptyFold { .. }));
    }

    #[test]
    fn assign_folds_respects_capacity() {
        let mut ev = Evaluator::with_seed(9);
        for (n, k) in [(10, 3), (10, 10), (23, 4), (5, 4), (100, 7)] {
            let folds = ev.assign_folds(n, k).unwrap();
            let capacity = n.div_ceil(k);

            assert_eq!(folds.len(), k);
            assert_eq!(folds.iter().map(Vec::len).sum::<usize>(), n);
            assert!(folds.iter().all(|f| !f.is_empty() && f.len() <= capacity));
        }
    }

    #[test]
    fn assign_folds_rejects_bad_k() {
        let mut ev = Evaluator::with_seed(9);
        assert!(ev.assign_folds(10, 1).is_err());
        assert!(ev.assign_folds(3, 4).is_err());
    }

    #[test]
    fn cross_validation_leaves_out_each_fold_once() {
        let ds = numbered(12);
        let mut recorder = Recorder::default();
        let report = Evaluator::with_seed(2).cross_validate(&mut recorder, &ds, 4).unwrap();

        let trained = &recorder.trained_on;
        assert_eq!(trained.len(), 4);
        assert_eq!(report.folds.len(), 4);

        let mut left_out = Vec::new();
        for (set, fold) in trained.iter().zip(&report.folds) {
            assert_eq!(set.len() + fold.test_size, 12);
            let ids: Vec<usize> = set.iter().map(|e| e[0] as usize).collect();
            left_out.extend((0..12).filter(|i| !ids.contains(i)));
        }
        left_out.sort_unstable();
        assert_eq!(left_out, (0..12).collect::<Vec<_>>());
    }

    #[test]
    fn report_aggregates_folds() {
        let ds = numbered(12);
        let report = Evaluator::with_seed(2)
            .cross_validate(&mut Recorder::default(), &ds, 3)
            .unwrap();

        let mean: f64 = report.folds.iter().map(|f| f.accuracy).sum::<f64>() / 3.0;
        assert!((report.mean_accuracy - mean).abs() < 1e-12);
        assert!((report.mean_accuracy + report.mean_error - 1.0).abs() < 1e-12);
        assert!(report.to_string().starts_with("recorder\tfolds=3\n"));
    }

    #[test]
    fn seeded_evaluations_repeat() {
        let ds = numbered(20);
        let a = Evaluator::with_seed(4).assign_folds(ds.len(), 5).unwrap();
        let b = Evaluator::with_seed(4).assign_folds(ds.len(), 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn testset_accuracy() {
        let train = numbered(6);
        let test = train.subset(&[0, 1, 2]);
        let mut tree = DecisionTree::new();
        let acc = Evaluator::default().evaluate_testset(&mut tree, &train, &test).unwrap();
        assert!((0.0..=1.0).contains(&acc));

        let err = Evaluator::default()
            .evaluate_testset(&mut tree, &train, &train.subset(&[]))
            .unwrap_err();
        assert!(matches!(err, Error::EmptyFold { .. }));
    }
}
