//! Integration tests for learnkit.

use std::io::Write;

use learnkit::{
    Classifier, Config, Dataset, DecisionTree, Error, Evaluator, NearestNeighbor, NeuralNetwork,
    TrainTestSets
};

const LENSES: &str = "@dataset lenses

@attribute age young pre-presbyopic presbyopic
@attribute prescription myope hypermetrope
@attribute astigmatic no yes
@attribute tear-rate reduced normal
@attribute lenses hard soft none

@examples

young myope no reduced none
young myope no normal soft
young myope yes reduced none
young myope yes normal hard
young hypermetrope no reduced none
young hypermetrope no normal soft
young hypermetrope yes reduced none
young hypermetrope yes normal hard
pre-presbyopic myope no reduced none
pre-presbyopic myope no normal soft
pre-presbyopic myope yes reduced none
pre-presbyopic myope yes normal hard
pre-presbyopic hypermetrope no reduced none
pre-presbyopic hypermetrope no normal soft
pre-presbyopic hypermetrope yes reduced none
pre-presbyopic hypermetrope yes normal none
presbyopic myope no reduced none
presbyopic myope no normal none
presbyopic myope yes reduced none
presbyopic myope yes normal hard
presbyopic hypermetrope no reduced none
presbyopic hypermetrope no normal soft
presbyopic hypermetrope yes reduced none
presbyopic hypermetrope yes normal none
";

fn lenses() -> Dataset {
    LENSES.parse().unwrap()
}

fn network(seed: u64) -> NeuralNetwork {
    let config = Config::builder()
        .learning_rate(0.5)
        .hidden(4)
        .max_error(0.5)
        .max_epochs(50_000)
        .seed(seed)
        .build()
        .unwrap();
    NeuralNetwork::new(config)
}

#[test]
fn tree_reproduces_training_set() {
    let ds = lenses();
    let mut tree = DecisionTree::new();
    tree.train(&ds).unwrap();

    let predicted = tree.classify_all(&ds).unwrap();
    let actual: Vec<f64> = ds.column(ds.class_index()).collect();
    assert_eq!(predicted, actual);
}

#[test]
fn tree_tests_tear_rate_first() {
    let ds = lenses();
    let mut tree = DecisionTree::new();
    tree.train(&ds).unwrap();

    assert!(tree.to_string().starts_with("tear-rate = reduced\n  -> none\n"));
}

#[test]
fn tree_cross_validation() {
    let ds = lenses();
    let report = Evaluator::with_seed(42)
        .cross_validate(&mut DecisionTree::new(), &ds, 4)
        .unwrap();

    assert_eq!(report.folds.len(), 4);
    assert_eq!(report.folds.iter().map(|f| f.test_size).sum::<usize>(), 24);
    assert!(report.folds.iter().all(|f| f.test_size <= 6));
    assert!(report.mean_accuracy >= 0.4);
}

#[test]
fn network_on_binarized_lenses() {
    let ds = lenses().normalize();
    assert_eq!(ds.attributes().len(), 7);

    let mut nn = network(7);
    nn.train(&ds).unwrap();
    assert!(nn.accuracy(&ds).unwrap() >= 0.9);
}

#[test]
fn network_holdout_reports_two_passes() {
    let ds = lenses().normalize();
    let report = Evaluator::with_seed(3).holdout(&mut network(3), &ds, 0.5).unwrap();

    assert_eq!(report.folds.len(), 2);
    assert_eq!(report.folds[0].test_size, 12);
    assert_eq!(report.folds[1].test_size, 12);
    assert!((0.0..=1.0).contains(&report.mean_accuracy));
}

#[test]
fn knn_cross_validation() {
    let ds = lenses();
    let mut knn = NearestNeighbor::new(3).unwrap();
    let report = Evaluator::with_seed(1).cross_validate(&mut knn, &ds, 3).unwrap();

    assert_eq!(report.folds.len(), 3);
    assert!((report.mean_accuracy + report.mean_error - 1.0).abs() < 1e-9);
}

#[test]
fn classifiers_are_interchangeable() {
    let ds = lenses();
    let mut models: Vec<Box<dyn Classifier>> = vec![
        Box::new(DecisionTree::new()),
        Box::new(NearestNeighbor::new(1).unwrap()),
    ];
    let evaluator = Evaluator::with_seed(9);

    for model in &mut models {
        let accuracy = evaluator
            .evaluate_testset(model.as_mut(), &ds, &ds)
            .unwrap();
        assert_eq!(accuracy, 1.0, "{}", model.name());
    }
}

#[test]
fn load_train_and_test_files() {
    let dir = std::env::temp_dir();
    let train_path = dir.join(format!("learnkit-train-{}.mff", std::process::id()));
    let test_path = dir.join(format!("learnkit-test-{}.mff", std::process::id()));
    std::fs::File::create(&train_path)
        .unwrap()
        .write_all(LENSES.as_bytes())
        .unwrap();
    std::fs::write(&test_path, lenses().subset(&[0, 1, 2]).to_string()).unwrap();

    let sets = TrainTestSets::load(&train_path, Some(test_path.as_path())).unwrap();
    assert_eq!(sets.train.len(), 24);
    assert_eq!(sets.test.as_ref().map(Dataset::len), Some(3));

    let _ = std::fs::remove_file(&train_path);
    let _ = std::fs::remove_file(&test_path);
}

#[test]
fn missing_file_is_io_error() {
    let err = Dataset::load("/nonexistent/learnkit/data.mff").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn malformed_dataset_is_rejected_whole() {
    let text = LENSES.replace("young myope yes normal hard", "young myope maybe normal hard");
    let err = text.parse::<Dataset>().unwrap_err();
    assert!(matches!(err, Error::Parse { line: 14, .. }), "{err}");
}
