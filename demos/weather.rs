//! Decision tree, network and kNN on a small mixed-attribute dataset.

use learnkit::{
    Classifier, Config, Dataset, DecisionTree, Evaluator, NearestNeighbor, NeuralNetwork
};

const WEATHER: &str = "@dataset weather
@attribute outlook sunny overcast rain
@attribute temperature numeric
@attribute humidity numeric
@attribute windy false true
@attribute play no yes
@examples
sunny 85 85 false no
sunny 80 90 true no
overcast 83 86 false yes
rain 70 96 false yes
rain 68 80 false yes
rain 65 70 true no
overcast 64 65 true yes
sunny 72 95 false no
sunny 69 70 false yes
rain 75 80 false yes
sunny 75 70 true yes
overcast 72 90 true yes
overcast 81 75 false yes
rain 71 91 true no";

fn main() {
    let data: Dataset = WEATHER.parse().expect("valid dataset");
    println!("{}", data.attributes());

    let mut tree = DecisionTree::new();
    tree.train(&data).expect("non-empty dataset");
    println!("ID3 tree:\n{tree}");

    let mut evaluator = Evaluator::with_seed(42);
    let report = evaluator
        .cross_validate(&mut tree, &data, 7)
        .expect("valid folds");
    println!("{report}\n");

    let mut knn = NearestNeighbor::new(3).expect("k > 0");
    let report = evaluator
        .cross_validate(&mut knn, &data.standardize(), 7)
        .expect("valid folds");
    println!("{report}\n");

    let config = Config::builder()
        .learning_rate(0.2)
        .hidden(4)
        .max_error(0.5)
        .max_epochs(20_000)
        .seed(42)
        .build()
        .expect("valid config");
    let mut nn = NeuralNetwork::new(config);
    match evaluator.holdout(&mut nn, &data.normalize(), 0.5) {
        Ok(report) => println!("{report}"),
        Err(err) => println!("network evaluation failed: {err}")
    }
}
