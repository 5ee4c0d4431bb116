//! AND gate learned by a one-hidden-unit network.

use learnkit::{Classifier, Config, Dataset, NeuralNetwork};

const AND: &str = "@dataset and
@attribute a 0 1
@attribute b 0 1
@attribute y 0 1
@examples
0 0 0
0 1 0
1 0 0
1 1 1";

fn main() {
    let data: Dataset = AND.parse().expect("valid dataset");
    let config = Config::builder()
        .learning_rate(0.5)
        .hidden(1)
        .max_error(0.05)
        .max_epochs(200_000)
        .seed(42)
        .build()
        .expect("valid config");

    let mut nn = NeuralNetwork::new(config);

    println!("Training on AND dataset...");
    let result = nn.fit(&data).expect("network converges");
    println!(
        "Converged after {} epochs ({} presentations), error {:.4}",
        result.epochs_run, result.presentations, result.final_error
    );

    println!("\nPredictions:");
    for example in &data {
        let out = nn.outputs(example).expect("trained");
        let pred = nn.classify(example).expect("trained");
        let expected = example[2];
        let status = if pred == expected { "OK" } else { "WRONG" };
        println!(
            "  {:?} -> {:.3} = {} (expected: {}) {}",
            example.features(),
            out[0],
            pred,
            expected,
            status
        );
    }

    println!("\nHidden weights: {:?}", nn.hidden_weights());
    println!("Output weights: {:?}", nn.output_weights());
}
