//! learnkit CLI
//!
//! Loads a training file (and optionally a test file) and evaluates one of
//! the classifiers on it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use learnkit::{
    Classifier, Config, Dataset, DecisionTree, Evaluator, NearestNeighbor, NeuralNetwork,
    Standardizer, TrainTestSets
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Model {
    /// ID3 decision tree
    Dt,
    /// Backpropagation neural network
    Nn,
    /// k-nearest neighbour
    Knn
}

#[derive(Parser)]
#[command(name = "learnkit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train and evaluate classifiers on @dataset files", long_about = None)]
struct Cli {
    /// Training dataset file
    #[arg(short = 't', long)]
    train: PathBuf,

    /// Separate test dataset file
    #[arg(short = 'T', long)]
    test: Option<PathBuf>,

    /// Holdout proportion; cross-validation is used when absent
    #[arg(short = 'p', long)]
    holdout: Option<f64>,

    /// Number of cross-validation folds
    #[arg(short = 'x', long, default_value = "10")]
    folds: usize,

    /// Classifier to evaluate
    #[arg(short, long, value_enum, default_value = "nn")]
    classifier: Model,

    /// Learning rate of the network
    #[arg(short = 'n', long, default_value = "0.01")]
    learning_rate: f64,

    /// Hidden units of the network
    #[arg(short = 'j', long, default_value = "5")]
    hidden: usize,

    /// Epoch error at which network training stops
    #[arg(short = 'e', long, default_value = "0.2")]
    max_error: f64,

    /// Epoch ceiling for network training
    #[arg(long)]
    max_epochs: Option<usize>,

    /// Neighbours for kNN
    #[arg(short, default_value = "3")]
    k: usize,

    /// Random seed for weights, shuffling and fold assignment
    #[arg(long)]
    seed: Option<u64>,

    /// Standardize numeric and binarize nominal attributes first
    #[arg(long)]
    normalize: bool,

    /// Print the trained decision tree
    #[arg(long)]
    print_tree: bool
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "learnkit=info".into())
        )
        .init();

    let cli = Cli::parse();
    let sets = TrainTestSets::load(&cli.train, cli.test.as_deref())?;
    let (train, test) = if cli.normalize {
        let standardizer = Standardizer::fit(&sets.train);
        let test = sets
            .test
            .map(|t| standardizer.apply(&t).map(|t| t.binarize()))
            .transpose()?;
        (standardizer.apply(&sets.train)?.binarize(), test)
    } else {
        (sets.train, sets.test)
    };

    let mut classifier = build_classifier(&cli)?;
    evaluate(&cli, classifier.as_mut(), &train, test.as_ref())?;

    if cli.print_tree && matches!(cli.classifier, Model::Dt) {
        let mut tree = DecisionTree::new();
        tree.train(&train)?;
        print!("{tree}");
    }
    Ok(())
}

fn build_classifier(cli: &Cli) -> anyhow::Result<Box<dyn Classifier>> {
    Ok(match cli.classifier {
        Model::Dt => Box::new(DecisionTree::new()),
        Model::Knn => Box::new(NearestNeighbor::new(cli.k)?),
        Model::Nn => {
            let mut builder = Config::builder()
                .learning_rate(cli.learning_rate)
                .hidden(cli.hidden)
                .max_error(cli.max_error);
            if let Some(epochs) = cli.max_epochs {
                builder = builder.max_epochs(epochs);
            }
            if let Some(seed) = cli.seed {
                builder = builder.seed(seed);
            }
            Box::new(NeuralNetwork::new(builder.build()?))
        }
    })
}

fn evaluate(
    cli: &Cli,
    classifier: &mut dyn Classifier,
    train: &Dataset,
    test: Option<&Dataset>
) -> anyhow::Result<()> {
    let mut evaluator = Evaluator::new(cli.seed);

    if let Some(test) = test {
        let accuracy = evaluator.evaluate_testset(classifier, train, test)?;
        println!("{}", classifier.name());
        println!("Accuracy: {accuracy:.4}");
        return Ok(());
    }

    let report = match cli.holdout {
        Some(p) => evaluator.holdout(classifier, train, p)?,
        None => evaluator.cross_validate(classifier, train, cli.folds)?
    };
    println!("{report}");
    Ok(())
}
