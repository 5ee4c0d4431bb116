//! Feed-forward network with one hidden layer, trained by online
//! backpropagation.

use tracing::{info, trace, warn};

use crate::{
    Config,
    classifier::Classifier,
    dataset::Dataset,
    error::{Error, Result},
    example::Example,
    training::FitResult,
    utils::{FastRng, rng_from_option, shuffle, sigmoid, uniform}
};

/// Constant value of the bias units.
pub const BIAS: f64 = -1.0;

/// Initial weights are drawn from `[-INIT_RANGE, INIT_RANGE]`.
const INIT_RANGE: f64 = 0.1;

/// How the output layer maps onto class values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    /// Numeric class; the single output is returned as is.
    Raw,
    /// Nominal class with at most two values; the single output is rounded.
    Rounded { classes: usize },
    /// Nominal class with more values; one output per value, largest wins.
    OneHot { classes: usize }
}

impl Output {
    fn for_dataset(dataset: &Dataset) -> Self {
        let class = dataset.class_attribute();
        match class.domain_size() {
            _ if class.is_numeric() => Self::Raw,
            n if n <= 2 => Self::Rounded {
                classes: n
            },
            n => Self::OneHot {
                classes: n
            }
        }
    }

    fn width(self) -> usize {
        match self {
            Self::Raw | Self::Rounded { .. } => 1,
            Self::OneHot {
                classes
            } => classes
        }
    }

    fn target(self, class_value: f64) -> Vec<f64> {
        match self {
            Self::Raw | Self::Rounded { .. } => vec![class_value],
            Self::OneHot {
                classes
            } => (0..classes)
                .map(|k| if class_value == k as f64 { 1.0 } else { 0.0 })
                .collect()
        }
    }

    fn decode(self, o: &[f64]) -> f64 {
        match self {
            Self::Raw => o[0],
            Self::Rounded {
                classes
            } => o[0].round().clamp(0.0, classes.saturating_sub(1) as f64),
            Self::OneHot { .. } => o
                .iter()
                .enumerate()
                .fold((0, f64::NEG_INFINITY), |best, (k, &v)| if v > best.1 { (k, v) } else { best })
                .0 as f64
        }
    }
}

/// Learned weights.
///
/// `v` is J x I (hidden x input, input includes the bias unit); `w` is
/// K x (J + 1) (output x hidden, the last column weights the hidden bias).
/// The hidden bias lets a single hidden unit separate AND.
#[derive(Debug, Clone, PartialEq)]
struct Weights {
    v:      Vec<Vec<f64>>,
    w:      Vec<Vec<f64>>,
    output: Output,
    inputs: usize
}

/// Activations of one forward pass. `y` ends with the hidden bias unit.
#[derive(Debug, Clone)]
struct Activations {
    y: Vec<f64>,
    o: Vec<f64>
}

impl Weights {
    fn random(inputs: usize, hidden: usize, output: Output, rng: &mut FastRng) -> Self {
        let mut row = |n: usize| -> Vec<f64> {
            let mut values = Vec::with_capacity(n);
            for _ in 0..n {
                values.push(uniform(rng, -INIT_RANGE, INIT_RANGE));
            }
            values
        };
        let v = (0..hidden).map(|_| row(inputs)).collect();
        let w = (0..output.width()).map(|_| row(hidden + 1)).collect();
        Self {
            v,
            w,
            output,
            inputs
        }
    }

    fn activations(&self) -> Activations {
        let mut y = vec![0.0; self.v.len() + 1];
        y[self.v.len()] = BIAS;
        Activations {
            y,
            o: vec![0.0; self.w.len()]
        }
    }

    fn forward(&self, z: &[f64], act: &mut Activations) {
        for (y, row) in act.y.iter_mut().zip(&self.v) {
            *y = sigmoid(dot(row, z));
        }
        for (o, row) in act.o.iter_mut().zip(&self.w) {
            *o = sigmoid(dot(row, &act.y));
        }
    }

    /// Delta-rule update for one example. Returns its squared error.
    fn backward(&mut self, z: &[f64], d: &[f64], act: &Activations, n: f64) -> f64 {
        let hidden = self.v.len();
        let delta_o: Vec<f64> = act
            .o
            .iter()
            .zip(d)
            .map(|(&o, &d)| o * (1.0 - o) * (d - o))
            .collect();
        let delta_y: Vec<f64> = (0..hidden)
            .map(|j| {
                let back: f64 = delta_o.iter().zip(&self.w).map(|(dk, row)| dk * row[j]).sum();
                act.y[j] * (1.0 - act.y[j]) * back
            })
            .collect();

        for (row, dk) in self.w.iter_mut().zip(&delta_o) {
            for (wkj, yj) in row.iter_mut().zip(&act.y) {
                *wkj += n * dk * yj;
            }
        }
        for (row, dj) in self.v.iter_mut().zip(&delta_y) {
            for (vji, zi) in row.iter_mut().zip(z) {
                *vji += n * dj * zi;
            }
        }

        act.o
            .iter()
            .zip(d)
            .map(|(&o, &d)| 0.5 * (d - o).powi(2))
            .sum()
    }
}

#[inline]
fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Network input for an example: its features with the bias in the class
/// slot.
fn input(example: &Example) -> Vec<f64> {
    let mut z = example.features().to_vec();
    z.push(BIAS);
    z
}

/// # Overview
///
/// Single-hidden-layer sigmoid network trained one example at a time.
///
/// Each epoch presents every training example once in a fresh random order
/// and training repeats epochs until the epoch error reaches
/// [`Config::max_error`]. Training state is rebuilt from scratch on every
/// call to `train`.
///
/// # Examples
///
/// ```
/// use learnkit::{Classifier, Config, Dataset, NeuralNetwork};
///
/// let data: Dataset = "@dataset and
/// @attribute a numeric
/// @attribute b numeric
/// @attribute y 0 1
/// @examples
/// 0 0 0
/// 0 1 0
/// 1 0 0
/// 1 1 1"
///     .parse()
///     .unwrap();
///
/// let config = Config::builder()
///     .learning_rate(0.5)
///     .hidden(2)
///     .max_error(0.05)
///     .max_epochs(200_000)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let mut nn = NeuralNetwork::new(config);
/// nn.train(&data).unwrap();
/// assert_eq!(nn.accuracy(&data).unwrap(), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    config:  Config,
    rng:     FastRng,
    weights: Option<Weights>
}

impl NeuralNetwork {
    /// # Overview
    ///
    /// Creates an untrained network. The RNG is seeded from the config, or
    /// from entropy when no seed is set.
    pub fn new(config: Config) -> Self {
        Self {
            rng: rng_from_option(config.seed),
            config,
            weights: None
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True once weights exist.
    #[inline]
    pub fn is_trained(&self) -> bool {
        self.weights.is_some()
    }

    /// Hidden-layer weights, one row per hidden unit.
    pub fn hidden_weights(&self) -> Option<&[Vec<f64>]> {
        self.weights.as_ref().map(|w| w.v.as_slice())
    }

    /// Output-layer weights, one row per output unit.
    pub fn output_weights(&self) -> Option<&[Vec<f64>]> {
        self.weights.as_ref().map(|w| w.w.as_slice())
    }

    /// # Overview
    ///
    /// Trains on `dataset` and reports how training went.
    ///
    /// # Errors
    ///
    /// `EmptyDataset` with no examples. `DidNotConverge` when `max_epochs`
    /// runs out first; the weights reached so far are kept.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<FitResult> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let class_index = dataset.class_index();
        let output = Output::for_dataset(dataset);
        let z: Vec<Vec<f64>> = dataset.iter().map(input).collect();
        let d: Vec<Vec<f64>> = dataset.iter().map(|e| output.target(e[class_index])).collect();

        let mut weights = Weights::random(
            dataset.attributes().len(),
            self.config.hidden,
            output,
            &mut self.rng
        );
        let mut act = weights.activations();
        let mut order: Vec<usize> = (0..z.len()).collect();
        let mut history = Vec::new();
        let n = self.config.learning_rate;

        loop {
            shuffle(&mut order, &mut self.rng);
            let mut error = 0.0;
            for &i in &order {
                weights.forward(&z[i], &mut act);
                error += weights.backward(&z[i], &d[i], &act, n);
            }
            history.push(error);
            trace!(epoch = history.len(), error, "epoch");

            if error <= self.config.max_error {
                break;
            }
            if self.config.max_epochs.is_some_and(|max| history.len() >= max) {
                self.weights = Some(weights);
                warn!(epochs = history.len(), error, "network did not converge");
                return Err(Error::DidNotConverge {
                    epochs: history.len(),
                    error
                });
            }
        }

        let result = FitResult::with_history(history.len(), history.len() * z.len(), history);
        info!(
            epochs = result.epochs_run,
            presentations = result.presentations,
            error = result.final_error,
            "trained network"
        );
        self.weights = Some(weights);
        Ok(result)
    }

    /// # Overview
    ///
    /// Raw output activations for an example.
    pub fn outputs(&self, example: &Example) -> Result<Vec<f64>> {
        let weights = self.weights.as_ref().ok_or(Error::NotTrained)?;
        if example.len() != weights.inputs {
            return Err(Error::DimensionMismatch {
                expected: weights.inputs,
                got:      example.len()
            });
        }
        let mut act = weights.activations();
        weights.forward(&input(example), &mut act);
        Ok(act.o)
    }
}

impl Classifier for NeuralNetwork {
    fn name(&self) -> &str {
        "Backpropagation Neural Network"
    }

    fn train(&mut self, dataset: &Dataset) -> Result<()> {
        self.fit(dataset).map(|_| ())
    }

    fn classify(&self, example: &Example) -> Result<f64> {
        let weights = self.weights.as_ref().ok_or(Error::NotTrained)?;
        let o = self.outputs(example)?;
        Ok(weights.output.decode(&o))
    }
}
