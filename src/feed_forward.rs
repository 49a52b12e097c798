//! A [Feedforward neural network]
//! (https://en.wikipedia.org/wiki/Feedforward_neural_network).
//!
//! # Example
//!
//! Let's train a simple neural network to compute the XOR function:
//!
//! ```
//! # use perceptron::{Activator, Network, TrainingExample};
//! // Create examples of the XOR function
//! let examples: Vec<TrainingExample> = vec![
//!     ([0.0, 0.0], [0.0]).into(),
//!     ([0.0, 1.0], [1.0]).into(),
//!     ([1.0, 0.0], [1.0]).into(),
//!     ([1.0, 1.0], [0.0]).into(),
//! ];
//!
//! // A network with 2 inputs, one hidden layer of 4 units and 1 output
//! let mut network = Network::new(2, 1, 4, 1, Activator::Sigmoid).unwrap();
//! network.train(&examples, 5000, 0.5).unwrap();
//!
//! for record in network.test(&examples).unwrap() {
//!     println!("{:?} -> {:?}", record.input, record.prediction);
//! }
//! assert_eq!(network.predict(&[1.0, 0.0]).unwrap().len(), 1);
//! ```

use crate::activator::Activator;
use crate::data::{TestRecord, TrainingExample};
use crate::error::{check_len, Error, Result};
use crate::layer::Layer;
use crate::properties::Properties;
use crate::utils::{mean_square_error, Back, Front};

use itertools::izip;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::convert::TryFrom;
use tracing::debug;

/// How hidden layers are connected to the layer before them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Wiring {
    /// Each layer's fan-in is the width of the layer before it.
    Chained,
    /// Every hidden layer reads `num_inputs` values and the output layer reads
    /// `neurons_per_hidden_layer` values, regardless of what precedes them.
    ///
    /// Only consistent when there is at most one hidden layer, or when the
    /// hidden width equals the input width. Other shapes build, but fail with
    /// `DimensionMismatch` on the first forward pass.
    InputWidth,
}

impl Default for Wiring {
    fn default() -> Self {
        Wiring::Chained
    }
}

/// The local gradient term used when turning a unit's error into a delta.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradientRule {
    /// Always `y * (1 - y)`, the logistic derivative in terms of the output.
    /// Only correct when every weighted layer uses `Activator::Sigmoid`.
    Logistic,
    /// The derivative of each unit's own activation function.
    Activation,
}

impl Default for GradientRule {
    fn default() -> Self {
        GradientRule::Activation
    }
}

/// A Feedforward neural network
///
/// The first layer is always a passthrough input layer and the last is the
/// output layer. The layer structure never changes after construction; only
/// weights, biases and activation functions do.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawNetwork")]
pub struct Network {
    layers: Vec<Layer>,
    gradient: GradientRule,
}

/// A deserialized network whose structure has not been checked yet.
#[derive(Deserialize)]
struct RawNetwork {
    layers: Vec<Layer>,
    #[serde(default)]
    gradient: GradientRule,
}

impl TryFrom<RawNetwork> for Network {
    type Error = Error;

    fn try_from(raw: RawNetwork) -> Result<Self> {
        check_structure(&raw.layers)?;
        Ok(Network {
            layers: raw.layers,
            gradient: raw.gradient,
        })
    }
}

/// Checks the shape every network has: a non-empty passthrough input layer
/// followed by at least one non-empty weighted layer, each with one fan-in
/// shared by all of its units.
///
/// Fan-ins are not matched against upstream widths here; a mismatch there
/// surfaces as `DimensionMismatch` on the first forward pass, as it does for
/// `Wiring::InputWidth`.
fn check_structure(layers: &[Layer]) -> Result<()> {
    if layers.len() < 2 {
        return Err(Error::InvalidTopology(
            "a network needs an input and an output layer",
        ));
    }
    let input = layers.front();
    if input.is_empty() || !input.is_input() {
        return Err(Error::InvalidTopology(
            "the first layer must be a non-empty input layer",
        ));
    }
    for unit in input.units() {
        match unit.input_index() {
            Some(index) if index < input.len() => {}
            _ => {
                return Err(Error::InvalidTopology(
                    "input unit index is out of range",
                ))
            }
        }
    }
    for layer in &layers[1..] {
        if layer.is_empty() {
            return Err(Error::InvalidTopology("weighted layer is empty"));
        }
        let fan_in = layer.units().front().weights().len();
        for unit in layer.units() {
            if unit.is_input() {
                return Err(Error::InvalidTopology(
                    "input unit found past the first layer",
                ));
            }
            if unit.weights().len() != fan_in {
                return Err(Error::InvalidTopology(
                    "units of a layer have different fan-ins",
                ));
            }
        }
    }
    Ok(())
}

impl Network {
    /// Creates a new, untrained neural network with randomly drawn weights.
    ///
    /// Arguments:
    ///  * `num_inputs` - the width of the input layer.
    ///  * `num_hidden_layers` - the number of hidden layers, possibly zero.
    ///  * `neurons_per_hidden_layer` - the width of every hidden layer.
    ///  * `num_outputs` - the width of the output layer.
    ///  * `activator` - the activation function to use for each neuron.
    pub fn new(
        num_inputs: usize,
        num_hidden_layers: usize,
        neurons_per_hidden_layer: usize,
        num_outputs: usize,
        activator: Activator,
    ) -> Result<Self> {
        let properties = Properties {
            num_inputs,
            num_hidden_layers,
            neurons_per_hidden_layer,
            num_outputs,
            activation: activator,
            ..Properties::default()
        };
        Network::with_rng(&properties, &mut rand::thread_rng())
    }

    /// Creates a new network from `properties`, seeding initialization from
    /// `properties.seed` when present.
    pub fn from_properties(properties: &Properties) -> Result<Self> {
        match properties.seed {
            Some(seed) => {
                Network::with_rng(properties, &mut StdRng::seed_from_u64(seed))
            }
            None => Network::with_rng(properties, &mut rand::thread_rng()),
        }
    }

    /// Creates a new network from `properties`, drawing initial weights from
    /// `rng`.
    pub fn with_rng<R>(properties: &Properties, rng: &mut R) -> Result<Self>
    where
        R: Rng + ?Sized,
    {
        if properties.num_inputs == 0 {
            return Err(Error::InvalidTopology("input layer is empty"));
        }
        if properties.num_outputs == 0 {
            return Err(Error::InvalidTopology("output layer is empty"));
        }
        if properties.num_hidden_layers > 0
            && properties.neurons_per_hidden_layer == 0
        {
            return Err(Error::InvalidTopology("hidden layers are empty"));
        }

        let activator = properties.activation;
        let sizes = properties.layer_sizes();
        let output = sizes.len() - 1;
        let mut layers = Vec::with_capacity(sizes.len());
        layers.push(Layer::input(sizes[0]));
        for (i, &width) in sizes.iter().enumerate().skip(1) {
            let fan_in = match properties.wiring {
                Wiring::Chained => sizes[i - 1],
                Wiring::InputWidth if i == output => {
                    properties.neurons_per_hidden_layer
                }
                Wiring::InputWidth => properties.num_inputs,
            };
            layers.push(Layer::weighted(activator, fan_in, width, &mut *rng));
        }

        Ok(Network {
            layers,
            gradient: properties.gradient,
        })
    }

    /// Returns every layer, input layer first.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the size of the input layer to the network.
    pub fn input_len(&self) -> usize {
        self.layers.front().len()
    }

    /// Returns the size of the output layer from the network.
    pub fn output_len(&self) -> usize {
        self.layers.back().len()
    }

    pub fn gradient_rule(&self) -> GradientRule {
        self.gradient
    }

    pub fn set_gradient_rule(&mut self, rule: GradientRule) {
        self.gradient = rule;
    }

    /// Sets the activation function of every unit in layer `index`.
    ///
    /// Index 0 is the input layer, whose units have no activation; setting it
    /// succeeds without effect.
    pub fn set_activation(
        &mut self,
        index: usize,
        activator: Activator,
    ) -> Result<()> {
        let len = self.layers.len();
        let layer = self
            .layers
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        layer.set_activation(activator);
        Ok(())
    }

    /// Feeds the provided `input` through the network, returning the output
    /// layer.
    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.feed_forward(input)
    }

    /// Threads `input` through every layer in order.
    fn feed_forward(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        check_len(self.input_len(), input.len())?;
        let mut outputs = input.to_vec();
        for layer in &mut self.layers {
            outputs = layer.forward(&outputs)?;
        }
        Ok(outputs)
    }

    /// Feeds the error between `targets` and `predictions` back through the
    /// network, updating every weighted unit in place.
    ///
    /// The caches of the preceding `predict` call supply each unit's inputs
    /// and output. The output layer's error is `target - prediction`; a
    /// hidden unit's error is the sum of the downstream errors weighted by the
    /// (already updated) downstream weights that read it. Each unit's weights
    /// then move by `input * error * gradient * learning_rate`.
    ///
    /// All dimensions are checked before the first weight changes, so an
    /// error leaves the network untouched.
    pub fn backpropagate(
        &mut self,
        targets: &[f64],
        predictions: &[f64],
        learning_rate: f64,
    ) -> Result<()> {
        self.check_backward(targets, predictions)?;

        let rule = self.gradient;
        let mut errors: Vec<f64> = targets
            .iter()
            .zip(predictions)
            .map(|(t, p)| t - p)
            .collect();
        for (unit, error, prediction) in izip!(
            self.layers.mut_back().units_mut(),
            &errors,
            predictions
        ) {
            let gradient = match rule {
                GradientRule::Logistic => prediction * (1.0 - prediction),
                GradientRule::Activation => unit.fprime(),
            };
            unit.apply_delta(error * gradient, learning_rate);
        }

        // Walk the hidden layers from the output back towards the input,
        // never touching the input layer at index 0.
        for i in (1..self.layers.len() - 1).rev() {
            let (upstream, downstream) = self.layers.split_at_mut(i + 1);
            let downstream = downstream.front();
            let layer = upstream.mut_back();

            let hidden_errors: Vec<f64> = (0..layer.len())
                .map(|j| {
                    downstream
                        .units()
                        .iter()
                        .zip(&errors)
                        .map(|(unit, error)| error * unit.weights()[j])
                        .sum::<f64>()
                })
                .collect();
            for (unit, error) in layer.units_mut().iter_mut().zip(&hidden_errors)
            {
                let gradient = match rule {
                    GradientRule::Logistic => {
                        let y = unit.output();
                        y * (1.0 - y)
                    }
                    GradientRule::Activation => unit.fprime(),
                };
                unit.apply_delta(error * gradient, learning_rate);
            }
            errors = hidden_errors;
        }
        Ok(())
    }

    /// Verifies that a backward pass can run to completion.
    fn check_backward(
        &self,
        targets: &[f64],
        predictions: &[f64],
    ) -> Result<()> {
        check_len(self.output_len(), targets.len())?;
        check_len(self.output_len(), predictions.len())?;
        for (i, layer) in self.layers.iter().enumerate().skip(1) {
            if let Some(fan_in) = layer.fan_in() {
                check_len(fan_in, self.layers[i - 1].len())?;
            }
            for unit in layer.units() {
                if !unit.ready_for_update() {
                    return Err(Error::DimensionMismatch {
                        expected: unit.weights().len(),
                        actual: unit.last_inputs().len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Verifies every example matches the network's input and output widths.
    pub fn validate(&self, examples: &[TrainingExample]) -> Result<()> {
        for example in examples {
            check_len(self.input_len(), example.input.len())?;
            check_len(self.output_len(), example.target.len())?;
        }
        Ok(())
    }

    /// Runs a single epoch: every example once, in a fresh random order drawn
    /// from `rng`, updating the weights after each one.
    ///
    /// Returns the training error of the epoch, half the mean over examples of
    /// each prediction's mean squared error. Predictions are taken before
    /// their own update.
    pub fn train_one_epoch<R>(
        &mut self,
        examples: &[TrainingExample],
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<f64>
    where
        R: Rng + ?Sized,
    {
        let mut order: Vec<&TrainingExample> = examples.iter().collect();
        order.shuffle(rng);

        let mut training_error = 0.0;
        for example in order {
            let prediction = self.predict(&example.input)?;
            self.backpropagate(&example.target, &prediction, learning_rate)?;
            training_error += mean_square_error(&prediction, &example.target);
        }
        if examples.is_empty() {
            return Ok(0.0);
        }
        Ok(training_error / (2.0 * examples.len() as f64))
    }

    /// Trains the network for exactly `epochs` epochs.
    ///
    /// Examples are shuffled with `thread_rng`, so the result is not
    /// reproducible; use `train_with_rng` to inject a seeded source.
    pub fn train(
        &mut self,
        examples: &[TrainingExample],
        epochs: usize,
        learning_rate: f64,
    ) -> Result<()> {
        self.train_with_rng(
            examples,
            epochs,
            learning_rate,
            &mut rand::thread_rng(),
        )
    }

    /// Trains the network for exactly `epochs` epochs, shuffling with `rng`.
    ///
    /// Every example is validated before the first update.
    pub fn train_with_rng<R>(
        &mut self,
        examples: &[TrainingExample],
        epochs: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<()>
    where
        R: Rng + ?Sized,
    {
        self.validate(examples)?;
        for epoch in 0..epochs {
            let training_error =
                self.train_one_epoch(examples, learning_rate, rng)?;
            debug!(epoch, mse = training_error, "epoch complete");
        }
        Ok(())
    }

    /// Runs every example through the network without updating it.
    pub fn test(
        &mut self,
        examples: &[TrainingExample],
    ) -> Result<Vec<TestRecord>> {
        let mut records = Vec::with_capacity(examples.len());
        for example in examples {
            let prediction = self.predict(&example.input)?;
            debug!(
                input = ?example.input,
                prediction = ?prediction,
                target = ?example.target,
                "test example"
            );
            records.push(TestRecord {
                input: example.input.clone(),
                prediction,
                target: example.target.clone(),
            });
        }
        Ok(records)
    }
}
