//! Hyperparameters describing a network and how it is trained.

use crate::activator::Activator;
use crate::feed_forward::{GradientRule, Wiring};

/// The hyperparameter record a host supplies to build and train a network.
///
/// Every field has a default, so a partially specified record deserializes
/// into a usable configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    pub num_inputs: usize,
    pub num_hidden_layers: usize,
    pub neurons_per_hidden_layer: usize,
    pub num_outputs: usize,
    pub epochs: usize,
    pub learning_rate: f64,
    /// The activation function every weighted layer starts with.
    pub activation: Activator,
    pub wiring: Wiring,
    pub gradient: GradientRule,
    /// Seeds weight initialization and example shuffling. Training is
    /// non-deterministic when unset.
    pub seed: Option<u64>,
}

impl Default for Properties {
    /// A 2-2-2-1 sigmoid network trained for 10000 epochs at rate 0.1.
    fn default() -> Self {
        Properties {
            num_inputs: 2,
            num_hidden_layers: 2,
            neurons_per_hidden_layer: 2,
            num_outputs: 1,
            epochs: 10_000,
            learning_rate: 0.1,
            activation: Activator::Sigmoid,
            wiring: Wiring::default(),
            gradient: GradientRule::default(),
            seed: None,
        }
    }
}

impl Properties {
    /// Returns the width of every layer, input layer first.
    pub fn layer_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::with_capacity(self.num_hidden_layers + 2);
        sizes.push(self.num_inputs);
        sizes.extend(
            (0..self.num_hidden_layers).map(|_| self.neurons_per_hidden_layer),
        );
        sizes.push(self.num_outputs);
        sizes
    }
}
