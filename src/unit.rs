//! A single neuron of a feedforward network.

use crate::activator::Activator;
use crate::error::{check_len, Error, Result};
use crate::utils::dot;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// What a unit does with its input vector.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Kind {
    /// Echoes the input at `index` unchanged. Owns no weights.
    Input { index: usize },
    /// Applies `activation` to the weighted sum of its inputs plus bias.
    Weighted { activation: Activator },
}

/// A single unit of the network.
///
/// Besides its trainable parameters, a unit caches the inputs, weighted sum
/// and output of its most recent forward pass. The backward pass reads those
/// caches, so a `forward` call must precede every update.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Unit {
    kind: Kind,
    weights: Vec<f64>,
    bias: f64,
    #[serde(skip)]
    last_inputs: Vec<f64>,
    #[serde(skip)]
    last_sum: f64,
    #[serde(skip)]
    last_output: f64,
}

impl Unit {
    /// Creates a passthrough unit reading element `index` of its input.
    pub fn input(index: usize) -> Self {
        Unit {
            kind: Kind::Input { index },
            weights: Vec::new(),
            bias: 0.0,
            last_inputs: Vec::new(),
            last_sum: 0.0,
            last_output: 0.0,
        }
    }

    /// Creates an untrained weighted unit.
    ///
    /// Every weight and the bias are independent draws from `U(-0.5, 0.5)`.
    pub fn weighted<R>(inputs: usize, activation: Activator, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let range = Uniform::new(-0.5, 0.5);
        let weights = (0..inputs).map(|_| range.sample(rng)).collect();
        Unit {
            kind: Kind::Weighted { activation },
            weights,
            bias: range.sample(rng),
            last_inputs: Vec::new(),
            last_sum: 0.0,
            last_output: 0.0,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_input(&self) -> bool {
        match self.kind {
            Kind::Input { .. } => true,
            Kind::Weighted { .. } => false,
        }
    }

    /// Returns the input index of a passthrough unit.
    pub fn input_index(&self) -> Option<usize> {
        match self.kind {
            Kind::Input { index } => Some(index),
            Kind::Weighted { .. } => None,
        }
    }

    /// Returns the activation function of a weighted unit.
    pub fn activation(&self) -> Option<Activator> {
        match self.kind {
            Kind::Input { .. } => None,
            Kind::Weighted { activation } => Some(activation),
        }
    }

    /// The unit's weights, one per input. Empty for input units.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// The output of the most recent forward pass.
    pub fn output(&self) -> f64 {
        self.last_output
    }

    /// The inputs seen by the most recent forward pass.
    pub fn last_inputs(&self) -> &[f64] {
        &self.last_inputs
    }

    /// Checks that `inputs` is a valid argument to `forward`.
    pub fn check_inputs(&self, inputs: &[f64]) -> Result<()> {
        match self.kind {
            Kind::Input { index } if index >= inputs.len() => {
                Err(Error::IndexOutOfRange {
                    index,
                    len: inputs.len(),
                })
            }
            Kind::Input { .. } => Ok(()),
            Kind::Weighted { .. } => check_len(self.weights.len(), inputs.len()),
        }
    }

    /// Computes this unit's output for `inputs`, caching both.
    ///
    /// Fails without touching the caches if `inputs` has the wrong length.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<f64> {
        self.check_inputs(inputs)?;
        let (sum, output) = match self.kind {
            Kind::Input { index } => (inputs[index], inputs[index]),
            Kind::Weighted { activation } => {
                let sum = dot(&self.weights, inputs) + self.bias;
                (sum, activation.f(sum))
            }
        };
        self.last_inputs.clear();
        self.last_inputs.extend_from_slice(inputs);
        self.last_sum = sum;
        self.last_output = output;
        Ok(output)
    }

    /// Replaces the activation function of a weighted unit.
    ///
    /// Input units have no activation, so this is a no-op for them.
    pub fn set_activation(&mut self, activation: Activator) {
        if let Kind::Weighted { activation: ref mut a } = self.kind {
            *a = activation;
        }
    }

    /// The derivative of the activation at the most recent forward pass.
    pub(crate) fn fprime(&self) -> f64 {
        match self.kind {
            Kind::Input { .. } => 1.0,
            Kind::Weighted { activation } => {
                activation.fprime(self.last_sum, self.last_output)
            }
        }
    }

    /// Returns true if the forward caches line up with the weights, i.e. an
    /// update can be applied.
    pub(crate) fn ready_for_update(&self) -> bool {
        self.is_input() || self.last_inputs.len() == self.weights.len()
    }

    /// Nudges every weight by `input * delta * rate` and the bias by
    /// `delta * rate`.
    pub(crate) fn apply_delta(&mut self, delta: f64, rate: f64) {
        if self.is_input() {
            return;
        }
        let step = delta * rate;
        for (w, x) in self.weights.iter_mut().zip(&self.last_inputs) {
            *w += x * step;
        }
        self.bias += step;
    }

    #[cfg(test)]
    pub(crate) fn set_parameters(&mut self, weights: Vec<f64>, bias: f64) {
        self.weights = weights;
        self.bias = bias;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn input_unit_echoes_its_index() {
        let mut unit = Unit::input(1);
        assert_eq!(unit.forward(&[3.0, 4.0, 5.0]), Ok(4.0));
        assert_eq!(unit.output(), 4.0);
        assert!(unit.weights().is_empty());
        assert_eq!(unit.input_index(), Some(1));
    }

    #[test]
    fn input_unit_index_out_of_range() {
        let mut unit = Unit::input(2);
        assert_eq!(
            unit.forward(&[1.0, 2.0]),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        );
    }

    #[test]
    fn weights_start_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let unit = Unit::weighted(50, Activator::Sigmoid, &mut rng);
        assert_eq!(unit.weights().len(), 50);
        for w in unit.weights().iter().chain(Some(&unit.bias())) {
            assert!(*w >= -0.5 && *w < 0.5);
        }
    }

    #[test]
    fn weighted_sum_then_activation() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut unit = Unit::weighted(2, Activator::ReLU, &mut rng);
        unit.set_parameters(vec![0.5, -1.0], 0.25);
        assert_eq!(unit.forward(&[2.0, 0.5]), Ok(0.75));
        assert_eq!(unit.forward(&[0.0, 1.0]), Ok(0.0));
        assert_eq!(unit.last_inputs(), &[0.0, 1.0]);
    }

    #[test]
    fn wrong_input_len() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut unit = Unit::weighted(3, Activator::Tanh, &mut rng);
        assert_eq!(
            unit.forward(&[1.0]),
            Err(Error::DimensionMismatch {
                expected: 3,
                actual: 1
            })
        );
        assert!(unit.last_inputs().is_empty());
    }

    #[test]
    fn set_activation() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut unit = Unit::weighted(1, Activator::Sigmoid, &mut rng);
        let weights = unit.weights().to_vec();
        unit.set_activation(Activator::Gaussian);
        assert_eq!(unit.activation(), Some(Activator::Gaussian));
        assert_eq!(unit.weights(), &weights[..]);

        let mut input = Unit::input(0);
        input.set_activation(Activator::Gaussian);
        assert_eq!(input.activation(), None);
    }

    #[test]
    fn apply_delta_uses_cached_inputs() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut unit = Unit::weighted(2, Activator::Sigmoid, &mut rng);
        unit.set_parameters(vec![0.0, 0.0], 0.0);
        unit.forward(&[1.0, -2.0]).unwrap();
        unit.apply_delta(0.5, 0.1);
        assert!((unit.weights()[0] - 0.05).abs() < 1e-12);
        assert!((unit.weights()[1] + 0.1).abs() < 1e-12);
        assert!((unit.bias() - 0.05).abs() < 1e-12);
    }
}
