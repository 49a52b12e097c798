use crate::activator::Activator;
use crate::error::Result;
use crate::unit::Unit;

use rand::Rng;

/// A single layer of the neural network
///
/// Every unit in a layer is of the same kind: either all passthrough input
/// units, or all weighted units sharing one fan-in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Layer {
    units: Vec<Unit>,
}

impl Layer {
    /// Initializes an input layer of `inputs` passthrough units.
    pub fn input(inputs: usize) -> Self {
        Layer {
            units: (0..inputs).map(Unit::input).collect(),
        }
    }

    /// Initializes a new, untrained layer.
    ///
    /// Arguments:
    ///
    ///  * `activator` - the activation function to be used for this layer's
    ///                  output.
    ///  * `inputs` - the number of inputs to each unit in this layer.
    ///  * `outputs` - the number of units in this layer.
    pub fn weighted<R>(
        activator: Activator,
        inputs: usize,
        outputs: usize,
        rng: &mut R,
    ) -> Self
    where
        R: Rng + ?Sized,
    {
        Layer {
            units: (0..outputs)
                .map(|_| Unit::weighted(inputs, activator, &mut *rng))
                .collect(),
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub(crate) fn units_mut(&mut self) -> &mut [Unit] {
        &mut self.units
    }

    /// Returns the number of units in this layer.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn is_input(&self) -> bool {
        self.units.iter().all(Unit::is_input)
    }

    /// Returns the number of inputs each unit expects, or `None` for an input
    /// layer.
    pub fn fan_in(&self) -> Option<usize> {
        self.units
            .iter()
            .find(|u| !u.is_input())
            .map(|u| u.weights().len())
    }

    /// Feeds the provided `inputs` forward through every unit of the layer.
    ///
    /// Returns the first unit failure. Units are validated against `inputs`
    /// before any of them runs, so a failure leaves every cache untouched.
    pub fn forward(&mut self, inputs: &[f64]) -> Result<Vec<f64>> {
        for unit in &self.units {
            unit.check_inputs(inputs)?;
        }
        self.units.iter_mut().map(|u| u.forward(inputs)).collect()
    }

    /// Sets the activation function of every unit in the layer.
    pub fn set_activation(&mut self, activator: Activator) {
        for unit in &mut self.units {
            unit.set_activation(activator);
        }
    }

    /// Returns the outputs of the most recent forward pass.
    pub fn outputs(&self) -> Vec<f64> {
        self.units.iter().map(Unit::output).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn input_layer_is_identity() {
        let mut layer = Layer::input(4);
        let inputs = [0.1, -2.0, 3.5, 0.0];
        assert_eq!(layer.forward(&inputs).unwrap(), inputs.to_vec());
        assert!(layer.is_input());
        assert_eq!(layer.fan_in(), None);
    }

    #[test]
    fn weighted_layer_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layer = Layer::weighted(Activator::Tanh, 3, 5, &mut rng);
        assert_eq!(layer.len(), 5);
        assert_eq!(layer.fan_in(), Some(3));
        let outputs = layer.forward(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(outputs.len(), 5);
        assert_eq!(outputs, layer.outputs());
    }

    #[test]
    fn mismatch_leaves_caches() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layer = Layer::weighted(Activator::Sigmoid, 2, 2, &mut rng);
        layer.forward(&[1.0, 1.0]).unwrap();
        let before = layer.outputs();
        assert_eq!(
            layer.forward(&[1.0]),
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(layer.outputs(), before);
    }

    #[test]
    fn set_activation_broadcasts() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut layer = Layer::weighted(Activator::Sigmoid, 2, 3, &mut rng);
        layer.set_activation(Activator::Mish);
        assert!(layer
            .units()
            .iter()
            .all(|u| u.activation() == Some(Activator::Mish)));
    }
}
