//! A host-side handle pairing hyperparameters with the network they build.

use crate::activator::Activator;
use crate::data::{TestRecord, TrainingExample};
use crate::error::{Error, Result};
use crate::feed_forward::Network;
use crate::properties::Properties;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

/// A network together with the properties it was built from.
///
/// A model starts out unbuilt; every network operation fails with
/// `Error::NotBuilt` until `build` has run. Once built, the network's
/// structure is fixed until the model is rebuilt or reset.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Model {
    properties: Properties,
    network: Option<Network>,
}

impl Model {
    /// Creates an unbuilt model.
    pub fn new(properties: Properties) -> Self {
        Model {
            properties,
            network: None,
        }
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Replaces the properties. A built network is kept as is until the next
    /// `build`.
    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }

    pub fn is_built(&self) -> bool {
        self.network.is_some()
    }

    /// Builds a fresh network from the current properties, replacing any
    /// previous one.
    pub fn build(&mut self) -> Result<&mut Network> {
        let network = Network::from_properties(&self.properties)?;
        info!(
            layers = network.layers().len(),
            inputs = network.input_len(),
            outputs = network.output_len(),
            "built network"
        );
        Ok(self.network.insert(network))
    }

    /// Discards the network, returning the model to its unbuilt state.
    pub fn reset(&mut self) -> Option<Network> {
        self.network.take()
    }

    pub fn network(&self) -> Result<&Network> {
        self.network.as_ref().ok_or(Error::NotBuilt)
    }

    pub fn network_mut(&mut self) -> Result<&mut Network> {
        self.network.as_mut().ok_or(Error::NotBuilt)
    }

    pub fn predict(&mut self, input: &[f64]) -> Result<Vec<f64>> {
        self.network_mut()?.predict(input)
    }

    /// Trains the network for `properties.epochs` epochs at
    /// `properties.learning_rate`. Shuffling is seeded from
    /// `properties.seed` when present.
    pub fn train(&mut self, examples: &[TrainingExample]) -> Result<()> {
        let epochs = self.properties.epochs;
        let rate = self.properties.learning_rate;
        let seed = self.properties.seed;
        let network = self.network_mut()?;
        match seed {
            Some(seed) => network.train_with_rng(
                examples,
                epochs,
                rate,
                &mut StdRng::seed_from_u64(seed),
            ),
            None => network.train(examples, epochs, rate),
        }
    }

    pub fn test(
        &mut self,
        examples: &[TrainingExample],
    ) -> Result<Vec<TestRecord>> {
        self.network_mut()?.test(examples)
    }

    pub fn set_activation(
        &mut self,
        layer: usize,
        activator: Activator,
    ) -> Result<()> {
        self.network_mut()?.set_activation(layer, activator)
    }
}
