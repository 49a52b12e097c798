//! Utilities for training neural networks.

use crate::data::TrainingExample;
use crate::error::Result;
use crate::feed_forward::Network;
use crate::properties::Properties;

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};
use tracing::info;

/// A builder for training networks with stochastic gradient descent.
///
/// Weights are updated after every example, and examples are reshuffled at
/// the start of every epoch.
#[derive(Debug)]
pub struct Trainer {
    network: Network,
    learning_rate: f64,
    logging: Logging,
    stop_condition: StopCondition,
    seed: Option<u64>,
}

impl Trainer {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * A learning rate of 0.1.
    /// * Stops after 1000 epochs.
    /// * Logs on training completion.
    /// * Shuffles with a freshly seeded random source.
    pub fn new(network: Network) -> Self {
        Trainer {
            network,
            learning_rate: 0.1,
            logging: Logging::Completion,
            stop_condition: StopCondition::Epochs(1000),
            seed: None,
        }
    }

    /// Builds a network from `properties` and a trainer that runs it for
    /// `properties.epochs` epochs at `properties.learning_rate`.
    pub fn from_properties(properties: &Properties) -> Result<Self> {
        let network = Network::from_properties(properties)?;
        let mut trainer = Trainer::new(network)
            .learning_rate(properties.learning_rate)
            .stop_condition(StopCondition::Epochs(properties.epochs));
        trainer.seed = properties.seed;
        Ok(trainer)
    }

    /// Sets the learning rate to use during gradient descent.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Sets the condition to finish training.
    pub fn stop_condition<C>(mut self, condition: C) -> Self
    where
        C: Into<StopCondition>,
    {
        self.stop_condition = condition.into();
        self
    }

    /// Seeds example shuffling, making training reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Trains the network using the provided labelled data.
    ///
    /// Returns:
    ///   The trained network, or an error if any example does not match the
    ///   network's input and output widths. Examples are checked before the
    ///   first update.
    pub fn train(mut self, examples: &[TrainingExample]) -> Result<Network> {
        self.network.validate(examples)?;
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let start_time = Instant::now();
        let mut epoch = 0;
        let mut training_error = 0.0;
        while !self.stop_condition.should_stop(epoch, training_error, start_time)
        {
            training_error = self.network.train_one_epoch(
                examples,
                self.learning_rate,
                &mut rng,
            )?;
            epoch += 1;
            self.logging.epoch(epoch, training_error);
        }
        self.logging.completion(epoch, training_error, start_time);
        Ok(self.network)
    }
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// Nothing is logged
    Silent,
    /// A summary is logged at completion
    Completion,
    /// A summary is logged after every `n` epochs, and at completion
    Iterations(usize),
}

impl Logging {
    /// Performs logging at the end of `epoch`.
    fn epoch(&self, epoch: usize, training_error: f64) {
        if let Logging::Iterations(freq) = *self {
            if freq > 0 && epoch % freq == 0 {
                info!(epoch, mse = training_error, "training progress");
            }
        }
    }

    /// Performs logging at the end of training.
    fn completion(
        &self,
        epochs: usize,
        training_error: f64,
        start_time: Instant,
    ) {
        if let Logging::Silent = *self {
            return;
        }
        info!(
            epochs,
            mse = training_error,
            seconds = start_time.elapsed().as_secs_f64(),
            "training complete"
        );
    }
}

/// When to stop training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StopCondition {
    /// Stops after the provided number of epochs
    Epochs(usize),
    /// Stops when the training error of an epoch drops below the provided
    /// threshold
    ErrorThreshold(f64),
    /// Stops after the provided duration
    Duration(Duration),
}

impl From<Duration> for StopCondition {
    fn from(duration: Duration) -> StopCondition {
        StopCondition::Duration(duration)
    }
}

impl StopCondition {
    /// Returns true if training is complete after `epoch` epochs.
    ///
    /// An error threshold is never met before the first epoch has run.
    fn should_stop(
        &self,
        epoch: usize,
        training_error: f64,
        start_time: Instant,
    ) -> bool {
        match *self {
            StopCondition::Epochs(epochs) => epoch >= epochs,
            StopCondition::ErrorThreshold(threshold) => {
                epoch > 0 && training_error < threshold
            }
            StopCondition::Duration(duration) => start_time.elapsed() > duration,
        }
    }
}
