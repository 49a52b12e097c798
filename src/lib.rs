extern crate itertools;
extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod activator;
pub mod data;
pub mod error;
pub mod feed_forward;
pub mod layer;
pub mod model;
pub mod properties;
pub mod trainer;
pub mod unit;

mod utils;

pub use crate::activator::Activator;
pub use crate::data::{TestRecord, TrainingExample};
pub use crate::error::{Error, Result};
pub use crate::feed_forward::{GradientRule, Network, Wiring};
pub use crate::model::Model;
pub use crate::properties::Properties;
