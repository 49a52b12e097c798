//! Activation function types.

use crate::error::Error;

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// [Activation function](https://en.wikipedia.org/wiki/Activation_function)
/// types.
///
/// The catalog is closed: every variant maps to a fixed scalar function, and
/// selecting one is a plain `match`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activator {
    /// Logistic function, `1 / (1 + e^-x)`
    Sigmoid,
    /// Hyperbolic tan function
    Tanh,
    /// Rectified Linear Unit
    ReLU,
    /// Leaky Rectified Linear Unit, with a fixed slope of 0.01 for negative
    /// inputs.
    LeakyReLU,
    /// Exponential Linear Unit, with a fixed alpha of 0.01.
    ELU,
    /// `ln(1 + e^x)`
    SoftPlus,
    /// `x * sigmoid(x)`
    Swish,
    /// `x * tanh(softplus(x))`
    Mish,
    /// Heaviside step, with `f(0) = 1`.
    BinaryStep,
    /// `e^(-x^2)`
    Gaussian,
}

const LEAK: f64 = 0.01;

impl Activator {
    /// Every activation function, in ordinal order.
    pub const ALL: [Activator; 10] = [
        Activator::Sigmoid,
        Activator::Tanh,
        Activator::ReLU,
        Activator::LeakyReLU,
        Activator::ELU,
        Activator::SoftPlus,
        Activator::Swish,
        Activator::Mish,
        Activator::BinaryStep,
        Activator::Gaussian,
    ];

    /// Evaluates `f(x)` for the selected activation function.
    pub fn f(&self, x: f64) -> f64 {
        match *self {
            Activator::Sigmoid => sigmoid(x),
            Activator::Tanh => x.tanh(),
            Activator::ReLU => x.max(0.0),
            Activator::LeakyReLU => (LEAK * x).max(x),
            Activator::ELU => {
                if x >= 0.0 {
                    x
                } else {
                    LEAK * (x.exp() - 1.0)
                }
            }
            Activator::SoftPlus => softplus(x),
            Activator::Swish => x * sigmoid(x),
            Activator::Mish => x * softplus(x).tanh(),
            Activator::BinaryStep => {
                if x < 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Activator::Gaussian => (-x * x).exp(),
        }
    }

    /// Evaluates the derivative `f'(x)`.
    ///
    /// `y` must be `f(x)`. Passing both lets the cheap output-form
    /// derivatives (sigmoid, tanh, gaussian) skip recomputing the activation.
    pub fn fprime(&self, x: f64, y: f64) -> f64 {
        match *self {
            Activator::Sigmoid => y * (1.0 - y),
            Activator::Tanh => 1.0 - y * y,
            Activator::ReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Activator::LeakyReLU => {
                if x > 0.0 {
                    1.0
                } else {
                    LEAK
                }
            }
            Activator::ELU => {
                if x >= 0.0 {
                    1.0
                } else {
                    LEAK * x.exp()
                }
            }
            Activator::SoftPlus => sigmoid(x),
            Activator::Swish => {
                let s = sigmoid(x);
                s + x * s * (1.0 - s)
            }
            Activator::Mish => {
                let t = softplus(x).tanh();
                t + x * (1.0 - t * t) * sigmoid(x)
            }
            Activator::BinaryStep => 0.0,
            Activator::Gaussian => -2.0 * x * y,
        }
    }

    /// Returns the canonical name of the activation function.
    pub fn name(&self) -> &'static str {
        match *self {
            Activator::Sigmoid => "Sigmoid",
            Activator::Tanh => "Tanh",
            Activator::ReLU => "ReLU",
            Activator::LeakyReLU => "LeakyReLU",
            Activator::ELU => "ELU",
            Activator::SoftPlus => "SoftPlus",
            Activator::Swish => "Swish",
            Activator::Mish => "Mish",
            Activator::BinaryStep => "BinaryStep",
            Activator::Gaussian => "Gaussian",
        }
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn softplus(x: f64) -> f64 {
    // Split so that large positive inputs don't overflow through e^x.
    if x > 0.0 {
        x + (-x).exp().ln_1p()
    } else {
        x.exp().ln_1p()
    }
}

impl Default for Activator {
    fn default() -> Self {
        Activator::Sigmoid
    }
}

impl fmt::Display for Activator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Activator {
    type Err = Error;

    /// Parses a catalog name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Activator::ALL
            .iter()
            .find(|a| a.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::UnknownActivation(s.to_owned()))
    }
}

impl TryFrom<usize> for Activator {
    type Error = Error;

    /// Looks up an activation function by its ordinal in `Activator::ALL`.
    fn try_from(ordinal: usize) -> Result<Self, Self::Error> {
        Activator::ALL
            .get(ordinal)
            .copied()
            .ok_or_else(|| Error::UnknownActivation(ordinal.to_string()))
    }
}
