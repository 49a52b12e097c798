//! Error types returned by the network engine.

use thiserror::Error;

/// Errors raised while building, evaluating or training a network.
///
/// Every error is local and synchronous. A failing call leaves the network
/// weights exactly as they were before the call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// An activation function name or ordinal did not match the catalog.
    #[error("unknown activation function `{0}`")]
    UnknownActivation(String),
    /// A vector did not have the length the network expected.
    #[error("dimension mismatch: expected {expected} values, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    /// A layer or input index was outside its valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// The model was used before its network was built.
    #[error("network has not been built")]
    NotBuilt,
    /// The requested layer sizes cannot form a network.
    #[error("invalid topology: {0}")]
    InvalidTopology(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Returns a `DimensionMismatch` unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::DimensionMismatch { expected, actual })
    }
}
