use std::error::Error;
use std::fmt;

use crate::config::TrainingContract;

/// Failures raised by the model wrappers themselves.
///
/// Errors coming out of an estimator or an observer are never converted into
/// this type; they reach the caller as the `anyhow::Error` they were created as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// `predict` was called before any successful `fit`.
    Untrained { name: String },
    /// `Trainable::train` received the fit shape of the other contract.
    ContractMismatch {
        expected: TrainingContract,
        found: TrainingContract,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModelError::Untrained { name } => {
                write!(f, "Can't predict with untrained {}!", name)
            }
            ModelError::ContractMismatch { expected, found } => write!(
                f,
                "{} algorithm expects {} at fit time, got {}",
                expected,
                expected.fit_arguments(),
                found.fit_arguments()
            ),
        }
    }
}

impl Error for ModelError {}
