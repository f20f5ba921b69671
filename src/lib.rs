//! pk-models: observable model wrappers for GUI model layers.
//!
//! This crate wraps externally supplied estimators (classifiers, clustering,
//! mixtures, ...) so a graphical front end can tell whether a model has been
//! trained, show its hyperparameters, and get notified when the model changes.
//! All learning is delegated to the wrapped estimator through the traits in
//! [`models::estimator_trait`].
//!
//! The wrappers are single-threaded: observers are shared through `Rc` and
//! every call runs to completion on the caller's thread.
pub mod config;
pub mod error;
pub mod models;
pub mod observer;

pub use config::{ParamValue, Params, TrainingContract};
pub use error::ModelError;
pub use models::{
    Algorithm, Estimator, FitArgs, SupervisedAlgorithm, SupervisedEstimator, Trainable,
    UnsupervisedAlgorithm, UnsupervisedEstimator,
};
pub use observer::{Event, Observable, Observer};
