pub mod algorithm;
pub mod estimator_trait;
pub mod utils;

pub use algorithm::{
    Algorithm, Contract, FitArgs, Supervised, SupervisedAlgorithm, Trainable, Unsupervised,
    UnsupervisedAlgorithm,
};
pub use estimator_trait::{Estimator, SupervisedEstimator, UnsupervisedEstimator};
