use anyhow::Result;

use crate::config::Params;

/// The capability every wrapped estimator exposes, independent of how it is
/// trained. Feature, label and prediction types are whatever the estimator
/// library uses; the wrappers never look inside them.
pub trait Estimator: Sized {
    type Features;
    type Prediction;

    /// Predict for `x`. Only called by the wrappers once a fit succeeded.
    fn predict(&self, x: &Self::Features) -> Result<Self::Prediction>;

    /// Current named hyperparameters and learned attributes.
    fn params(&self) -> Params;
}

/// Estimators trained on features and labels (classifiers, regressors).
pub trait SupervisedEstimator: Estimator {
    type Labels;

    /// Train on `(x, y)` and return the trained estimator. Implementations
    /// that train in place can return a clone of themselves.
    fn fit(&self, x: &Self::Features, y: &Self::Labels) -> Result<Self>;
}

/// Estimators trained on features only (clustering, decomposition, mixtures).
pub trait UnsupervisedEstimator: Estimator {
    /// Train on `x` and return the trained estimator.
    fn fit(&self, x: &Self::Features) -> Result<Self>;
}
