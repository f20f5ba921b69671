use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;

use crate::config::{Params, TrainingContract};
use crate::error::ModelError;
use crate::models::estimator_trait::{Estimator, SupervisedEstimator, UnsupervisedEstimator};
use crate::models::utils::short_type_name;
use crate::observer::{Event, Observable, Observer};

/// Type-level tag selecting the `fit` shape of an [`Algorithm`].
pub trait Contract {
    const CONTRACT: TrainingContract;
}

/// `fit(x, y)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Supervised;

/// `fit(x)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unsupervised;

impl Contract for Supervised {
    const CONTRACT: TrainingContract = TrainingContract::Supervised;
}

impl Contract for Unsupervised {
    const CONTRACT: TrainingContract = TrainingContract::Unsupervised;
}

/// Observable wrapper around an estimator.
///
/// Tracks whether the estimator has been fitted and refuses to predict until
/// it has. `fit` is only available on [`SupervisedAlgorithm`] and
/// [`UnsupervisedAlgorithm`], each with the argument list of its contract.
/// Observers receive events of type `Ev`, [`Event`] unless the wrapper is
/// built with [`Algorithm::with_events`].
pub struct Algorithm<E, K, Ev = Event> {
    estimator: E,
    name: String,
    fitted: bool,
    observable: Observable<Algorithm<E, K, Ev>, Ev>,
    contract: PhantomData<K>,
}

pub type SupervisedAlgorithm<E, Ev = Event> = Algorithm<E, Supervised, Ev>;
pub type UnsupervisedAlgorithm<E, Ev = Event> = Algorithm<E, Unsupervised, Ev>;

impl<E: Estimator, K: Contract> Algorithm<E, K> {
    /// Wrap `estimator`; observers receive [`Event`]s.
    pub fn new(estimator: E) -> Self {
        Self::with_events(estimator)
    }
}

impl<E: Estimator, K: Contract, Ev> Algorithm<E, K, Ev> {
    /// Wrap `estimator` with observers notified of application defined events.
    pub fn with_events(estimator: E) -> Self {
        let name = short_type_name::<E>();
        log::debug!("Wrapping {} as {} algorithm", name, K::CONTRACT);
        Algorithm {
            estimator,
            name,
            fitted: false,
            observable: Observable::new(),
            contract: PhantomData,
        }
    }

    /// Type name of the wrapped estimator, captured at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contract(&self) -> TrainingContract {
        K::CONTRACT
    }

    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Hyperparameters of the estimator currently held. After a fit this is
    /// the estimator returned by the fit call.
    pub fn params(&self) -> Params {
        self.estimator.params()
    }

    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    pub fn into_estimator(self) -> E {
        self.estimator
    }

    /// Forward `x` to the estimator. Fails with [`ModelError::Untrained`]
    /// before the first successful fit.
    pub fn predict(&self, x: &E::Features) -> Result<E::Prediction> {
        if !self.fitted {
            log::warn!("Refusing to predict with untrained {}", self.name);
            return Err(ModelError::Untrained {
                name: self.name.clone(),
            }
            .into());
        }
        self.estimator.predict(x)
    }

    /// Run `fit` against the held estimator and keep what it returns.
    ///
    /// On error nothing changes: the previous estimator and fitted flag stay.
    fn apply_fit<F>(&mut self, fit: F) -> Result<()>
    where
        F: FnOnce(&E) -> Result<E>,
    {
        log::debug!("Fitting {}", self.name);
        let start = Instant::now();
        let trained = fit(&self.estimator)?;
        self.estimator = trained;
        self.fitted = true;
        log::debug!(
            "Fitted {} in {:.3}s",
            self.name,
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    pub fn add_observer(&mut self, observer: Rc<dyn Observer<Self, Ev>>) {
        self.observable.add_observer(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observable.observer_count()
    }

    /// Tell every observer about `event`, passing this algorithm as source.
    /// Stops at the first observer error and returns it.
    pub fn notify(&self, event: Ev) -> Result<()> {
        log::trace!("{} raised an event", self.name);
        self.observable.notify(&event, self)
    }

    pub fn observable(&self) -> &Observable<Self, Ev> {
        &self.observable
    }

    pub fn observable_mut(&mut self) -> &mut Observable<Self, Ev> {
        &mut self.observable
    }
}

impl<E: SupervisedEstimator, Ev> Algorithm<E, Supervised, Ev> {
    /// Fit on features and labels.
    ///
    /// ```
    /// use pk_models::{Estimator, Params, SupervisedAlgorithm, SupervisedEstimator};
    ///
    /// struct Echo;
    ///
    /// impl Estimator for Echo {
    ///     type Features = Vec<f64>;
    ///     type Prediction = Vec<f64>;
    ///
    ///     fn predict(&self, x: &Vec<f64>) -> anyhow::Result<Vec<f64>> {
    ///         Ok(x.clone())
    ///     }
    ///
    ///     fn params(&self) -> Params {
    ///         Params::new()
    ///     }
    /// }
    ///
    /// impl SupervisedEstimator for Echo {
    ///     type Labels = Vec<i32>;
    ///
    ///     fn fit(&self, _x: &Vec<f64>, _y: &Vec<i32>) -> anyhow::Result<Self> {
    ///         Ok(Echo)
    ///     }
    /// }
    ///
    /// let mut algo = SupervisedAlgorithm::new(Echo);
    /// algo.fit(&vec![1.0, 2.0], &vec![0, 1]).unwrap();
    /// assert!(algo.is_fitted());
    /// ```
    ///
    /// Leaving out the labels does not compile:
    ///
    /// ```compile_fail
    /// use pk_models::{Estimator, Params, SupervisedAlgorithm, SupervisedEstimator};
    ///
    /// struct Echo;
    ///
    /// impl Estimator for Echo {
    ///     type Features = Vec<f64>;
    ///     type Prediction = Vec<f64>;
    ///
    ///     fn predict(&self, x: &Vec<f64>) -> anyhow::Result<Vec<f64>> {
    ///         Ok(x.clone())
    ///     }
    ///
    ///     fn params(&self) -> Params {
    ///         Params::new()
    ///     }
    /// }
    ///
    /// impl SupervisedEstimator for Echo {
    ///     type Labels = Vec<i32>;
    ///
    ///     fn fit(&self, _x: &Vec<f64>, _y: &Vec<i32>) -> anyhow::Result<Self> {
    ///         Ok(Echo)
    ///     }
    /// }
    ///
    /// let mut algo = SupervisedAlgorithm::new(Echo);
    /// algo.fit(&vec![1.0, 2.0]).unwrap();
    /// ```
    pub fn fit(&mut self, x: &E::Features, y: &E::Labels) -> Result<()> {
        self.apply_fit(|estimator| SupervisedEstimator::fit(estimator, x, y))
    }
}

impl<E: UnsupervisedEstimator, Ev> Algorithm<E, Unsupervised, Ev> {
    pub fn fit(&mut self, x: &E::Features) -> Result<()> {
        self.apply_fit(|estimator| UnsupervisedEstimator::fit(estimator, x))
    }
}

impl<E: Estimator + Default, K: Contract, Ev> Default for Algorithm<E, K, Ev> {
    fn default() -> Self {
        Self::with_events(E::default())
    }
}

impl<E: Estimator, K: Contract, Ev> fmt::Debug for Algorithm<E, K, Ev> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Algorithm")
            .field("name", &self.name)
            .field("contract", &K::CONTRACT)
            .field("fitted", &self.fitted)
            .field("params", &self.estimator.params())
            .field("observers", &self.observable.observer_count())
            .finish()
    }
}

/// Arguments of a `fit` call whose shape is only known at runtime.
#[derive(Debug)]
pub enum FitArgs<'a, X, Y> {
    Features(&'a X),
    Labelled(&'a X, &'a Y),
}

impl<X, Y> FitArgs<'_, X, Y> {
    /// The contract this argument list satisfies.
    pub fn contract(&self) -> TrainingContract {
        match self {
            FitArgs::Features(_) => TrainingContract::Unsupervised,
            FitArgs::Labelled(..) => TrainingContract::Supervised,
        }
    }
}

/// Drive any algorithm wrapper without knowing its contract up front.
///
/// Unsupervised wrappers use `()` as their label type.
pub trait Trainable {
    type Features;
    type Labels;
    type Prediction;

    fn name(&self) -> &str;

    fn contract(&self) -> TrainingContract;

    fn is_fitted(&self) -> bool;

    fn params(&self) -> Params;

    /// Fit with `args`, failing with [`ModelError::ContractMismatch`] when
    /// their shape does not match [`Trainable::contract`].
    fn train(&mut self, args: FitArgs<'_, Self::Features, Self::Labels>) -> Result<()>;

    fn predict(&self, x: &Self::Features) -> Result<Self::Prediction>;
}

fn mismatch(expected: TrainingContract, found: TrainingContract) -> anyhow::Error {
    log::warn!(
        "Rejected fit: {} algorithm given {}",
        expected,
        found.fit_arguments()
    );
    ModelError::ContractMismatch { expected, found }.into()
}

impl<E: SupervisedEstimator, Ev> Trainable for Algorithm<E, Supervised, Ev> {
    type Features = E::Features;
    type Labels = E::Labels;
    type Prediction = E::Prediction;

    fn name(&self) -> &str {
        Algorithm::name(self)
    }

    fn contract(&self) -> TrainingContract {
        Supervised::CONTRACT
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn params(&self) -> Params {
        Algorithm::params(self)
    }

    fn train(&mut self, args: FitArgs<'_, E::Features, E::Labels>) -> Result<()> {
        match args {
            FitArgs::Labelled(x, y) => self.fit(x, y),
            other => Err(mismatch(Supervised::CONTRACT, other.contract())),
        }
    }

    fn predict(&self, x: &E::Features) -> Result<E::Prediction> {
        Algorithm::predict(self, x)
    }
}

impl<E: UnsupervisedEstimator, Ev> Trainable for Algorithm<E, Unsupervised, Ev> {
    type Features = E::Features;
    type Labels = ();
    type Prediction = E::Prediction;

    fn name(&self) -> &str {
        Algorithm::name(self)
    }

    fn contract(&self) -> TrainingContract {
        Unsupervised::CONTRACT
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn params(&self) -> Params {
        Algorithm::params(self)
    }

    fn train(&mut self, args: FitArgs<'_, E::Features, ()>) -> Result<()> {
        match args {
            FitArgs::Features(x) => self.fit(x),
            other => Err(mismatch(Unsupervised::CONTRACT, other.contract())),
        }
    }

    fn predict(&self, x: &E::Features) -> Result<E::Prediction> {
        Algorithm::predict(self, x)
    }
}
