//! Wrap a toy clusterer, time a fit, and predict.
//!
//! Run with `PK_LOG=debug cargo run --example timed_fit` to see the wrapper logs.
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use log::LevelFilter;
use ndarray::{array, Array1, Array2, Axis};

use pk_models::{Estimator, Event, Params, UnsupervisedAlgorithm, UnsupervisedEstimator};

/// Uses the first `n_components` rows as centres and assigns each sample to
/// the closest one.
#[derive(Debug, Clone)]
struct FirstRowsClusterer {
    n_components: usize,
    centres: Option<Array2<f64>>,
}

impl Estimator for FirstRowsClusterer {
    type Features = Array2<f64>;
    type Prediction = Array1<usize>;

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        let centres = self
            .centres
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("no centres"))?;
        Ok(x.axis_iter(Axis(0))
            .map(|row| {
                centres
                    .axis_iter(Axis(0))
                    .map(|c| (&c - &row).mapv(|d| d * d).sum())
                    .enumerate()
                    .fold((0, f64::INFINITY), |best, (i, d)| {
                        if d < best.1 {
                            (i, d)
                        } else {
                            best
                        }
                    })
                    .0
            })
            .collect())
    }

    fn params(&self) -> Params {
        let mut params = Params::new();
        params.insert("n_components".to_string(), self.n_components.into());
        params.insert(
            "centres".to_string(),
            self.centres
                .as_ref()
                .map(|c| c.iter().copied().collect::<Vec<f64>>())
                .into(),
        );
        params
    }
}

impl UnsupervisedEstimator for FirstRowsClusterer {
    fn fit(&self, x: &Array2<f64>) -> Result<Self> {
        let k = self.n_components.min(x.nrows());
        Ok(FirstRowsClusterer {
            n_components: self.n_components,
            centres: Some(x.slice(ndarray::s![..k, ..]).to_owned()),
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("PK_LOG", "error,pk_models=info"))
        .init();

    let x = array![
        [5.1, 3.5, 1.4, 0.2],
        [7.0, 3.2, 4.7, 1.4],
        [6.3, 3.3, 6.0, 2.5],
        [4.9, 3.0, 1.4, 0.2],
        [6.4, 3.2, 4.5, 1.5],
        [5.8, 2.7, 5.1, 1.9],
    ];

    let mut algo = UnsupervisedAlgorithm::new(FirstRowsClusterer {
        n_components: 3,
        centres: None,
    });
    algo.add_observer(Rc::new(
        |event: &Event, source: &UnsupervisedAlgorithm<FirstRowsClusterer>| -> Result<()> {
            println!(
                "observer: {} on {} (fitted={})",
                event,
                source.name(),
                source.is_fitted()
            );
            Ok(())
        },
    ));

    println!("{:?}", algo.params());
    println!("fitted: {}", algo.is_fitted());

    let start = Instant::now();
    algo.fit(&x)?;
    println!("Took {:.6} secs", start.elapsed().as_secs_f64());
    algo.notify(Event::Fitted)?;

    println!("fitted: {}", algo.is_fitted());
    println!("{:?}", algo);
    println!("prediction: {}", algo.predict(&array![[1.0, 2.0, 3.0, 4.0]])?);

    Ok(())
}
