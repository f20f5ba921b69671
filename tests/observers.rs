//! Integration tests for observer notification on algorithm wrappers.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{bail, Result};
use ndarray::{array, Array1, Array2};

use pk_models::{Estimator, Event, Observer, Params, UnsupervisedAlgorithm, UnsupervisedEstimator};

#[derive(Debug, Clone, Default)]
struct Means {
    means: Option<Array1<f64>>,
}

impl Estimator for Means {
    type Features = Array2<f64>;
    type Prediction = Array1<usize>;

    fn predict(&self, x: &Array2<f64>) -> Result<Array1<usize>> {
        Ok(Array1::zeros(x.nrows()))
    }

    fn params(&self) -> Params {
        Params::new()
    }
}

impl UnsupervisedEstimator for Means {
    fn fit(&self, x: &Array2<f64>) -> Result<Self> {
        Ok(Means {
            means: x.mean_axis(ndarray::Axis(0)),
        })
    }
}

type Model = UnsupervisedAlgorithm<Means>;

/// Records every call as `(observer id, event, source fitted flag)`.
struct Recorder {
    id: usize,
    calls: Rc<RefCell<Vec<(usize, Event, bool)>>>,
    fail: bool,
}

impl Observer<Model> for Recorder {
    fn update(&self, event: &Event, source: &Model) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((self.id, event.clone(), source.is_fitted()));
        if self.fail {
            bail!("observer {} rejected {}", self.id, event);
        }
        Ok(())
    }
}

fn recorders(
    model: &mut Model,
    count: usize,
    failing: Option<usize>,
) -> Rc<RefCell<Vec<(usize, Event, bool)>>> {
    let calls = Rc::new(RefCell::new(Vec::new()));
    for id in 0..count {
        model.add_observer(Rc::new(Recorder {
            id,
            calls: Rc::clone(&calls),
            fail: failing == Some(id),
        }));
    }
    calls
}

#[test]
fn each_observer_called_once_in_registration_order() {
    let mut model = Model::new(Means::default());
    let calls = recorders(&mut model, 4, None);
    assert_eq!(model.observer_count(), 4);

    model.notify(Event::ParamsChanged).unwrap();

    let calls = calls.borrow();
    let ids: Vec<usize> = calls.iter().map(|(id, _, _)| *id).collect();
    assert_eq!(ids, vec![0, 1, 2, 3]);
    assert!(calls
        .iter()
        .all(|(_, event, fitted)| *event == Event::ParamsChanged && !*fitted));
}

#[test]
fn observers_receive_the_wrapper_as_source() {
    let mut model = Model::new(Means::default());
    let seen = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&seen);
    model.add_observer(Rc::new(move |event: &Event, source: &Model| -> Result<()> {
        *sink.borrow_mut() = Some((
            event.clone(),
            source.name().to_string(),
            source.estimator().means.clone(),
        ));
        Ok(())
    }));

    model.fit(&array![[0.0, 2.0], [2.0, 4.0]]).unwrap();
    // fit on its own does not notify
    assert!(seen.borrow().is_none());

    model.notify(Event::Fitted).unwrap();
    assert_eq!(
        *seen.borrow(),
        Some((
            Event::Fitted,
            "Means".to_string(),
            Some(array![1.0, 3.0])
        ))
    );
}

#[test]
fn first_failing_observer_stops_notification() {
    let mut model = Model::new(Means::default());
    let calls = recorders(&mut model, 3, Some(0));

    let err = model
        .notify(Event::Custom("redraw".to_string()))
        .unwrap_err();

    assert_eq!(err.to_string(), "observer 0 rejected redraw");
    assert_eq!(calls.borrow().len(), 1);
    assert_eq!(calls.borrow()[0].0, 0);
}

#[test]
fn middle_failure_keeps_earlier_calls() {
    let mut model = Model::new(Means::default());
    let calls = recorders(&mut model, 3, Some(1));

    assert!(model.notify(Event::DataChanged).is_err());
    let ids: Vec<usize> = calls.borrow().iter().map(|(id, _, _)| *id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn data_slot_is_exposed_through_the_wrapper() {
    let mut model = Model::new(Means::default());
    assert!(!model.observable().has_data());

    model
        .observable_mut()
        .set_data(array![[1.0, 2.0], [3.0, 4.0]]);
    let data = model.observable().data::<Array2<f64>>().cloned();
    assert_eq!(data, Some(array![[1.0, 2.0], [3.0, 4.0]]));

    model.fit(&data.unwrap()).unwrap();
    assert_eq!(model.estimator().means, Some(array![2.0, 3.0]));
}

// ---------------------------------------------------------------------------
// Application defined events
// ---------------------------------------------------------------------------

/// Event a plotting view might raise, carrying its own payload.
#[derive(Debug, Clone, PartialEq)]
enum PlotEvent {
    Zoom { factor: f64 },
    Highlight(Vec<usize>),
}

type PlotModel = UnsupervisedAlgorithm<Means, PlotEvent>;

#[test]
fn wrapper_forwards_application_defined_events() {
    let mut model: PlotModel = UnsupervisedAlgorithm::with_events(Means::default());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    model.add_observer(Rc::new(
        move |event: &PlotEvent, source: &PlotModel| -> Result<()> {
            sink.borrow_mut().push((event.clone(), source.name().to_string()));
            Ok(())
        },
    ));

    model.notify(PlotEvent::Zoom { factor: 2.0 }).unwrap();
    model.notify(PlotEvent::Highlight(vec![0, 3])).unwrap();

    assert_eq!(
        *seen.borrow(),
        vec![
            (PlotEvent::Zoom { factor: 2.0 }, "Means".to_string()),
            (PlotEvent::Highlight(vec![0, 3]), "Means".to_string()),
        ]
    );
}

#[test]
fn application_events_stop_at_first_failing_observer() {
    let mut model: PlotModel = UnsupervisedAlgorithm::with_events(Means::default());
    let calls = Rc::new(RefCell::new(0usize));
    for fail in [true, false] {
        let calls = Rc::clone(&calls);
        model.add_observer(Rc::new(
            move |event: &PlotEvent, _source: &PlotModel| -> Result<()> {
                *calls.borrow_mut() += 1;
                if fail {
                    bail!("cannot handle {:?}", event);
                }
                Ok(())
            },
        ));
    }

    let err = model.notify(PlotEvent::Highlight(vec![1])).unwrap_err();
    assert_eq!(err.to_string(), "cannot handle Highlight([1])");
    assert_eq!(*calls.borrow(), 1);
}
