//! Observer registration and change notification.
//!
//! A GUI view registers itself on a model and gets called back with an
//! event and a reference to the model that raised it. The event type is a
//! parameter of the observer and defaults to [`Event`]. Observers are called
//! in registration order, and the first one that fails stops the
//! notification: the remaining observers are not called and the error is
//! handed back to whoever raised the event.
use std::any::Any;
use std::fmt;
use std::rc::Rc;

use anyhow::Result;

/// Default event type: something that changed on a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    Fitted,
    ParamsChanged,
    DataChanged,
    /// Application defined event, never inspected by this crate.
    Custom(String),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Fitted => f.write_str("fitted"),
            Event::ParamsChanged => f.write_str("params_changed"),
            Event::DataChanged => f.write_str("data_changed"),
            Event::Custom(name) => f.write_str(name),
        }
    }
}

/// Receives `Ev` notifications from models of type `S`.
pub trait Observer<S: ?Sized, Ev = Event> {
    fn update(&self, event: &Ev, source: &S) -> Result<()>;
}

/// Closures can be registered directly.
impl<S: ?Sized, Ev, F> Observer<S, Ev> for F
where
    F: Fn(&Ev, &S) -> Result<()>,
{
    fn update(&self, event: &Ev, source: &S) -> Result<()> {
        self(event, source)
    }
}

/// Observer list plus an opaque data slot, embedded in every model.
pub struct Observable<S: ?Sized, Ev = Event> {
    observers: Vec<Rc<dyn Observer<S, Ev>>>,
    data: Option<Box<dyn Any>>,
}

impl<S: ?Sized, Ev> Observable<S, Ev> {
    pub fn new() -> Self {
        Observable {
            observers: Vec::new(),
            data: None,
        }
    }

    /// Register an observer. Observers are never removed.
    pub fn add_observer(&mut self, observer: Rc<dyn Observer<S, Ev>>) {
        self.observers.push(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Call `update(event, source)` on every observer in registration order.
    ///
    /// Stops at the first observer returning an error and returns that error
    /// unchanged.
    pub fn notify(&self, event: &Ev, source: &S) -> Result<()> {
        for (idx, observer) in self.observers.iter().enumerate() {
            log::trace!("Notifying observer {}/{}", idx + 1, self.observers.len());
            observer.update(event, source)?;
        }
        Ok(())
    }

    pub fn set_data<T: Any>(&mut self, value: T) {
        self.data = Some(Box::new(value));
    }

    /// The stored data, if there is any and it is a `T`.
    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.as_ref().and_then(|d| d.downcast_ref::<T>())
    }

    pub fn data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.data.as_mut().and_then(|d| d.downcast_mut::<T>())
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    pub fn take_data(&mut self) -> Option<Box<dyn Any>> {
        self.data.take()
    }
}

impl<S: ?Sized, Ev> Default for Observable<S, Ev> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, Ev> fmt::Debug for Observable<S, Ev> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("observers", &self.observers.len())
            .field("has_data", &self.data.is_some())
            .finish()
    }
}
