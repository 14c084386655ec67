use std::any::Any;

use faunus_space::Space;

/// Takes observations of the committed simulation state at a configurable
/// cadence during a run (analysis hooks never see trial state — spec. 6).
pub trait Observer {
    fn observe(&mut self, space: &Space);
    fn flush(&mut self);
    fn name(&self) -> &str;
    fn as_any(&self) -> &dyn Any;
}

/// A set of observers, each invoked every `lag_time`-th macro step.
pub struct ObserversSet {
    n_called: u32,
    observers: Vec<Box<dyn Observer>>,
    lag_times: Vec<u32>,
}

impl ObserversSet {
    pub fn new() -> ObserversSet {
        ObserversSet { n_called: 0, observers: Vec::new(), lag_times: Vec::new() }
    }

    pub fn add_observer(&mut self, observer: Box<dyn Observer>, lag_time: u32) {
        self.observers.push(observer);
        self.lag_times.push(lag_time);
    }

    pub fn observe(&mut self, space: &Space) {
        for i in 0..self.observers.len() {
            if self.n_called % self.lag_times[i] == 0 {
                self.observers[i].observe(space);
            }
        }
        self.n_called += 1;
    }

    pub fn flush_observers(&mut self) {
        for o in self.observers.iter_mut() {
            o.flush();
        }
    }

    pub fn get_observer<T: 'static>(&self, name: &str) -> Option<&T> {
        for o in &self.observers {
            if name == o.name() {
                return o.as_any().downcast_ref::<T>();
            }
        }
        None
    }
}

impl Default for ObserversSet {
    fn default() -> Self {
        ObserversSet::new()
    }
}
