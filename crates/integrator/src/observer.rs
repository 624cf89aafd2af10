use std::ops::ControlFlow;

use crate::TickSnapshot;

/// Receives every completed step. Returning `ControlFlow::Break` ends the run
/// after the current step.
pub trait Observer {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()>;
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        (**self).on_tick(snapshot)
    }
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        (**self).on_tick(snapshot)
    }
}

/// Fan-out to several observers. Every observer sees every step; the run stops
/// if any of them asks to.
#[derive(Default)]
pub struct ObserverSet<'a> {
    observers: Vec<Box<dyn Observer + 'a>>,
}

impl<'a> ObserverSet<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<O>(mut self, observer: O) -> Self
    where
        O: Observer + 'a,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Observer for ObserverSet<'_> {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        let mut flow = ControlFlow::Continue(());
        for observer in &mut self.observers {
            if observer.on_tick(snapshot).is_break() {
                flow = ControlFlow::Break(());
            }
        }
        flow
    }
}
