//! Fixed-step simulation of a compact object falling through a star while it accretes.
//!
//! The [`Integrator`] owns the only mutable [`SimulationState`]. Rendering, pacing and
//! input polling live outside this crate and see each step through the [`Observer`]
//! interface as a read-only [`TickSnapshot`].

mod config;
mod integrator;
mod observer;
mod state;

pub use config::{
    DEFAULT_DISC_MULTIPLIER, DEFAULT_TIME_STEP_S, SimulationConfig, SimulationConfigError,
};
pub use integrator::{Integrator, RunOutcome, conserve_momentum};
pub use observer::{Observer, ObserverSet};
pub use state::{SimulationState, TickSnapshot};
