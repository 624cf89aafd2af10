//! Collaborators that watch a run through the [`Observer`](accretion_integrator::Observer)
//! interface: stop polling, wall-clock pacing, the text HUD, trajectory recording, and
//! the PNG plots drawn from their output.
//!
//! None of them mutate simulation state. Each acts once per rendering interval, i.e.
//! on every step whose iteration is a multiple of `interval_ticks`.

mod hud;
mod pacing;
mod plot;
mod stop;
mod trajectory;

pub use hud::{Hud, hud_lines};
pub use pacing::Pacer;
pub use plot::{PlotError, plot_sweep, plot_trajectory};
pub use stop::StopSignal;
pub use trajectory::{DEFAULT_TRAJECTORY_CAPACITY, TrajectoryRecorder};

use accretion_integrator::TickSnapshot;

/// True when `snapshot` falls on a rendering interval boundary.
fn on_interval(snapshot: &TickSnapshot, interval_ticks: u64) -> bool {
    snapshot.iteration % interval_ticks.max(1) == 0
}
