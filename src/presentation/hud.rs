use std::ops::ControlFlow;

use accretion_integrator::{Observer, TickSnapshot};
use log::Level;

use super::on_interval;

/// Text overlay of the run, one line per quantity.
pub fn hud_lines(snapshot: &TickSnapshot) -> Vec<String> {
    let state = &snapshot.state;
    vec![
        format!("mass = {:.20e} kg", state.compact_object_mass_kg),
        format!(
            "eaten mass total = {:.2e} kg",
            state.cumulative_accreted_mass_kg
        ),
        format!("Schw. radius = {:.2e} m", snapshot.schwarzschild_radius_m),
        format!(
            "avg eaten mass = {:.2e} kg/s",
            snapshot.average_accretion_rate_kg_s()
        ),
        format!(
            "    eaten mass = {:.2e} kg/s",
            snapshot.accretion_rate_kg_s()
        ),
        format!("t = {:6.4} years", snapshot.elapsed_years()),
        format!("r = {:4.2} R_sun", state.radius_fraction()),
        format!("v = {:5.2e} m/s", state.speed_m_s()),
        format!("a = {:5.2e} m/s^2", snapshot.acceleration_magnitude()),
    ]
}

/// Logs the HUD lines once per interval, at `debug` unless told otherwise.
#[derive(Debug)]
pub struct Hud {
    interval_ticks: u64,
    level: Level,
}

impl Hud {
    pub fn new(interval_ticks: u64) -> Self {
        Self {
            interval_ticks,
            level: Level::Debug,
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl Observer for Hud {
    fn on_tick(&mut self, snapshot: &TickSnapshot) -> ControlFlow<()> {
        if on_interval(snapshot, self.interval_ticks) && log::log_enabled!(self.level) {
            log::log!(
                self.level,
                "iteration {}\n  {}",
                snapshot.iteration,
                hud_lines(snapshot).join("\n  ")
            );
        }
        ControlFlow::Continue(())
    }
}
