use accretion_core::units::m_to_stellar_radii;
use accretion_core::vector::{self, Vector2};
use accretion_physics::{acceleration_at, accreted_mass_over_step, schwarzschild_radius_m};
use accretion_profile::StellarProfile;
use serde::Serialize;

use crate::{Observer, SimulationConfig, SimulationConfigError, SimulationState, TickSnapshot};

/// Summary of a finished [`Integrator::run`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RunOutcome {
    pub ticks: u64,
    pub stopped_by_observer: bool,
    pub final_state: SimulationState,
}

/// Semi-implicit Euler integrator with accretion and momentum-conserving mass growth.
#[derive(Debug, Clone)]
pub struct Integrator<'a> {
    profile: &'a StellarProfile,
    config: SimulationConfig,
    state: SimulationState,
    iteration: u64,
}

impl<'a> Integrator<'a> {
    pub fn new(
        profile: &'a StellarProfile,
        config: SimulationConfig,
    ) -> Result<Self, SimulationConfigError> {
        config.validate()?;
        log::debug!(
            "integrator ready: r0 = {:.5} R_sun, v0 = {:.3e} m/s, m0 = {:.3e} kg, k = {}, dt = {} s",
            vector::norm(&config.initial_position),
            vector::norm(&config.initial_velocity_m_s),
            config.initial_mass_kg,
            config.disc_multiplier,
            config.time_step_s
        );
        Ok(Self {
            profile,
            config,
            state: SimulationState::initial(&config),
            iteration: 0,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Number of steps taken so far.
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Advance one fixed step.
    ///
    /// Velocity is kicked before the position drifts, accretion is evaluated at
    /// the new position and velocity with the pre-step mass, then the velocity is
    /// rescaled so that `mass × velocity` is unchanged by the captured mass.
    pub fn step(&mut self) -> TickSnapshot {
        let dt = self.config.time_step_s;
        let state = &mut self.state;
        self.iteration += 1;

        state.elapsed_time_s += dt;
        let acceleration = acceleration_at(self.profile, &state.position);
        state.velocity_m_s = vector::add(&state.velocity_m_s, &vector::scale(&acceleration, dt));
        state.position = vector::add(
            &state.position,
            &vector::scale(&state.velocity_m_s, m_to_stellar_radii(dt)),
        );

        let schwarzschild_radius = schwarzschild_radius_m(state.compact_object_mass_kg);
        let accreted = accreted_mass_over_step(
            self.profile,
            &state.position,
            &state.velocity_m_s,
            state.compact_object_mass_kg,
            self.config.disc_multiplier,
            dt,
        );

        let old_mass = state.compact_object_mass_kg;
        state.cumulative_accreted_mass_kg += accreted;
        state.compact_object_mass_kg =
            self.config.initial_mass_kg + state.cumulative_accreted_mass_kg;
        // TODO: repeated rescaling drifts over long runs; carry momentum as its own state.
        state.velocity_m_s =
            conserve_momentum(&state.velocity_m_s, old_mass, state.compact_object_mass_kg);

        TickSnapshot {
            iteration: self.iteration,
            time_step_s: dt,
            state: *state,
            acceleration_m_s2: acceleration,
            accreted_mass_kg: accreted,
            schwarzschild_radius_m: schwarzschild_radius,
        }
    }

    /// Step until an observer breaks or `max_ticks` steps have been taken.
    ///
    /// With no limit and an observer that never breaks this does not return.
    pub fn run<O>(&mut self, observer: &mut O, max_ticks: Option<u64>) -> RunOutcome
    where
        O: Observer + ?Sized,
    {
        let mut ticks = 0u64;
        let mut stopped_by_observer = false;
        while max_ticks.is_none_or(|limit| ticks < limit) {
            let snapshot = self.step();
            ticks += 1;
            if observer.on_tick(&snapshot).is_break() {
                stopped_by_observer = true;
                break;
            }
        }
        log::info!(
            "simulation finished after {} ticks ({:.1} s simulated, {:.3e} kg accreted)",
            ticks,
            self.state.elapsed_time_s,
            self.state.cumulative_accreted_mass_kg
        );
        RunOutcome {
            ticks,
            stopped_by_observer,
            final_state: self.state,
        }
    }
}

/// Rescale `velocity` so that momentum is unchanged when mass grows from
/// `old_mass_kg` to `new_mass_kg`. Captured material is assumed to bring no momentum.
pub fn conserve_momentum(velocity: &Vector2, old_mass_kg: f64, new_mass_kg: f64) -> Vector2 {
    vector::scale(velocity, old_mass_kg / new_mass_kg)
}
