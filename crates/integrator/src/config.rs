pub use accretion_core::defaults::{DEFAULT_DISC_MULTIPLIER, DEFAULT_TIME_STEP_S};
use accretion_core::vector::{self, Vector2};
use serde::Serialize;
use thiserror::Error;

/// Immutable inputs of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationConfig {
    /// Starting position in stellar radii.
    pub initial_position: Vector2,
    /// Starting velocity in m/s.
    pub initial_velocity_m_s: Vector2,
    /// Compact-object mass at t = 0 (kg).
    pub initial_mass_kg: f64,
    /// Capture disc radius in units of the Schwarzschild-radius analogue.
    pub disc_multiplier: f64,
    /// Fixed integration step (s).
    pub time_step_s: f64,
}

/// Reasons a [`SimulationConfig`] is rejected.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationConfigError {
    #[error("initial mass must be positive (got {0} kg)")]
    NonPositiveMass(f64),
    #[error("time step must be positive (got {0} s)")]
    NonPositiveTimeStep(f64),
    #[error("disc multiplier must be positive (got {0})")]
    NonPositiveDiscMultiplier(f64),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("initial position must not be the centre of the star")]
    StartsAtOrigin,
}

impl SimulationConfig {
    /// Configuration with the default disc multiplier and time step.
    pub fn new(position: Vector2, velocity_m_s: Vector2, mass_kg: f64) -> Self {
        Self {
            initial_position: position,
            initial_velocity_m_s: velocity_m_s,
            initial_mass_kg: mass_kg,
            disc_multiplier: DEFAULT_DISC_MULTIPLIER,
            time_step_s: DEFAULT_TIME_STEP_S,
        }
    }

    pub fn with_disc_multiplier(mut self, disc_multiplier: f64) -> Self {
        self.disc_multiplier = disc_multiplier;
        self
    }

    pub fn with_time_step(mut self, time_step_s: f64) -> Self {
        self.time_step_s = time_step_s;
        self
    }

    /// Check every field; the integrator refuses configurations that fail here.
    pub fn validate(&self) -> Result<(), SimulationConfigError> {
        if !vector::is_finite(&self.initial_position) {
            return Err(SimulationConfigError::NonFinite("initial position"));
        }
        if !vector::is_finite(&self.initial_velocity_m_s) {
            return Err(SimulationConfigError::NonFinite("initial velocity"));
        }
        if !self.initial_mass_kg.is_finite() {
            return Err(SimulationConfigError::NonFinite("initial mass"));
        }
        if !self.disc_multiplier.is_finite() {
            return Err(SimulationConfigError::NonFinite("disc multiplier"));
        }
        if !self.time_step_s.is_finite() {
            return Err(SimulationConfigError::NonFinite("time step"));
        }
        if self.initial_mass_kg <= 0.0 {
            return Err(SimulationConfigError::NonPositiveMass(self.initial_mass_kg));
        }
        if self.time_step_s <= 0.0 {
            return Err(SimulationConfigError::NonPositiveTimeStep(self.time_step_s));
        }
        if self.disc_multiplier <= 0.0 {
            return Err(SimulationConfigError::NonPositiveDiscMultiplier(
                self.disc_multiplier,
            ));
        }
        if vector::norm(&self.initial_position) == 0.0 {
            return Err(SimulationConfigError::StartsAtOrigin);
        }
        Ok(())
    }
}
