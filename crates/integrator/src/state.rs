use accretion_core::units::seconds_to_years;
use accretion_core::vector::{self, Vector2};
use serde::Serialize;

use crate::SimulationConfig;

/// Mutable state advanced by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationState {
    pub elapsed_time_s: f64,
    /// Position in stellar radii.
    pub position: Vector2,
    pub velocity_m_s: Vector2,
    /// Always `initial_mass_kg + cumulative_accreted_mass_kg`, recomputed every step.
    pub compact_object_mass_kg: f64,
    pub cumulative_accreted_mass_kg: f64,
}

impl SimulationState {
    /// State at t = 0 for the given configuration.
    pub fn initial(config: &SimulationConfig) -> Self {
        Self {
            elapsed_time_s: 0.0,
            position: config.initial_position,
            velocity_m_s: config.initial_velocity_m_s,
            compact_object_mass_kg: config.initial_mass_kg,
            cumulative_accreted_mass_kg: 0.0,
        }
    }

    /// Distance from the stellar centre in stellar radii.
    pub fn radius_fraction(&self) -> f64 {
        vector::norm(&self.position)
    }

    pub fn speed_m_s(&self) -> f64 {
        vector::norm(&self.velocity_m_s)
    }
}

/// Read-only view of one completed step, handed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TickSnapshot {
    /// 1-based index of the step that produced this snapshot.
    pub iteration: u64,
    pub time_step_s: f64,
    pub state: SimulationState,
    /// Acceleration evaluated at the start of the step (m/s²).
    pub acceleration_m_s2: Vector2,
    /// Mass captured during this step (kg).
    pub accreted_mass_kg: f64,
    /// Schwarzschild-radius analogue of the mass that did the capturing (m).
    pub schwarzschild_radius_m: f64,
}

impl TickSnapshot {
    pub fn acceleration_magnitude(&self) -> f64 {
        vector::norm(&self.acceleration_m_s2)
    }

    /// Capture rate over this step (kg/s).
    pub fn accretion_rate_kg_s(&self) -> f64 {
        self.accreted_mass_kg / self.time_step_s
    }

    /// Capture rate averaged over the whole run so far (kg/s).
    pub fn average_accretion_rate_kg_s(&self) -> f64 {
        if self.state.elapsed_time_s > 0.0 {
            self.state.cumulative_accreted_mass_kg / self.state.elapsed_time_s
        } else {
            0.0
        }
    }

    pub fn elapsed_years(&self) -> f64 {
        seconds_to_years(self.state.elapsed_time_s)
    }
}
