//! Turns a run manifest into a validated simulation configuration.

use accretion_config::{ConfigError, RunConfig, VelocityConfig};
use accretion_core::vector::Vector2;
use accretion_integrator::{SimulationConfig, SimulationConfigError};
use accretion_physics::circular_orbit_speed;
use accretion_profile::{ProfileError, StellarProfile};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load stellar profile: {0}")]
    Profile(#[from] ProfileError),
    #[error("invalid simulation configuration: {0}")]
    Simulation(#[from] SimulationConfigError),
}

/// Starting velocity (m/s) described by the manifest.
pub fn initial_velocity(velocity: &VelocityConfig, profile: &StellarProfile) -> Vector2 {
    match *velocity {
        VelocityConfig::Explicit { vector_m_s } => vector_m_s,
        VelocityConfig::CircularOrbit {
            radius_fraction,
            scale,
        } => [circular_orbit_speed(profile, radius_fraction) * scale, 0.0],
    }
}

/// Build the integrator configuration for `run` against an already loaded profile.
pub fn simulation_config(
    run: &RunConfig,
    profile: &StellarProfile,
) -> Result<SimulationConfig, ScenarioError> {
    let config = SimulationConfig::new(
        run.initial.position,
        initial_velocity(&run.initial.velocity, profile),
        run.compact_object.mass_kg(),
    )
    .with_disc_multiplier(run.compact_object.disc_multiplier)
    .with_time_step(run.time_step_s);
    config.validate()?;
    Ok(config)
}

/// Load the manifest's profile table and derive the run configuration from it.
pub fn prepare(run: &RunConfig) -> Result<(StellarProfile, SimulationConfig), ScenarioError> {
    run.validate()?;
    let profile = StellarProfile::from_csv_path(&run.profile)?;
    let config = simulation_config(run, &profile)?;
    Ok((profile, config))
}
