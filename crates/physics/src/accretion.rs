//! Accretion-tube model: the compact object sweeps a cylinder whose cross-section is
//! a disc `k` Schwarzschild radii wide, and captures all stellar material inside it.
//!
//! The local density at the object's radius is taken as representative of the whole
//! swept volume for the step.

use std::f64::consts::PI;

use accretion_core::constants::{G, SPEED_OF_LIGHT_M_S};
use accretion_core::vector::{self, Vector2};
use accretion_profile::StellarProfile;

/// Schwarzschild-radius analogue `2GM/c²` (m), used purely as a length scale.
pub fn schwarzschild_radius_m(mass_kg: f64) -> f64 {
    2.0 * G * mass_kg / (SPEED_OF_LIGHT_M_S * SPEED_OF_LIGHT_M_S)
}

/// Capture cross-section (m²) of a disc `disc_multiplier` Schwarzschild radii in radius.
pub fn capture_area_m2(mass_kg: f64, disc_multiplier: f64) -> f64 {
    let radius = disc_multiplier * schwarzschild_radius_m(mass_kg);
    PI * radius * radius
}

/// Mass (kg) swept up over one step of `time_step_s` seconds.
///
/// `position` is in stellar radii and `velocity` in m/s.
pub fn accreted_mass_over_step(
    profile: &StellarProfile,
    position: &Vector2,
    velocity: &Vector2,
    mass_kg: f64,
    disc_multiplier: f64,
    time_step_s: f64,
) -> f64 {
    let swept_volume =
        capture_area_m2(mass_kg, disc_multiplier) * time_step_s * vector::norm(velocity);
    profile.density_at(vector::norm(position)) * swept_volume
}
