//! Newtonian gravity inside a spherically symmetric star.
//!
//! Only the mass enclosed by the current radius contributes; it is treated as a
//! point mass at the centre (shell theorem).

use accretion_core::constants::{G, GRAVITY_SOFTENING_M, SOLAR_MASS_KG};
use accretion_core::units::stellar_radii_to_m;
use accretion_core::vector::{self, Vector2};
use accretion_profile::StellarProfile;

/// Stellar mass inside `radius_fraction`, in kg.
pub fn enclosed_mass_kg(profile: &StellarProfile, radius_fraction: f64) -> f64 {
    profile.mass_fraction_at(radius_fraction) * SOLAR_MASS_KG
}

/// Gravitational acceleration (m/s²) at `position`, given in stellar radii.
///
/// The radial distance is softened by one metre. At the exact origin the
/// direction is undefined and the zero vector is returned.
pub fn acceleration_at(profile: &StellarProfile, position: &Vector2) -> Vector2 {
    let r = vector::norm(position);
    if r == 0.0 {
        return vector::ZERO;
    }
    let mass = enclosed_mass_kg(profile, r);
    let distance_m = stellar_radii_to_m(r) + GRAVITY_SOFTENING_M;
    let strength = G * mass / (distance_m * distance_m);
    vector::scale(position, -strength / r)
}

/// Speed (m/s) of a circular orbit at `radius_fraction` under the enclosed mass.
///
/// Zero at or below the centre.
pub fn circular_orbit_speed(profile: &StellarProfile, radius_fraction: f64) -> f64 {
    if radius_fraction <= 0.0 {
        return 0.0;
    }
    let mass = enclosed_mass_kg(profile, radius_fraction);
    (G * mass / stellar_radii_to_m(radius_fraction)).sqrt()
}
