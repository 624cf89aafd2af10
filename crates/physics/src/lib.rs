//! Physical laws evaluated against a [`StellarProfile`](accretion_profile::StellarProfile).

pub mod accretion;
pub mod gravity;

pub use accretion::{accreted_mass_over_step, capture_area_m2, schwarzschild_radius_m};
pub use gravity::{acceleration_at, circular_orbit_speed, enclosed_mass_kg};
