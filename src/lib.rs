//! Compact-object accretion inside a star.
//!
//! The physics lives in the member crates re-exported here so front-ends (the
//! `simulate` and `sweep` binaries, tests, notebooks) share one API. This crate
//! adds the manifest-to-run conversion and the presentation collaborators that
//! watch a run without touching its state.

pub mod presentation;
pub mod scenario;

pub use accretion_config as config;
pub use accretion_export as export;
pub use accretion_integrator as integrator;
pub use accretion_physics as physics;
pub use accretion_profile as profile;
pub use accretion_sweep as sweep;

pub use accretion_core::{constants, defaults, presets, units, vector};
