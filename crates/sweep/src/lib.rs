//! Radial sweep of the accretion rate per unit capture area.
//!
//! For every tabulated shell the compact object is assumed to move at the local
//! circular-orbit speed, so the mass flux through its capture disc is
//! `density × speed` (kg s⁻¹ m⁻²). The shell with the largest flux is the best
//! orbit for feeding.

use std::cmp::Ordering;

use accretion_physics::{capture_area_m2, circular_orbit_speed, schwarzschild_radius_m};
use accretion_profile::StellarProfile;
use serde::Serialize;

/// Flux at one tabulated radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub radius_fraction: f64,
    pub consumption_kg_s_m2: f64,
}

/// Sweep over every shell of a profile, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub points: Vec<SweepPoint>,
}

/// Absolute feeding rate for a particular compact object at the peak shell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeakConsumption {
    pub index: usize,
    pub radius_fraction: f64,
    pub consumption_kg_s_m2: f64,
    pub mass_kg: f64,
    pub disc_multiplier: f64,
    pub schwarzschild_radius_m: f64,
    pub capture_area_m2: f64,
    pub eaten_mass_kg_s: f64,
}

/// Mass flux per unit area (kg s⁻¹ m⁻²) for a circular orbit at `radius_fraction`.
pub fn consumption_per_area(profile: &StellarProfile, radius_fraction: f64) -> f64 {
    profile.density_at(radius_fraction) * circular_orbit_speed(profile, radius_fraction)
}

/// Evaluate [`consumption_per_area`] at every tabulated radius.
pub fn sweep(profile: &StellarProfile) -> SweepResult {
    let points = profile
        .radius_fractions()
        .map(|radius_fraction| SweepPoint {
            radius_fraction,
            consumption_kg_s_m2: consumption_per_area(profile, radius_fraction),
        })
        .collect();
    SweepResult { points }
}

/// Index of the largest value; the lowest index wins on exact ties and NaN never wins.
pub fn peak_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value.partial_cmp(&current) != Some(Ordering::Greater) => {}
            _ => best = Some((idx, value)),
        }
    }
    best.map(|(idx, _)| idx)
}

impl SweepResult {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.consumption_kg_s_m2).collect()
    }

    /// Index of the shell with the largest flux.
    pub fn peak_index(&self) -> Option<usize> {
        peak_index(&self.rates())
    }

    pub fn peak(&self) -> Option<&SweepPoint> {
        self.peak_index().map(|idx| &self.points[idx])
    }

    /// Feeding rate at the peak for a compact object of `mass_kg` whose capture
    /// disc is `disc_multiplier` Schwarzschild radii wide.
    pub fn peak_consumption(&self, mass_kg: f64, disc_multiplier: f64) -> Option<PeakConsumption> {
        let index = self.peak_index()?;
        let point = self.points[index];
        let area = capture_area_m2(mass_kg, disc_multiplier);
        Some(PeakConsumption {
            index,
            radius_fraction: point.radius_fraction,
            consumption_kg_s_m2: point.consumption_kg_s_m2,
            mass_kg,
            disc_multiplier,
            schwarzschild_radius_m: schwarzschild_radius_m(mass_kg),
            capture_area_m2: area,
            eaten_mass_kg_s: point.consumption_kg_s_m2 * area,
        })
    }
}
