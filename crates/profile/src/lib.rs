//! Stellar interior profile: a sorted table mapping radius fraction to density and
//! enclosed mass fraction.
//!
//! Lookups use a step-function approximation. The query radius is located with a
//! leftmost binary search and the sample at that index is returned as-is, without
//! interpolation.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use accretion_core::units::g_cm3_to_kg_m3;
use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;

const RADIUS_COLUMNS: &[&str] = &["R/Rsun", "radius_fraction"];
const DENSITY_COLUMNS: &[&str] = &["Rho", "density_g_cm3"];
const MASS_COLUMNS: &[&str] = &["M/Msun", "mass_fraction"];

/// One tabulated shell of the star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileSample {
    /// Distance from the centre in units of the stellar radius.
    pub radius_fraction: f64,
    /// Density in kg/m³.
    pub density_kg_m3: f64,
    /// Mass enclosed within `radius_fraction`, in units of the stellar mass.
    pub mass_fraction: f64,
}

/// Errors raised while building or loading a profile.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse profile CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("profile CSV missing column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: column '{column}' is not a finite number ('{value}')")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },
    #[error("profile contains no samples")]
    Empty,
    #[error("row {row}: radius fraction {radius} does not increase on the previous row")]
    Unsorted { row: usize, radius: f64 },
    #[error("row {row}: enclosed mass fraction {mass_fraction} decreases with radius")]
    DecreasingMass { row: usize, mass_fraction: f64 },
    #[error("row {row}: negative {column}")]
    Negative { row: usize, column: &'static str },
}

/// Immutable radius-sorted profile table.
#[derive(Debug, Clone)]
pub struct StellarProfile {
    samples: Vec<ProfileSample>,
}

impl StellarProfile {
    /// Build a profile from samples already expressed in SI density.
    ///
    /// Samples must be strictly increasing in radius with non-decreasing mass fraction.
    pub fn new(samples: Vec<ProfileSample>) -> Result<Self, ProfileError> {
        if samples.is_empty() {
            return Err(ProfileError::Empty);
        }
        for (row, sample) in samples.iter().enumerate() {
            check_finite(row, "radius_fraction", sample.radius_fraction)?;
            check_finite(row, "density", sample.density_kg_m3)?;
            check_finite(row, "mass_fraction", sample.mass_fraction)?;
            if sample.radius_fraction < 0.0 {
                return Err(ProfileError::Negative {
                    row,
                    column: "radius_fraction",
                });
            }
            if sample.density_kg_m3 < 0.0 {
                return Err(ProfileError::Negative {
                    row,
                    column: "density",
                });
            }
        }
        for (row, pair) in samples.windows(2).enumerate() {
            if pair[1].radius_fraction <= pair[0].radius_fraction {
                return Err(ProfileError::Unsorted {
                    row: row + 1,
                    radius: pair[1].radius_fraction,
                });
            }
            if pair[1].mass_fraction < pair[0].mass_fraction {
                return Err(ProfileError::DecreasingMass {
                    row: row + 1,
                    mass_fraction: pair[1].mass_fraction,
                });
            }
        }
        Ok(Self { samples })
    }

    /// Load a profile CSV from disk.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, ProfileError> {
        let path = path.as_ref();
        let profile = Self::from_csv_reader(File::open(path)?)?;
        log::info!(
            "loaded stellar profile from {} ({} shells, outer radius {:.5})",
            path.display(),
            profile.len(),
            profile.max_radius_fraction()
        );
        Ok(profile)
    }

    /// Parse a profile CSV. Density is read in g/cm³ and stored in kg/m³.
    ///
    /// Columns are matched by header name; unrelated columns are ignored and
    /// lines starting with `#` are treated as comments.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, ProfileError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .comment(Some(b'#'))
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let radius_idx = resolve_column(&headers, RADIUS_COLUMNS)?;
        let density_idx = resolve_column(&headers, DENSITY_COLUMNS)?;
        let mass_idx = resolve_column(&headers, MASS_COLUMNS)?;

        let mut samples = Vec::new();
        for (row, record) in rdr.records().enumerate() {
            let record = record?;
            let radius_fraction = parse_field(&record, row, radius_idx, RADIUS_COLUMNS[0])?;
            let density_g_cm3 = parse_field(&record, row, density_idx, DENSITY_COLUMNS[0])?;
            let mass_fraction = parse_field(&record, row, mass_idx, MASS_COLUMNS[0])?;
            samples.push(ProfileSample {
                radius_fraction,
                density_kg_m3: g_cm3_to_kg_m3(density_g_cm3),
                mass_fraction,
            });
        }
        Self::new(samples)
    }

    /// All samples, ascending by radius.
    pub fn samples(&self) -> &[ProfileSample] {
        &self.samples
    }

    /// Number of tabulated shells.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false; an empty table is rejected at construction.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Outermost tabulated radius fraction.
    pub fn max_radius_fraction(&self) -> f64 {
        self.samples
            .last()
            .map(|s| s.radius_fraction)
            .unwrap_or_default()
    }

    /// Tabulated radius fractions in ascending order.
    pub fn radius_fractions(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.radius_fraction)
    }

    /// Density in kg/m³ at the given radius fraction; zero outside the star.
    pub fn density_at(&self, radius_fraction: f64) -> f64 {
        if radius_fraction >= self.max_radius_fraction() {
            return 0.0;
        }
        self.samples[self.bisect_left(radius_fraction)].density_kg_m3
    }

    /// Enclosed mass fraction at the given radius fraction; one outside the star.
    pub fn mass_fraction_at(&self, radius_fraction: f64) -> f64 {
        if radius_fraction >= self.max_radius_fraction() {
            return 1.0;
        }
        match self.bisect_left(radius_fraction) {
            // innermost shell reports no enclosed mass
            0 => 0.0,
            idx => self.samples[idx].mass_fraction,
        }
    }

    /// Index of the first sample whose radius is not below `radius_fraction`.
    ///
    /// Callers guarantee `radius_fraction` is below the outer radius, so the
    /// index always addresses a sample.
    fn bisect_left(&self, radius_fraction: f64) -> usize {
        self.samples
            .partition_point(|s| s.radius_fraction < radius_fraction)
    }
}

fn resolve_column(headers: &StringRecord, names: &[&'static str]) -> Result<usize, ProfileError> {
    names
        .iter()
        .find_map(|name| headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
        .ok_or(ProfileError::MissingColumn(names[0]))
}

fn parse_field(
    record: &StringRecord,
    row: usize,
    idx: usize,
    column: &'static str,
) -> Result<f64, ProfileError> {
    let raw = record.get(idx).unwrap_or("");
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ProfileError::InvalidValue {
            row,
            column,
            value: raw.to_string(),
        }),
    }
}

fn check_finite(row: usize, column: &'static str, value: f64) -> Result<(), ProfileError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProfileError::InvalidValue {
            row,
            column,
            value: value.to_string(),
        })
    }
}
