//! Core units, constants, and shared primitives for the stellar accretion workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
    pub const G: f64 = 6.674_30e-11;
    /// Speed of light in vacuum (m/s).
    pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;
    /// Solar mass (kg).
    pub const SOLAR_MASS_KG: f64 = 1.99e30;
    /// Solar radius (m).
    pub const SOLAR_RADIUS_M: f64 = 6.96e8;
    /// Regularisation added to the radial distance in the gravity law (m).
    pub const GRAVITY_SOFTENING_M: f64 = 1.0;
    /// Seconds per Julian year.
    pub const SECONDS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0;
    /// Earth mass (kg).
    pub const EARTH_MASS_KG: f64 = 6.0e24;
    /// Jupiter mass (kg).
    pub const JUPITER_MASS_KG: f64 = 1.9e27;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{SECONDS_PER_YEAR, SOLAR_RADIUS_M};

    /// Convert a density in g/cm³ to kg/m³.
    #[inline]
    pub fn g_cm3_to_kg_m3(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert a distance in stellar radii to metres.
    #[inline]
    pub fn stellar_radii_to_m(v: f64) -> f64 {
        v * SOLAR_RADIUS_M
    }

    /// Convert a distance in metres to stellar radii.
    #[inline]
    pub fn m_to_stellar_radii(v: f64) -> f64 {
        v / SOLAR_RADIUS_M
    }

    /// Convert seconds to Julian years.
    #[inline]
    pub fn seconds_to_years(seconds: f64) -> f64 {
        seconds / SECONDS_PER_YEAR
    }
}

/// Run parameters used when a configuration leaves them out.
pub mod defaults {
    /// Capture disc radius in Schwarzschild radii.
    pub const DEFAULT_DISC_MULTIPLIER: f64 = 2.0;
    /// Integration step in seconds.
    pub const DEFAULT_TIME_STEP_S: f64 = 5.0;
}

/// Compact-object masses used as named starting points.
pub mod presets {
    use super::constants::{EARTH_MASS_KG, JUPITER_MASS_KG};

    /// Earth.
    pub const EARTH_KG: f64 = EARTH_MASS_KG;
    /// Jupiter.
    pub const JUPITER_KG: f64 = JUPITER_MASS_KG;
    /// Heaviest known planet, roughly 13 Jupiter masses.
    pub const HEAVIEST_PLANET_KG: f64 = 13.0 * JUPITER_MASS_KG;
    /// Heaviest known brown dwarf, roughly 90 Jupiter masses.
    pub const HEAVIEST_BROWN_DWARF_KG: f64 = 90.0 * JUPITER_MASS_KG;
}

/// Minimal vector helpers for the planar motion of the compact object.
pub mod vector {
    /// Alias for a 2D vector in stellar radii, m/s, or m/s² depending on context.
    pub type Vector2 = [f64; 2];

    /// The zero vector.
    pub const ZERO: Vector2 = [0.0, 0.0];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector2) -> f64 {
        v[0].hypot(v[1])
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector2, b: &Vector2) -> f64 {
        a[0] * b[0] + a[1] * b[1]
    }

    /// Vector addition.
    #[inline]
    pub fn add(a: &Vector2, b: &Vector2) -> Vector2 {
        [a[0] + b[0], a[1] + b[1]]
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale(v: &Vector2, s: f64) -> Vector2 {
        [v[0] * s, v[1] * s]
    }

    /// True when both components are finite.
    #[inline]
    pub fn is_finite(v: &Vector2) -> bool {
        v[0].is_finite() && v[1].is_finite()
    }
}
