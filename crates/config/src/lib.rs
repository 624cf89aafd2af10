//! Run manifests for the stellar accretion simulator.
//!
//! A manifest is a TOML or YAML file describing one run: which profile table to
//! load, the compact object, its starting position and velocity, the step size, and
//! how often presentation collaborators are invoked. Every section is optional and
//! falls back to the reference scenario (a 13 Jupiter-mass object released at
//! (-0.5, 0.5) R_sun with the circular-orbit speed of the best feeding shell).

use std::fs::File;
use std::path::{Path, PathBuf};

use accretion_core::defaults::{DEFAULT_DISC_MULTIPLIER, DEFAULT_TIME_STEP_S};
use accretion_core::presets;
use serde::Deserialize;
use thiserror::Error;

/// Best feeding orbit in the standard solar model, in stellar radii.
pub const REFERENCE_ORBIT_RADIUS: f64 = 0.09031;

/// Complete run manifest.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RunConfig {
    #[serde(default = "default_profile_path")]
    pub profile: PathBuf,
    #[serde(default)]
    pub compact_object: CompactObjectConfig,
    #[serde(default)]
    pub initial: InitialConditionConfig,
    #[serde(default = "default_time_step")]
    pub time_step_s: f64,
    #[serde(default)]
    pub render: RenderConfig,
}

/// The accreting object.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CompactObjectConfig {
    /// Named mass; ignored when `mass_kg` is present.
    #[serde(default)]
    pub preset: Option<MassPreset>,
    #[serde(default)]
    pub mass_kg: Option<f64>,
    #[serde(default = "default_disc_multiplier")]
    pub disc_multiplier: f64,
}

/// Reference masses for the compact object.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MassPreset {
    Earth,
    Jupiter,
    #[default]
    HeaviestPlanet,
    HeaviestBrownDwarf,
}

/// Starting position and velocity.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct InitialConditionConfig {
    /// Position in stellar radii.
    #[serde(default = "default_position")]
    pub position: [f64; 2],
    #[serde(default)]
    pub velocity: VelocityConfig,
}

/// How the starting velocity is chosen.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VelocityConfig {
    /// A fixed vector in m/s.
    Explicit { vector_m_s: [f64; 2] },
    /// Circular-orbit speed at `radius_fraction`, multiplied by `scale`, along +x.
    CircularOrbit {
        #[serde(default = "default_orbit_radius")]
        radius_fraction: f64,
        #[serde(default = "default_scale")]
        scale: f64,
    },
}

/// Cadence of the presentation collaborators.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RenderConfig {
    /// Steps between two frames.
    #[serde(default = "default_interval_ticks")]
    pub interval_ticks: u64,
    /// Wall-clock seconds allotted to one frame.
    #[serde(default = "default_frame_seconds")]
    pub frame_seconds: f64,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format '{0}' (expected .toml, .yaml or .yml)")]
    UnsupportedFormat(String),
    #[error("invalid {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

fn default_profile_path() -> PathBuf {
    PathBuf::from("data/sun_stats.csv")
}

fn default_time_step() -> f64 {
    DEFAULT_TIME_STEP_S
}

fn default_disc_multiplier() -> f64 {
    DEFAULT_DISC_MULTIPLIER
}

fn default_position() -> [f64; 2] {
    [-0.5, 0.5]
}

fn default_orbit_radius() -> f64 {
    REFERENCE_ORBIT_RADIUS
}

fn default_scale() -> f64 {
    1.0
}

fn default_interval_ticks() -> u64 {
    10
}

fn default_frame_seconds() -> f64 {
    0.02
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            profile: default_profile_path(),
            compact_object: CompactObjectConfig::default(),
            initial: InitialConditionConfig::default(),
            time_step_s: default_time_step(),
            render: RenderConfig::default(),
        }
    }
}

impl Default for CompactObjectConfig {
    fn default() -> Self {
        Self {
            preset: None,
            mass_kg: None,
            disc_multiplier: default_disc_multiplier(),
        }
    }
}

impl Default for InitialConditionConfig {
    fn default() -> Self {
        Self {
            position: default_position(),
            velocity: VelocityConfig::default(),
        }
    }
}

impl Default for VelocityConfig {
    fn default() -> Self {
        Self::CircularOrbit {
            radius_fraction: default_orbit_radius(),
            scale: default_scale(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            interval_ticks: default_interval_ticks(),
            frame_seconds: default_frame_seconds(),
        }
    }
}

impl MassPreset {
    pub fn mass_kg(self) -> f64 {
        match self {
            MassPreset::Earth => presets::EARTH_KG,
            MassPreset::Jupiter => presets::JUPITER_KG,
            MassPreset::HeaviestPlanet => presets::HEAVIEST_PLANET_KG,
            MassPreset::HeaviestBrownDwarf => presets::HEAVIEST_BROWN_DWARF_KG,
        }
    }
}

impl CompactObjectConfig {
    /// Explicit mass if given, otherwise the preset (heaviest planet by default).
    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
            .unwrap_or_else(|| self.preset.unwrap_or_default().mass_kg())
    }
}

impl RunConfig {
    /// Parse a TOML manifest and validate it.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a YAML manifest and validate it.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulator cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mass = self.compact_object.mass_kg();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(invalid("compact_object.mass_kg", "must be positive"));
        }
        let k = self.compact_object.disc_multiplier;
        if !(k.is_finite() && k > 0.0) {
            return Err(invalid("compact_object.disc_multiplier", "must be positive"));
        }
        if !(self.time_step_s.is_finite() && self.time_step_s > 0.0) {
            return Err(invalid("time_step_s", "must be positive"));
        }
        let [x, y] = self.initial.position;
        if !(x.is_finite() && y.is_finite()) {
            return Err(invalid("initial.position", "must be finite"));
        }
        if x == 0.0 && y == 0.0 {
            return Err(invalid("initial.position", "must not be the stellar centre"));
        }
        match self.initial.velocity {
            VelocityConfig::Explicit { vector_m_s: [vx, vy] } => {
                if !(vx.is_finite() && vy.is_finite()) {
                    return Err(invalid("initial.velocity.vector_m_s", "must be finite"));
                }
            }
            VelocityConfig::CircularOrbit {
                radius_fraction,
                scale,
            } => {
                if !(radius_fraction.is_finite() && radius_fraction > 0.0) {
                    return Err(invalid(
                        "initial.velocity.radius_fraction",
                        "must be positive",
                    ));
                }
                if !scale.is_finite() {
                    return Err(invalid("initial.velocity.scale", "must be finite"));
                }
            }
        }
        if self.render.interval_ticks == 0 {
            return Err(invalid("render.interval_ticks", "must be at least 1"));
        }
        if !(self.render.frame_seconds.is_finite() && self.render.frame_seconds >= 0.0) {
            return Err(invalid("render.frame_seconds", "must be non-negative"));
        }
        Ok(())
    }
}

/// Load a run manifest, choosing TOML or YAML by file extension.
pub fn load_run_config<P: AsRef<Path>>(path: P) -> Result<RunConfig, ConfigError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let config: RunConfig = match extension.as_str() {
        "toml" => toml::from_str(&std::fs::read_to_string(path)?)?,
        "yaml" | "yml" => serde_yaml::from_reader(File::open(path)?)?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };
    config.validate()?;
    Ok(config)
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
