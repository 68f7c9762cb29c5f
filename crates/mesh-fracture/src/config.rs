//! Fracture tuning. Loadable from a RON file so it can be tweaked without a rebuild.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::FractureError;

/// How cutting planes are biased toward the impact point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaneBias {
    /// Range of the interpolation factor from the bounds center toward the impact point.
    #[serde(default = "default_impact_lerp")]
    pub impact_lerp: (f32, f32),
    /// Radius of the random plane-point offset, as a fraction of the bounds extents' length.
    #[serde(default = "default_offset_factor")]
    pub offset_factor: f32,
    /// Weight of the impact-to-center direction when blending the plane normal.
    #[serde(default = "default_radial_weight")]
    pub radial_weight: f32,
}

fn default_impact_lerp() -> (f32, f32) {
    (0.3, 0.9)
}
fn default_offset_factor() -> f32 {
    0.3
}
fn default_radial_weight() -> f32 {
    0.3
}

impl Default for PlaneBias {
    fn default() -> Self {
        Self {
            impact_lerp: default_impact_lerp(),
            offset_factor: default_offset_factor(),
            radial_weight: default_radial_weight(),
        }
    }
}

/// Settings for spawned fragment bodies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebrisConfig {
    /// Seconds a fragment lives before it is removed.
    #[serde(default = "default_lifetime")]
    pub lifetime: f32,
    /// Fraction of the lifetime after which the fragment starts fading.
    #[serde(default = "default_fade_start")]
    pub fade_start_fraction: f32,
    /// Mass per unit of bounding-box volume.
    #[serde(default = "default_one")]
    pub mass_scale: f32,
    /// Lower bound on fragment mass.
    #[serde(default = "default_min_mass")]
    pub min_mass: f32,
    /// Radius of the random velocity added to the inherited velocity.
    #[serde(default = "default_one")]
    pub velocity_jitter: f32,
    /// Radius of the random angular velocity (radians per second).
    #[serde(default = "default_angular_speed")]
    pub max_angular_speed: f32,
    /// Constant acceleration applied while the fragment is alive.
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],
}

fn default_lifetime() -> f32 {
    5.0
}
fn default_fade_start() -> f32 {
    0.8
}
fn default_one() -> f32 {
    1.0
}
fn default_min_mass() -> f32 {
    0.1
}
fn default_angular_speed() -> f32 {
    5.0
}
fn default_gravity() -> [f32; 3] {
    [0.0, -9.81, 0.0]
}

impl Default for DebrisConfig {
    fn default() -> Self {
        Self {
            lifetime: default_lifetime(),
            fade_start_fraction: default_fade_start(),
            mass_scale: default_one(),
            min_mass: default_min_mass(),
            velocity_jitter: default_one(),
            max_angular_speed: default_angular_speed(),
            gravity: default_gravity(),
        }
    }
}

/// Top-level fracture settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractureConfig {
    /// Fewest cut iterations, whatever the requested piece count.
    #[serde(default = "default_min_cuts")]
    pub min_cuts: u32,
    /// Most cut iterations; bounds the working set at `2^max_cuts` fragments.
    #[serde(default = "default_max_cuts")]
    pub max_cuts: u32,
    /// Cutting stops once the working set exceeds `piece_count * runaway_factor`.
    #[serde(default = "default_runaway_factor")]
    pub runaway_factor: usize,
    #[serde(default)]
    pub plane: PlaneBias,
    #[serde(default)]
    pub debris: DebrisConfig,
}

fn default_min_cuts() -> u32 {
    2
}
fn default_max_cuts() -> u32 {
    5
}
fn default_runaway_factor() -> usize {
    2
}

impl Default for FractureConfig {
    fn default() -> Self {
        Self {
            min_cuts: default_min_cuts(),
            max_cuts: default_max_cuts(),
            runaway_factor: default_runaway_factor(),
            plane: PlaneBias::default(),
            debris: DebrisConfig::default(),
        }
    }
}

impl FractureConfig {
    /// Parses a config from RON text. Missing fields take their defaults.
    pub fn from_ron_str(text: &str) -> Result<Self, FractureError> {
        Ok(ron::from_str(text)?)
    }

    /// Loads a config from a RON file. A missing file yields the defaults;
    /// an unparsable one is logged and also yields the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(text) = std::fs::read_to_string(path) else {
            log::debug!("No fracture config at {:?}, using defaults", path);
            return Self::default();
        };
        match Self::from_ron_str(&text) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid fracture config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }
}
