//! Planet builder inputs

use serde::{Deserialize, Serialize};

/// Atmosphere density options from the planet builder form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum AtmosphereKind {
    None,
    /// Mars-like
    Thin,
    #[default]
    EarthLike,
    /// Venus-like
    Thick,
}

impl AtmosphereKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AtmosphereKind::None => "none",
            AtmosphereKind::Thin => "thin",
            AtmosphereKind::EarthLike => "earth-like",
            AtmosphereKind::Thick => "thick",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "none" => Some(AtmosphereKind::None),
            "thin" => Some(AtmosphereKind::Thin),
            "earth-like" | "earthlike" | "earth" => Some(AtmosphereKind::EarthLike),
            "thick" => Some(AtmosphereKind::Thick),
            _ => None,
        }
    }

    /// Peak opacity of each cloud blob, `None` when there are no clouds
    pub fn cloud_opacity(&self) -> Option<f32> {
        match self {
            AtmosphereKind::None => None,
            AtmosphereKind::Thin => Some(0.25),
            AtmosphereKind::EarthLike => Some(0.35),
            AtmosphereKind::Thick => Some(0.55),
        }
    }

    /// Stable index for seeding
    pub(crate) fn ordinal(&self) -> u64 {
        match self {
            AtmosphereKind::None => 0,
            AtmosphereKind::Thin => 1,
            AtmosphereKind::EarthLike => 2,
            AtmosphereKind::Thick => 3,
        }
    }
}

pub const TEMPERATURE_MIN: f32 = -50.0;
pub const TEMPERATURE_MAX: f32 = 100.0;
pub const SIZE_MIN: f32 = 0.1;
pub const SIZE_MAX: f32 = 10.0;

/// Inputs to one surface generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetParameters {
    /// Ocean coverage (0-100)
    pub water_percent: f32,
    /// Land coverage (0-100)
    pub land_percent: f32,
    /// Average temperature (°C, -50 to 100)
    pub temperature_celsius: f32,
    pub atmosphere: AtmosphereKind,
    /// Radius relative to Earth; only scales the rendered sphere
    pub size_multiplier: f32,
}

impl Default for PlanetParameters {
    fn default() -> Self {
        Self {
            water_percent: 70.0,
            land_percent: 30.0,
            temperature_celsius: 20.0,
            atmosphere: AtmosphereKind::EarthLike,
            size_multiplier: 1.0,
        }
    }
}

impl PlanetParameters {
    /// Clamp every field into range; non-finite values take the default
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        let fix = |v: f32, fallback: f32, lo: f32, hi: f32| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        Self {
            water_percent: fix(self.water_percent, defaults.water_percent, 0.0, 100.0),
            land_percent: fix(self.land_percent, defaults.land_percent, 0.0, 100.0),
            temperature_celsius: fix(
                self.temperature_celsius,
                defaults.temperature_celsius,
                TEMPERATURE_MIN,
                TEMPERATURE_MAX,
            ),
            atmosphere: self.atmosphere,
            size_multiplier: fix(self.size_multiplier, defaults.size_multiplier, SIZE_MIN, SIZE_MAX),
        }
    }

    /// Water slider: land follows as `100 - water`
    pub fn set_water_percent(&mut self, water: f32) {
        let water = if water.is_finite() { water.clamp(0.0, 100.0) } else { 0.0 };
        self.water_percent = water;
        self.land_percent = 100.0 - water;
    }

    /// Land slider: water follows as `100 - land`
    pub fn set_land_percent(&mut self, land: f32) {
        let land = if land.is_finite() { land.clamp(0.0, 100.0) } else { 0.0 };
        self.land_percent = land;
        self.water_percent = 100.0 - land;
    }

    /// Seed derived from the parameter tuple, so equal inputs give equal planets.
    /// Size is excluded because it never reaches the raster.
    pub fn seed(&self) -> u64 {
        let p = self.clamped();
        [
            p.water_percent.to_bits() as u64,
            p.land_percent.to_bits() as u64,
            p.temperature_celsius.to_bits() as u64,
            p.atmosphere.ordinal(),
        ]
        .iter()
        .fold(0x5EED_0FC0_5A05_u64, |seed, v| crate::mix_seed(seed, *v))
    }
}
