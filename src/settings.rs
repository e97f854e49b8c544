//! Settings and preferences
//!
//! Persisted separately from the high score in the same key-value store.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::Result;
use crate::platform::KeyValueStore;
use crate::platform::storage::{load_json_or_default, save_json};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Planet texture size (width, height) for this preset
    pub fn raster_size(&self) -> (u32, u32) {
        match self {
            QualityPreset::Low => (RASTER_WIDTH / 2, RASTER_HEIGHT / 2),
            QualityPreset::Medium => (RASTER_WIDTH, RASTER_HEIGHT),
            QualityPreset::High => (RASTER_WIDTH * 2, RASTER_HEIGHT * 2),
        }
    }

    /// Whether landmasses get stippled texture detail
    pub fn surface_detail(&self) -> bool {
        match self {
            QualityPreset::Low => false,
            QualityPreset::Medium => true,
            QualityPreset::High => true,
        }
    }
}

/// Arena canvas and tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Canvas width
    pub width: f32,
    /// Canvas height
    pub height: f32,
    /// Rocket movement per tick per held key
    pub agent_speed: f32,
    /// Milliseconds between asteroid spawns
    pub spawn_interval_ms: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            agent_speed: AGENT_SPEED,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
        }
    }
}

impl ArenaConfig {
    /// Replace nonsensical values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        // Canvas must fit the rocket
        if !(self.width.is_finite() && self.width >= AGENT_WIDTH) {
            self.width = defaults.width;
        }
        if !(self.height.is_finite() && self.height >= AGENT_HEIGHT) {
            self.height = defaults.height;
        }
        if !(self.agent_speed.is_finite() && self.agent_speed >= 0.0) {
            self.agent_speed = defaults.agent_speed;
        }
        if !(self.spawn_interval_ms > 0.0) {
            self.spawn_interval_ms = defaults.spawn_interval_ms;
        }
        self
    }
}

/// Preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Reproducible planet textures for repeated parameters
    pub reproducible_planets: bool,
    /// Arena tuning
    pub arena: ArenaConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            reproducible_planets: true,
            arena: ArenaConfig::default(),
        }
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "cosmic_arcade_settings";

    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Load settings, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut settings: Settings = load_json_or_default(store, Self::STORAGE_KEY);
        settings.arena = settings.arena.sanitized();
        log::info!("Using {} quality settings", settings.quality.as_str());
        settings
    }

    /// Save settings
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<()> {
        save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_preset_parse() {
        assert_eq!(QualityPreset::from_str("HIGH"), Some(QualityPreset::High));
        assert_eq!(QualityPreset::from_str("med"), Some(QualityPreset::Medium));
        assert_eq!(QualityPreset::from_str("ultra"), None);
    }

    #[test]
    fn test_raster_sizes_keep_aspect() {
        for preset in [QualityPreset::Low, QualityPreset::Medium, QualityPreset::High] {
            let (w, h) = preset.raster_size();
            assert_eq!(w, h * 2);
        }
        assert_eq!(QualityPreset::Medium.raster_size(), (1024, 512));
    }

    #[test]
    fn test_settings_round_trip() {
        let mut store = MemoryStore::new();
        let mut settings = Settings::from_preset(QualityPreset::High);
        settings.arena.spawn_interval_ms = 1500.0;
        settings.save(&mut store).unwrap();

        let loaded = Settings::load(&store);
        assert_eq!(loaded.quality, QualityPreset::High);
        assert_eq!(loaded.arena.spawn_interval_ms, 1500.0);
    }

    #[test]
    fn test_partial_and_bad_values() {
        let mut store = MemoryStore::new();
        store
            .set(Settings::STORAGE_KEY, r#"{"arena":{"width":-3.0,"spawn_interval_ms":0}}"#)
            .unwrap();
        let loaded = Settings::load(&store);
        assert_eq!(loaded.quality, QualityPreset::Medium);
        assert_eq!(loaded.arena, ArenaConfig::default());
    }
}
