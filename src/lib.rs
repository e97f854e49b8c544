//! Cosmic Arcade - planet textures and an asteroid-dodging arcade loop
//!
//! Core modules:
//! - `surface`: Procedural planet surface generator (raster textures)
//! - `arena`: Fixed-timestep asteroid dodger simulation
//! - `highscores`: Best-score tracking with durable storage
//! - `platform`: Browser/native platform abstraction (storage)
//! - `settings`: Quality presets and arena tuning
//! - `habitability`: Habitability report for a designed planet
//! - `orbits`: Solar system designer orbit model

pub mod arena;
pub mod error;
pub mod habitability;
pub mod highscores;
pub mod orbits;
pub mod platform;
pub mod settings;
pub mod surface;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::{Error, Result};
pub use highscores::HighScore;
pub use settings::{ArenaConfig, QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference tick length in milliseconds (one animation frame at 60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Arena canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Rocket defaults
    pub const AGENT_WIDTH: f32 = 40.0;
    pub const AGENT_HEIGHT: f32 = 60.0;
    pub const AGENT_SPEED: f32 = 5.0;

    /// One asteroid every two seconds
    pub const SPAWN_INTERVAL_MS: f64 = 2000.0;

    /// Asteroid ranges (min inclusive, max exclusive)
    pub const ASTEROID_RADIUS_MIN: f32 = 20.0;
    pub const ASTEROID_RADIUS_MAX: f32 = 40.0;
    pub const ASTEROID_POINTS_MIN: u32 = 8;
    pub const ASTEROID_POINTS_MAX: u32 = 12;
    pub const ASTEROID_SPEED_MIN: f32 = 2.0;
    pub const ASTEROID_SPEED_MAX: f32 = 4.0;
    pub const ASTEROID_MAX_SPIN: f32 = 0.025;

    /// Planet texture size (equirectangular, 2:1)
    pub const RASTER_WIDTH: u32 = 1024;
    pub const RASTER_HEIGHT: u32 = 512;

    /// Vertices around each generated landmass
    pub const LANDMASS_SEGMENTS: usize = 24;
}

/// Squared distance check without the sqrt
#[inline]
pub fn within_distance(a: Vec2, b: Vec2, distance: f32) -> bool {
    a.distance_squared(b) < distance * distance
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Mix two 64-bit values into a new seed (golden ratio hash)
#[inline]
pub fn mix_seed(seed: u64, value: u64) -> u64 {
    (seed ^ value)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .rotate_left(31)
        .wrapping_add(2_654_435_761)
}
