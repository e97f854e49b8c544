//! Procedural planet surface generator
//!
//! Paint order: ocean base, continents, mountain ranges, ice caps, clouds.
//! Each stage only runs when the parameters call for it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::color::Color;
use super::landmass::{Landmass, TerrainKind};
use super::params::PlanetParameters;
use super::raster::SurfaceRaster;
use crate::consts::{RASTER_HEIGHT, RASTER_WIDTH};
use crate::settings::Settings;

/// Ocean base colors
pub const OCEAN_COLOR: Color = Color::hex(0x1E4D6B);
pub const FROZEN_OCEAN_COLOR: Color = Color::hex(0xA5F2F3);
/// Polar ice
pub const ICE_COLOR: Color = Color::hex(0xF0F8FF);

/// Each landmass contributes one per `LANDMASS_PERCENT` of land coverage
const LANDMASS_PERCENT: f32 = 20.0;
const MIN_LANDMASSES: u32 = 2;
/// Mountain ranges relative to main landmasses
const MOUNTAIN_RATIO: f32 = 0.15;
/// Continent centers stay inside this vertical band (fraction of height)
const CENTER_BAND: (f32, f32) = (0.2, 0.8);
/// Largest landmass size (fraction of height)
const MAX_SIZE_FRACTION: f32 = 0.3;
/// Ice caps form below this temperature
const ICE_CAP_TEMPERATURE: f32 = 10.0;
const ICE_CAP_MIN: f32 = 0.10;
const ICE_CAP_MAX: f32 = 0.30;
const CLOUDS_MIN: u32 = 20;
const CLOUDS_MAX: u32 = 30;

/// What went into a generated texture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub landmasses: u32,
    pub mountain_ranges: u32,
    /// Rows covered by each (top and bottom) ice cap
    pub ice_cap_rows: u32,
    pub clouds: u32,
}

/// A finished texture and how it was made
#[derive(Debug, Clone)]
pub struct GeneratedSurface {
    pub raster: SurfaceRaster,
    pub stats: SurfaceStats,
    /// Parameters after clamping
    pub params: PlanetParameters,
}

/// Number of main landmasses for a land coverage
pub fn landmass_count(land_percent: f32) -> u32 {
    if land_percent <= 0.0 {
        return 0;
    }
    ((land_percent / LANDMASS_PERCENT).floor() as u32).max(MIN_LANDMASSES)
}

/// Ice cap thickness as a fraction of raster height, 0 when too warm
pub fn ice_cap_fraction(temperature: f32) -> f32 {
    if temperature >= ICE_CAP_TEMPERATURE {
        return 0.0;
    }
    let colder = (ICE_CAP_TEMPERATURE - temperature) / 60.0;
    (ICE_CAP_MIN + colder * (ICE_CAP_MAX - ICE_CAP_MIN)).clamp(ICE_CAP_MIN, ICE_CAP_MAX)
}

/// Turns planet parameters into textures of a fixed size
#[derive(Debug, Clone)]
pub struct SurfaceGenerator {
    width: u32,
    height: u32,
    /// Stipple texture specks onto landmasses
    detail: bool,
    /// Seed from the parameters; otherwise every call draws fresh entropy
    reproducible: bool,
}

impl Default for SurfaceGenerator {
    fn default() -> Self {
        Self::new(RASTER_WIDTH, RASTER_HEIGHT)
    }
}

impl SurfaceGenerator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(2),
            height: height.max(1),
            detail: true,
            reproducible: true,
        }
    }

    /// Generator sized and configured by the quality preset
    pub fn from_settings(settings: &Settings) -> Self {
        let (width, height) = settings.quality.raster_size();
        Self {
            detail: settings.quality.surface_detail(),
            reproducible: settings.reproducible_planets,
            ..Self::new(width, height)
        }
    }

    pub fn with_detail(mut self, detail: bool) -> Self {
        self.detail = detail;
        self
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Generate a texture. Equal parameters give equal textures unless the
    /// generator was configured for fresh randomness.
    pub fn generate(&self, params: &PlanetParameters) -> GeneratedSurface {
        if self.reproducible {
            self.generate_seeded(params, params.seed())
        } else {
            self.generate_with_rng(params, &mut rand::rng())
        }
    }

    /// Generate with an explicit seed
    pub fn generate_seeded(&self, params: &PlanetParameters, seed: u64) -> GeneratedSurface {
        let mut rng = Pcg32::seed_from_u64(seed);
        self.generate_with_rng(params, &mut rng)
    }

    /// Generate drawing from any random source
    pub fn generate_with_rng(&self, params: &PlanetParameters, rng: &mut impl Rng) -> GeneratedSurface {
        let params = params.clamped();
        let base = if params.temperature_celsius < 0.0 {
            FROZEN_OCEAN_COLOR
        } else {
            OCEAN_COLOR
        };
        let mut raster = SurfaceRaster::new(self.width, self.height, base);
        let mut stats = SurfaceStats::default();

        let main = landmass_count(params.land_percent);
        if main > 0 {
            let avg_size = (raster.area() * params.land_percent / 100.0 / main as f32).sqrt();
            for _ in 0..main {
                let terrain = TerrainKind::for_temperature(params.temperature_celsius, rng);
                self.paint_landmass(&mut raster, avg_size, terrain, rng);
                stats.landmasses += 1;
            }

            let ranges = (main as f32 * MOUNTAIN_RATIO).ceil() as u32;
            for _ in 0..ranges {
                self.paint_landmass(&mut raster, avg_size * 0.5, TerrainKind::Mountain, rng);
                stats.mountain_ranges += 1;
            }
        }

        let ice = ice_cap_fraction(params.temperature_celsius);
        if ice > 0.0 {
            stats.ice_cap_rows = paint_ice_caps(&mut raster, ice);
        }

        if let Some(opacity) = params.atmosphere.cloud_opacity() {
            let count = rng.random_range(CLOUDS_MIN..=CLOUDS_MAX);
            for _ in 0..count {
                let center = Vec2::new(
                    rng.random_range(0.0..self.width as f32),
                    rng.random_range(0.0..self.height as f32),
                );
                let radius = self.width as f32 * rng.random_range(0.03..0.08);
                raster.radial_blob(center, radius, Color::WHITE.with_alpha(opacity));
            }
            stats.clouds = count;
        }

        log::info!(
            "Generated {}x{} planet texture: {} landmasses, {} ranges, {} ice rows, {} clouds",
            self.width,
            self.height,
            stats.landmasses,
            stats.mountain_ranges,
            stats.ice_cap_rows,
            stats.clouds
        );

        GeneratedSurface {
            raster,
            stats,
            params,
        }
    }

    fn paint_landmass(
        &self,
        raster: &mut SurfaceRaster,
        avg_size: f32,
        terrain: TerrainKind,
        rng: &mut impl Rng,
    ) {
        let height = self.height as f32;
        let size = (avg_size * rng.random_range(0.6..1.4)).min(height * MAX_SIZE_FRACTION);
        let center = Vec2::new(
            rng.random_range(0.0..self.width as f32),
            rng.random_range(height * CENTER_BAND.0..=height * CENTER_BAND.1),
        );
        let land = Landmass::generate(center, size, terrain, rng);
        let outline = land.smooth_outline();
        raster.radial_gradient_polygon(
            &outline,
            center,
            land.extent(),
            terrain.base_color(),
            terrain.edge_color(),
        );

        if self.detail {
            // Specks stay inside the smallest possible outline radius
            let specks = (size / 4.0) as u32;
            for _ in 0..specks {
                let r = size * 0.65 * rng.random::<f32>().sqrt();
                let theta = rng.random_range(0.0..std::f32::consts::TAU);
                let alpha = rng.random_range(0.1..0.3);
                let speck = rng.random_range(1.0..3.0);
                raster.stipple(
                    center + crate::polar_to_cartesian(r, theta),
                    speck,
                    Color::BLACK.with_alpha(alpha),
                );
            }
        }
    }
}

/// Paint top and bottom ice bands, returning the rows per band
fn paint_ice_caps(raster: &mut SurfaceRaster, fraction: f32) -> u32 {
    let height = raster.height();
    // Odd heights let the two bands share the middle row
    let rows = ((height as f32 * fraction).round() as u32)
        .max(1)
        .min(height.div_ceil(2));
    // Inner quarter of each band fades into the surface
    let fade = (rows / 4).max(1);
    let alpha_for = |depth: u32| {
        if depth + fade < rows {
            0.95
        } else {
            0.95 * (rows - depth) as f32 / (fade + 1) as f32
        }
    };
    raster.fill_rows(0, rows, |y| ICE_COLOR.with_alpha(alpha_for(y)));
    raster.fill_rows(height - rows, height, |y| {
        ICE_COLOR.with_alpha(alpha_for(height - 1 - y))
    });
    rows
}
