//! Procedural planet surfaces
//!
//! Pure generation: parameters (plus a seed) in, RGBA texture out. No
//! rendering or platform dependencies; the 3D viewer uploads `as_bytes()`.

pub mod color;
pub mod generator;
pub mod landmass;
pub mod params;
pub mod raster;

pub use color::{Color, Rgba8};
pub use generator::{GeneratedSurface, SurfaceGenerator, SurfaceStats, ice_cap_fraction, landmass_count};
pub use landmass::{Landmass, TerrainKind};
pub use params::{AtmosphereKind, PlanetParameters};
pub use raster::SurfaceRaster;
