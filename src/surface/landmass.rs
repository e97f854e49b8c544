//! Landmass shapes and terrain selection

use glam::Vec2;
use rand::Rng;

use super::color::Color;
use crate::consts::LANDMASS_SEGMENTS;

/// Quadratic curve samples per outline edge
const CURVE_STEPS: usize = 4;

/// Terrain painted on a landmass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    Forest,
    Desert,
    Mountain,
    /// Temperate grassland
    Default,
}

impl TerrainKind {
    /// Base fill color (center of the gradient)
    pub fn base_color(&self) -> Color {
        match self {
            TerrainKind::Forest => Color::hex(0x2D6A27),
            TerrainKind::Desert => Color::hex(0xC2A15A),
            TerrainKind::Mountain => Color::hex(0x6E6259),
            TerrainKind::Default => Color::hex(0x4F7942),
        }
    }

    /// Gradient edge color
    pub fn edge_color(&self) -> Color {
        self.base_color().shade(0.6)
    }

    /// Pick terrain for a main landmass from the planet's temperature
    pub fn for_temperature(temperature: f32, rng: &mut impl Rng) -> Self {
        let roll: f32 = rng.random();
        if temperature > 40.0 {
            if roll < 0.7 { TerrainKind::Desert } else { TerrainKind::Mountain }
        } else if temperature < 0.0 {
            if roll < 0.6 { TerrainKind::Forest } else { TerrainKind::Mountain }
        } else if roll < 0.4 {
            TerrainKind::Forest
        } else if roll < 0.6 {
            TerrainKind::Default
        } else if roll < 0.8 {
            TerrainKind::Desert
        } else {
            TerrainKind::Mountain
        }
    }
}

/// One generated continent or mountain range
#[derive(Debug, Clone)]
pub struct Landmass {
    pub center: Vec2,
    pub size: f32,
    pub terrain: TerrainKind,
    /// Perturbed radius for each of the evenly spaced vertices
    pub radii: Vec<f32>,
}

impl Landmass {
    /// Random outline around `center` with each radius in `[0.7, 1.3] × size`
    pub fn generate(center: Vec2, size: f32, terrain: TerrainKind, rng: &mut impl Rng) -> Self {
        let radii = (0..LANDMASS_SEGMENTS)
            .map(|_| size * rng.random_range(0.7..=1.3))
            .collect();
        Self {
            center,
            size,
            terrain,
            radii,
        }
    }

    /// Outline vertices in raster coordinates
    pub fn vertices(&self) -> Vec<Vec2> {
        let n = self.radii.len();
        self.radii
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let theta = i as f32 / n as f32 * std::f32::consts::TAU;
                self.center + crate::polar_to_cartesian(*r, theta)
            })
            .collect()
    }

    /// Smoothed outline: quadratic curves through edge midpoints with the
    /// original vertices as control points
    pub fn smooth_outline(&self) -> Vec<Vec2> {
        let vertices = self.vertices();
        let n = vertices.len();
        if n < 3 {
            return vertices;
        }
        let mut outline = Vec::with_capacity(n * CURVE_STEPS);
        for i in 0..n {
            let control = vertices[i];
            let start = (vertices[(i + n - 1) % n] + control) * 0.5;
            let end = (control + vertices[(i + 1) % n]) * 0.5;
            for step in 0..CURVE_STEPS {
                let t = step as f32 / CURVE_STEPS as f32;
                let u = 1.0 - t;
                outline.push(start * (u * u) + control * (2.0 * u * t) + end * (t * t));
            }
        }
        outline
    }

    /// Largest outline radius
    pub fn extent(&self) -> f32 {
        self.radii.iter().copied().fold(0.0, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_radii_within_band() {
        let mut rng = Pcg32::seed_from_u64(1);
        let land = Landmass::generate(Vec2::new(100.0, 100.0), 50.0, TerrainKind::Forest, &mut rng);
        assert_eq!(land.radii.len(), LANDMASS_SEGMENTS);
        for r in &land.radii {
            assert!((35.0..=65.0).contains(r));
        }
        assert!(land.extent() <= 65.0);
    }

    #[test]
    fn test_smooth_outline_stays_inside_hull() {
        let mut rng = Pcg32::seed_from_u64(2);
        let land = Landmass::generate(Vec2::new(0.0, 0.0), 40.0, TerrainKind::Desert, &mut rng);
        let outline = land.smooth_outline();
        assert_eq!(outline.len(), LANDMASS_SEGMENTS * CURVE_STEPS);
        for p in &outline {
            assert!(p.length() <= land.extent() + 1e-3);
        }
    }

    #[test]
    fn test_terrain_by_temperature() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..200 {
            let hot = TerrainKind::for_temperature(60.0, &mut rng);
            assert!(matches!(hot, TerrainKind::Desert | TerrainKind::Mountain));
            let cold = TerrainKind::for_temperature(-20.0, &mut rng);
            assert!(matches!(cold, TerrainKind::Forest | TerrainKind::Mountain));
        }
    }

    #[test]
    fn test_temperate_mixes_all_kinds() {
        let mut rng = Pcg32::seed_from_u64(5);
        let kinds: std::collections::HashSet<_> = (0..400)
            .map(|_| TerrainKind::for_temperature(20.0, &mut rng))
            .collect();
        assert_eq!(kinds.len(), 4);
        assert!(kinds.contains(&TerrainKind::Default));
    }

    #[test]
    fn test_edge_is_darker() {
        let base = TerrainKind::Desert.base_color();
        let edge = TerrainKind::Desert.edge_color();
        assert!(edge.r < base.r && edge.g < base.g);
    }
}
