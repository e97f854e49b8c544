//! Solar system designer
//!
//! Planets ride circular orbits in the XZ plane at a shared angular speed.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Radians per second along every orbit
pub const ORBIT_ANGULAR_SPEED: f32 = 0.5;
/// Spacing between successive orbits (AU)
pub const ORBIT_SPACING: f32 = 5.0;
/// Points per orbit path loop
pub const ORBIT_PATH_SEGMENTS: usize = 64;

/// A designed planet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitingPlanet {
    pub id: u32,
    pub name: String,
    /// CSS-style hex color
    pub color: String,
    /// Radius relative to Earth
    pub size: f32,
    /// Orbit radius (AU)
    pub orbit_radius: f32,
}

impl OrbitingPlanet {
    /// Position at `time` seconds
    pub fn position(&self, time: f32) -> Vec3 {
        let theta = time * ORBIT_ANGULAR_SPEED;
        Vec3::new(theta.cos() * self.orbit_radius, 0.0, theta.sin() * self.orbit_radius)
    }
}

/// Closed loop of `segments + 1` points tracing an orbit
pub fn orbit_path(radius: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(3);
    (0..=segments)
        .map(|i| {
            let theta = i as f32 / segments as f32 * std::f32::consts::TAU;
            Vec3::new(theta.cos() * radius, 0.0, theta.sin() * radius)
        })
        .collect()
}

/// The designer's planet list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolarSystem {
    pub planets: Vec<OrbitingPlanet>,
}

impl Default for SolarSystem {
    fn default() -> Self {
        let preset = |id: u32, name: &str, color: &str, size: f32, orbit_radius: f32| OrbitingPlanet {
            id,
            name: name.to_string(),
            color: color.to_string(),
            size,
            orbit_radius,
        };
        Self {
            planets: vec![
                preset(1, "Rocky Planet", "#ff6b6b", 1.0, 5.0),
                preset(2, "Gas Giant", "#4ecdc4", 2.5, 10.0),
                preset(3, "Ice World", "#45b7d1", 1.5, 15.0),
            ],
        }
    }
}

impl SolarSystem {
    pub fn empty() -> Self {
        Self { planets: Vec::new() }
    }

    /// Add a randomly colored and sized planet on the next orbit out
    pub fn add_planet(&mut self, rng: &mut impl Rng) -> &OrbitingPlanet {
        let n = self.planets.len() as u32;
        let id = self.planets.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let planet = OrbitingPlanet {
            id,
            name: format!("Planet {}", n + 1),
            color: format!("#{:06x}", rng.random_range(0..0x100_0000u32)),
            size: rng.random_range(0.5..2.5),
            orbit_radius: (n + 1) as f32 * ORBIT_SPACING,
        };
        log::debug!("Added {} at {} AU", planet.name, planet.orbit_radius);
        self.planets.push(planet);
        &self.planets[self.planets.len() - 1]
    }

    /// Positions of every planet at `time` seconds
    pub fn positions(&self, time: f32) -> Vec<(u32, Vec3)> {
        self.planets.iter().map(|p| (p.id, p.position(time))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_defaults() {
        let system = SolarSystem::default();
        let radii: Vec<f32> = system.planets.iter().map(|p| p.orbit_radius).collect();
        assert_eq!(radii, vec![5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_add_planet() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut system = SolarSystem::default();
        let planet = system.add_planet(&mut rng).clone();
        assert_eq!(planet.id, 4);
        assert_eq!(planet.name, "Planet 4");
        assert_eq!(planet.orbit_radius, 20.0);
        assert!((0.5..2.5).contains(&planet.size));
        assert_eq!(planet.color.len(), 7);
        assert!(planet.color.starts_with('#'));
    }

    #[test]
    fn test_position_stays_on_orbit() {
        let system = SolarSystem::default();
        for t in [0.0, 1.0, 7.3, 100.0] {
            for (id, pos) in system.positions(t) {
                let planet = system.planets.iter().find(|p| p.id == id).unwrap();
                assert!((pos.length() - planet.orbit_radius).abs() < 1e-3);
                assert_eq!(pos.y, 0.0);
            }
        }
        let start = system.planets[0].position(0.0);
        assert!((start - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_orbit_path_closes() {
        let path = orbit_path(10.0, ORBIT_PATH_SEGMENTS);
        assert_eq!(path.len(), ORBIT_PATH_SEGMENTS + 1);
        assert!((path[0] - path[ORBIT_PATH_SEGMENTS]).length() < 1e-4);
    }
}
