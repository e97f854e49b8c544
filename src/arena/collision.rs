//! Collision and bounds checks for the arena
//!
//! Asteroids are treated as circles and the rocket as a circle whose radius is
//! half its shorter side. Everything here is purely geometric.

use glam::Vec2;

use super::state::{Agent, Obstacle};

/// Circle overlap test: hit when the centers are strictly closer than the
/// sum of the radii. Touching exactly at the threshold is a miss.
#[inline]
pub fn circles_overlap(a: Vec2, b: Vec2, combined_radius: f32) -> bool {
    crate::within_distance(a, b, combined_radius)
}

/// Check if an asteroid hits the rocket
pub fn obstacle_hits_agent(obstacle: &Obstacle, agent: &Agent) -> bool {
    circles_overlap(obstacle.pos, agent.pos, obstacle.radius + agent.hit_radius())
}

/// Check if an asteroid has drifted more than two radii past any canvas edge
pub fn is_offscreen(obstacle: &Obstacle, width: f32, height: f32) -> bool {
    let margin = obstacle.radius * 2.0;
    obstacle.pos.x < -margin
        || obstacle.pos.x > width + margin
        || obstacle.pos.y < -margin
        || obstacle.pos.y > height + margin
}
