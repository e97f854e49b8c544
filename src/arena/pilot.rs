//! Demo mode pilot
//!
//! Steers the rocket away from the closest incoming asteroid, drifting back
//! toward the middle of the canvas when nothing is near.

use glam::Vec2;

use super::state::ArenaState;
use super::tick::TickInput;

/// Asteroids farther than this (beyond their own radius) are ignored
const DANGER_DISTANCE: f32 = 160.0;
/// Axis components smaller than this don't press a key
const DEADZONE: f32 = 0.3;

/// Pick the keys to hold this tick
pub fn demo_input(state: &ArenaState) -> TickInput {
    let agent = state.agent.pos;

    // Most threatening asteroid: closest surface, but only if heading our way
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.dir.dot(agent - o.pos) > 0.0)
        .map(|o| (o, o.pos.distance(agent) - o.radius))
        .filter(|(_, gap)| *gap < DANGER_DISTANCE)
        .min_by(|a, b| a.1.total_cmp(&b.1));

    let desired = match threat {
        Some((o, _)) => {
            // Flee sideways relative to its heading, on whichever side we already are
            let side = o.dir.perp().normalize_or_zero();
            let offset = agent - o.pos;
            let flee = if side.dot(offset) >= 0.0 { side } else { -side };
            (flee + offset.normalize_or_zero() * 0.5).normalize_or_zero()
        }
        None => {
            let center = Vec2::new(state.config.width / 2.0, state.config.height / 2.0);
            let to_center = center - agent;
            if to_center.length() < state.agent.speed * 2.0 {
                Vec2::ZERO
            } else {
                to_center.normalize_or_zero()
            }
        }
    };

    TickInput {
        up: desired.y < -DEADZONE,
        down: desired.y > DEADZONE,
        left: desired.x < -DEADZONE,
        right: desired.x > DEADZONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::state::Obstacle;
    use crate::arena::tick::{start, tick};
    use crate::settings::ArenaConfig;

    #[test]
    fn test_idle_pilot_stays_put() {
        let mut state = ArenaState::new(1, ArenaConfig::default(), 0);
        start(&mut state);
        assert_eq!(demo_input(&state), TickInput::default());
    }

    #[test]
    fn test_pilot_dodges_incoming() {
        let mut state = ArenaState::new(1, ArenaConfig::default(), 0);
        start(&mut state);
        let agent = state.agent.pos;
        // Coming straight down from above, slightly left of the rocket
        state.obstacles.push(Obstacle {
            id: 99,
            pos: agent + Vec2::new(-10.0, -120.0),
            dir: Vec2::new(0.0, 1.0),
            speed: 3.0,
            radius: 30.0,
            outline: Vec::new(),
            rotation: 0.0,
            rotation_speed: 0.0,
        });
        let input = demo_input(&state);
        assert!(input.right);
        assert!(!input.left);
    }

    #[test]
    fn test_demo_sessions_score() {
        let run = |use_pilot: bool| {
            let mut state = ArenaState::new(2024, ArenaConfig::default(), 0);
            start(&mut state);
            for _ in 0..20_000 {
                let input = if use_pilot { demo_input(&state) } else { TickInput::default() };
                if tick(&mut state, &input, crate::consts::FRAME_MS).is_over() {
                    break;
                }
            }
            state.score
        };
        assert!(run(true) > 0);
        assert!(run(false) > 0);
    }
}
