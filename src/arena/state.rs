//! Arena state and core simulation types
//!
//! Everything a session needs between ticks lives here, owned by the host.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::tick::TickInput;
use crate::consts::*;
use crate::settings::ArenaConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    /// Waiting on the start screen
    Idle,
    /// Active gameplay
    Running,
    /// Rocket was hit, final score captured
    Over,
}

/// The player's rocket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Center position in canvas coordinates (y grows downward)
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Units moved per tick along each held direction
    pub speed: f32,
    /// Facing angle from the last direction pressed (radians)
    pub angle: f32,
}

impl Agent {
    /// Rocket centered on the canvas
    pub fn centered(config: &ArenaConfig) -> Self {
        Self {
            pos: Vec2::new(config.width / 2.0, config.height / 2.0),
            width: AGENT_WIDTH,
            height: AGENT_HEIGHT,
            speed: config.agent_speed,
            angle: 0.0,
        }
    }

    /// Radius used for circle collision
    #[inline]
    pub fn hit_radius(&self) -> f32 {
        self.width.min(self.height) / 2.0
    }

    /// Clamp so the whole bounding box stays on the canvas
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        // max then min so an undersized canvas pins to the upper bound instead of panicking
        self.pos.x = self.pos.x.max(half_w).min(width - half_w);
        self.pos.y = self.pos.y.max(half_h).min(height - half_h);
    }
}

/// Canvas edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// A drifting, spinning asteroid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Direction vector, scaled by `speed` each tick
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Outline vertices relative to the center, before rotation
    pub outline: Vec<Vec2>,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Rotation per tick (radians)
    pub rotation_speed: f32,
}

impl Obstacle {
    /// Spawn just outside `edge` with an inward-biased heading
    pub fn spawn(id: u32, edge: Edge, width: f32, height: f32, rng: &mut impl Rng) -> Self {
        let radius = rng.random_range(ASTEROID_RADIUS_MIN..ASTEROID_RADIUS_MAX);
        let points = rng.random_range(ASTEROID_POINTS_MIN..ASTEROID_POINTS_MAX);
        let rotation_speed = rng.random_range(-ASTEROID_MAX_SPIN..ASTEROID_MAX_SPIN);
        let speed = rng.random_range(ASTEROID_SPEED_MIN..ASTEROID_SPEED_MAX);

        let across = rng.random_range(-1.0..1.0);
        let inward = rng.random_range(1.0..3.0);
        let (pos, dir) = match edge {
            Edge::Top => (
                Vec2::new(rng.random_range(0.0..width), -radius),
                Vec2::new(across, inward),
            ),
            Edge::Right => (
                Vec2::new(width + radius, rng.random_range(0.0..height)),
                Vec2::new(-inward, across),
            ),
            Edge::Bottom => (
                Vec2::new(rng.random_range(0.0..width), height + radius),
                Vec2::new(across, -inward),
            ),
            Edge::Left => (
                Vec2::new(-radius, rng.random_range(0.0..height)),
                Vec2::new(inward, across),
            ),
        };

        let outline = (0..points)
            .map(|i| {
                let theta = i as f32 / points as f32 * std::f32::consts::TAU;
                let r = radius + rng.random_range(0.0..radius * 0.2);
                crate::polar_to_cartesian(r, theta)
            })
            .collect();

        Self {
            id,
            pos,
            dir,
            speed,
            radius,
            outline,
            rotation: 0.0,
            rotation_speed,
        }
    }

    /// Move one tick along the heading and spin
    pub fn advance(&mut self) {
        self.pos += self.dir * self.speed;
        self.rotation += self.rotation_speed;
    }

    /// Outline in canvas coordinates (rotated and translated)
    pub fn world_outline(&self) -> Vec<Vec2> {
        let rot = Vec2::from_angle(self.rotation);
        self.outline.iter().map(|v| self.pos + rot.rotate(*v)).collect()
    }
}

/// Everything a renderer needs after a tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: ArenaPhase,
    pub score: u64,
    pub high_score: u64,
    /// Set on the tick that ended the session with a new best
    pub new_high_score: bool,
    pub agent: Agent,
    pub obstacles: Vec<Obstacle>,
}

impl SessionSnapshot {
    pub fn is_over(&self) -> bool {
        self.phase == ArenaPhase::Over
    }
}

/// Complete arena state (seeded, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Canvas and tuning this session runs with
    pub config: ArenaConfig,
    pub phase: ArenaPhase,
    pub score: u64,
    /// Best score seen, loaded from storage by the host
    pub high_score: u64,
    /// True once this session beat the previous best
    pub new_high_score: bool,
    /// Simulation clock (ms since start)
    pub time_ms: f64,
    /// Clock value of the most recent spawn
    pub last_spawn_ms: f64,
    /// Ticks advanced while running
    pub time_ticks: u64,
    /// Asteroids spawned this session, removals included
    pub spawned_total: u32,
    pub agent: Agent,
    /// Active asteroids (sorted by id)
    pub obstacles: Vec<Obstacle>,
    /// Keys held on the previous tick, for detecting new presses
    #[serde(skip)]
    pub(crate) held: TickInput,
    #[serde(skip, default = "default_rng")]
    pub(crate) rng: Pcg32,
    next_id: u32,
}

fn default_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

impl ArenaState {
    /// Create an idle arena with the given seed and best score
    pub fn new(seed: u64, config: ArenaConfig, high_score: u64) -> Self {
        let config = config.sanitized();
        Self {
            seed,
            agent: Agent::centered(&config),
            config,
            phase: ArenaPhase::Idle,
            score: 0,
            high_score,
            new_high_score: false,
            time_ms: 0.0,
            last_spawn_ms: 0.0,
            time_ticks: 0,
            spawned_total: 0,
            obstacles: Vec::new(),
            held: TickInput::default(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Clear per-session fields, keeping the seed stream and best score
    pub(crate) fn clear_session(&mut self) {
        self.score = 0;
        self.new_high_score = false;
        self.time_ms = 0.0;
        self.last_spawn_ms = 0.0;
        self.time_ticks = 0;
        self.spawned_total = 0;
        self.agent = Agent::centered(&self.config);
        self.obstacles.clear();
        self.held = TickInput::default();
    }

    /// Spawn one asteroid outside a random edge
    pub fn spawn_obstacle(&mut self) {
        let id = self.next_entity_id();
        let edge = Edge::ALL[self.rng.random_range(0..Edge::ALL.len())];
        let obstacle = Obstacle::spawn(
            id,
            edge,
            self.config.width,
            self.config.height,
            &mut self.rng,
        );
        log::debug!("Asteroid {} spawned from {:?} (r={:.1})", id, edge, obstacle.radius);
        self.obstacles.push(obstacle);
        self.spawned_total += 1;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            new_high_score: self.new_high_score,
            agent: self.agent.clone(),
            obstacles: self.obstacles.clone(),
        }
    }

    /// Ensure obstacles are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
    }
}
