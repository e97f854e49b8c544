//! Asteroid dodger simulation
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One tick per animation frame, driven by the host
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod pilot;
pub mod state;
pub mod tick;

pub use pilot::demo_input;
pub use collision::{circles_overlap, is_offscreen, obstacle_hits_agent};
pub use state::{Agent, ArenaPhase, ArenaState, Edge, Obstacle, SessionSnapshot};
pub use tick::{TickInput, reset, start, tick};
