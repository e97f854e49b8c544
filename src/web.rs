//! Browser bindings
//!
//! The page owns the animation frame loop and the canvas/three.js drawing;
//! these exports hand it texture bytes and per-frame arena state.

use wasm_bindgen::prelude::*;

use crate::arena::{self, ArenaPhase, ArenaState, TickInput};
use crate::highscores::HighScore;
use crate::platform::{KeyValueStore, LocalStore, MemoryStore};
use crate::settings::{QualityPreset, Settings};
use crate::surface::{AtmosphereKind, PlanetParameters, SurfaceGenerator};

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    // A second init (hot reload) fails harmlessly
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Cosmic Arcade starting...");
}

fn open_store() -> Box<dyn KeyValueStore> {
    match LocalStore::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("LocalStorage unavailable, scores will not persist");
            Box::new(MemoryStore::new())
        }
    }
}

/// Generate a planet texture as RGBA bytes (width = 2 × height)
#[wasm_bindgen]
pub fn generate_planet_texture(
    water_percent: f32,
    land_percent: f32,
    temperature_celsius: f32,
    atmosphere: &str,
    quality: &str,
) -> Vec<u8> {
    let mut settings = Settings::load(open_store().as_ref());
    if let Some(preset) = QualityPreset::from_str(quality) {
        settings.quality = preset;
    }
    let params = PlanetParameters {
        water_percent,
        land_percent,
        temperature_celsius,
        atmosphere: AtmosphereKind::from_str(atmosphere).unwrap_or_default(),
        size_multiplier: 1.0,
    };
    SurfaceGenerator::from_settings(&settings)
        .generate(&params)
        .raster
        .into_bytes()
}

/// Texture width the given quality preset produces
#[wasm_bindgen]
pub fn planet_texture_width(quality: &str) -> u32 {
    QualityPreset::from_str(quality).unwrap_or_default().raster_size().0
}

/// One asteroid dodger instance owned by the page
#[wasm_bindgen]
pub struct ArenaHandle {
    state: ArenaState,
    high_score: HighScore,
    store: Box<dyn KeyValueStore>,
    input: TickInput,
}

#[wasm_bindgen]
impl ArenaHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> ArenaHandle {
        let store = open_store();
        let settings = Settings::load(store.as_ref());
        let high_score = HighScore::load(store.as_ref());
        ArenaHandle {
            state: ArenaState::new(seed as u64, settings.arena, high_score.best),
            high_score,
            store,
            input: TickInput::default(),
        }
    }

    pub fn start(&mut self) {
        self.input = TickInput::default();
        arena::start(&mut self.state);
    }

    pub fn reset(&mut self) {
        self.input = TickInput::default();
        arena::reset(&mut self.state);
    }

    /// Keyboard handler hook; returns true if the key was consumed
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        let flag = match key {
            "ArrowUp" => &mut self.input.up,
            "ArrowDown" => &mut self.input.down,
            "ArrowLeft" => &mut self.input.left,
            "ArrowRight" => &mut self.input.right,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    /// Advance one frame; returns true once the session is over
    pub fn tick(&mut self, dt_ms: f64) -> bool {
        let was_running = self.state.phase == ArenaPhase::Running;
        let snapshot = arena::tick(&mut self.state, &self.input, dt_ms);
        if was_running && snapshot.is_over() && self.high_score.record(snapshot.score) {
            if let Err(e) = self.high_score.save(self.store.as_mut()) {
                log::warn!("Failed to save high score: {}", e);
            }
        }
        snapshot.is_over()
    }

    pub fn score(&self) -> f64 {
        self.state.score as f64
    }

    pub fn high_score(&self) -> f64 {
        self.state.high_score as f64
    }

    pub fn is_running(&self) -> bool {
        self.state.phase == ArenaPhase::Running
    }

    pub fn agent_x(&self) -> f32 {
        self.state.agent.pos.x
    }

    pub fn agent_y(&self) -> f32 {
        self.state.agent.pos.y
    }

    pub fn agent_angle(&self) -> f32 {
        self.state.agent.angle
    }

    /// Flattened `[x, y, radius, rotation]` per asteroid
    pub fn obstacles(&self) -> Vec<f32> {
        self.state
            .obstacles
            .iter()
            .flat_map(|o| [o.pos.x, o.pos.y, o.radius, o.rotation])
            .collect()
    }

    /// Flattened `[x, y]` outline of the asteroid at `index`, in canvas space
    pub fn obstacle_outline(&self, index: usize) -> Vec<f32> {
        self.state
            .obstacles
            .get(index)
            .map(|o| o.world_outline().iter().flat_map(|v| [v.x, v.y]).collect())
            .unwrap_or_default()
    }
}
