//! Hop Cat core crate.
//!
//! A cat hops between platforms that drift down a canvas. The rules live in
//! [`sim`], which is plain Rust and runs natively (tests, tooling). The browser
//! side (canvas, input, frame loop) lives in the private `playfield` module and is
//! reached through the `#[wasm_bindgen]` exports below.

use wasm_bindgen::prelude::*;

pub mod sim;
mod playfield;

pub use playfield::{TICK_HZ, current_score, reset_game, start_game_with_stage};
#[cfg(feature = "serde_json")]
pub use playfield::start_game_with_config;
pub use sim::{
    ConfigError, Entity, Obstacle, SimConfig, SimEvent, SimSnapshot, Simulation, StagePreset,
    stage_by_name, stages,
};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    // A second init (e.g. tests re-entering start) is harmless.
    console_log::init_with_level(log::Level::Info).ok();
}

/// Start the game on the default ("calm") stage.
#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    let stage = stages()
        .first()
        .ok_or_else(|| JsValue::from_str("no stages defined"))?;
    playfield::start_with_config(stage.name, stage.blurb, stage.config.clone())
}
