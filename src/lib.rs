mod utils;

pub mod app;
pub mod audio;
pub mod color;
pub mod heart;
pub mod interaction;
pub mod particle;
pub mod projection;
pub mod rain;
pub mod render;
pub mod simulation;

use wasm_bindgen::prelude::*;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// Mount the scene onto the current page and start the frame loop. The
/// page must provide the canvas, buttons, layers, and audio element the
/// scene expects.
#[wasm_bindgen]
pub fn run() -> Result<(), JsValue> {
    utils::set_panic_hook();
    app::App::mount()
}
