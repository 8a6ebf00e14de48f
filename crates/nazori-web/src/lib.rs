//! Browser bindings for the nazori game core.
//!
//! One `GameRunner` lives in a `thread_local!` slot. JS calls `game_init`
//! once, forwards pointer and button events, and drives `game_tick` from
//! `requestAnimationFrame`.

pub mod audio;
pub mod dom;
pub mod presenter;
pub mod runner;

use std::cell::RefCell;
use std::str::FromStr;

use nazori::{GameConfig, InputEvent, Mode};
use wasm_bindgen::prelude::*;

pub use presenter::WebPresenter;
pub use runner::GameRunner;

thread_local! {
    static RUNNER: RefCell<Option<GameRunner>> = const { RefCell::new(None) };
}

fn with_runner<R>(f: impl FnOnce(&mut GameRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
        Some(runner) => Some(f(runner)),
        None => {
            log::warn!("game not initialized; call game_init() first");
            None
        }
    })
}

/// Parse the host config. Empty input means defaults.
fn parse_config(json: &str) -> Result<GameConfig, JsValue> {
    if json.trim().is_empty() {
        return Ok(GameConfig::default());
    }
    GameConfig::from_json(json).map_err(|e| JsValue::from_str(&format!("bad config: {e}")))
}

#[wasm_bindgen]
pub fn game_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let mut config = parse_config(config_json)?;

    let level = log::Level::from_str(&config.log_level).unwrap_or(log::Level::Info);
    // A second init keeps the first logger.
    let _ = console_log::init_with_level(level);

    if config.seed.is_none() {
        config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
    }

    let mut runner = GameRunner::new(config)?;
    runner.init();
    RUNNER.with(|cell| *cell.borrow_mut() = Some(runner));
    log::info!("nazori: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// `name` is "paths"/"lines" or "tracing"/"hiragana".
#[wasm_bindgen]
pub fn game_start_mode(name: &str) {
    match Mode::from_name(name) {
        Some(mode) => {
            with_runner(|r| r.push_input(InputEvent::StartMode(mode)));
        }
        None => log::warn!("unknown mode {name:?}"),
    }
}

#[wasm_bindgen]
pub fn game_go_home() {
    with_runner(|r| r.push_input(InputEvent::Home));
}

/// The celebration overlay's button.
#[wasm_bindgen]
pub fn game_next() {
    with_runner(|r| r.push_input(InputEvent::Next));
}

#[wasm_bindgen]
pub fn game_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.pointer_down(x, y));
}

#[wasm_bindgen]
pub fn game_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.pointer_move(x, y));
}

#[wasm_bindgen]
pub fn game_pointer_up() {
    with_runner(|r| r.pointer_up());
}

/// Leaving the canvas ends the stroke.
#[wasm_bindgen]
pub fn game_pointer_leave() {
    with_runner(|r| r.pointer_up());
}

#[wasm_bindgen]
pub fn game_resize() {
    with_runner(|r| r.resize());
}
