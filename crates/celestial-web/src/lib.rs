//! Browser embedding for `celestial-engine`.
//!
//! One backdrop per page: `celestial_init` mounts the engine on a canvas,
//! the remaining exports forward host notifications, and
//! `celestial_dispose` unmounts it. wasm-bindgen cannot export the generic
//! engine type, so it lives in a `thread_local!` behind free functions.

pub mod canvas;
pub mod images;
pub mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use celestial_engine::{CelestialEngine, Catalogs, EngineError, EntityId, SceneConfig, Theme};
use glam::Vec2;
use serde::Deserialize;
use wasm_bindgen::prelude::*;

pub use canvas::CanvasSurface;
pub use images::{DrawableStore, WebDrawableProvider};
pub use scheduler::RafScheduler;

thread_local! {
    static ENGINE: RefCell<Option<CelestialEngine<CanvasSurface>>> = const { RefCell::new(None) };
}

/// Run `f` against the mounted engine. `None` when nothing is mounted.
fn with_engine<R>(f: impl FnOnce(&mut CelestialEngine<CanvasSurface>) -> R) -> Option<R> {
    ENGINE.with(|cell| {
        let Ok(mut borrow) = cell.try_borrow_mut() else {
            log::warn!("celestial: re-entrant call ignored");
            return None;
        };
        borrow.as_mut().map(f)
    })
}

/// Adapter-only keys of the host option bag. Engine keys are read by
/// `SceneConfig` from the same document.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct WebOptions {
    /// Prefix for `silhouettes/...` and `planets/...` artwork paths.
    asset_base: String,
    /// Initial theme id (`"dark"` or anything else for light).
    theme: Option<String>,
    /// Start ticking right after mounting (default: true).
    autostart: Option<bool>,
}

fn js_error(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn on_frame() {
    with_engine(|e| e.tick());
}

/// Mount the backdrop on `<canvas id=canvas_id>`.
///
/// `options_json` is the host option bag (empty for defaults).
/// `texture_generator`, when given, is called as
/// `(bodyName, resolution) => { canvas, dispose }`.
#[wasm_bindgen]
pub fn celestial_init(
    canvas_id: &str,
    options_json: &str,
    texture_generator: Option<js_sys::Function>,
) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let json = if options_json.trim().is_empty() { "{}" } else { options_json };
    let mut config = SceneConfig::from_json(json).map_err(js_error)?;
    let options: WebOptions = serde_json::from_str(json).map_err(|e| js_error(e.into()))?;
    if config.seed.is_none() {
        config.seed = Some(js_sys::Date::now() as u64);
    }

    let window = web_sys::window().ok_or_else(|| js_error(EngineError::SurfaceMissing("no window".into())))?;
    let store = DrawableStore::new();
    let surface = CanvasSurface::from_element_id(canvas_id, store.clone()).map_err(js_error)?;
    let provider = WebDrawableProvider::new(store, options.asset_base, texture_generator);
    let catalogs = Catalogs::builtin().map_err(js_error)?;

    let mut engine = CelestialEngine::new(
        surface,
        config,
        Rc::new(catalogs),
        Box::new(provider),
        Box::new(RafScheduler::new(window, on_frame)),
    )
    .map_err(js_error)?;
    if let Some(theme) = options.theme.as_deref() {
        engine.set_theme(Theme::from_id(theme));
    }
    if options.autostart.unwrap_or(true) {
        engine.start();
    }

    // Unmount any previous backdrop outside the borrow; its teardown may
    // call back into JS.
    let previous = ENGINE.with(|cell| cell.borrow_mut().replace(engine));
    drop(previous);

    log::info!("celestial: mounted on #{canvas_id}");
    Ok(())
}

/// Stop the loop, release generated textures and unmount.
#[wasm_bindgen]
pub fn celestial_dispose() {
    let engine = ENGINE.with(|cell| cell.borrow_mut().take());
    if let Some(mut engine) = engine {
        engine.teardown();
        log::info!("celestial: disposed");
    }
}

// ── Loop control ──

#[wasm_bindgen]
pub fn celestial_start() {
    with_engine(|e| e.start());
}

#[wasm_bindgen]
pub fn celestial_stop() {
    with_engine(|e| e.stop());
}

#[wasm_bindgen]
pub fn celestial_restart() {
    with_engine(|e| e.restart());
}

#[wasm_bindgen]
pub fn celestial_is_running() -> bool {
    with_engine(|e| e.is_running()).unwrap_or(false)
}

// ── Host notifications ──

#[wasm_bindgen]
pub fn celestial_resize(width: f32, height: f32) {
    with_engine(|e| e.on_resize(Vec2::new(width, height)));
}

#[wasm_bindgen]
pub fn celestial_pointer_move(x: f32, y: f32) {
    with_engine(|e| e.set_pointer(Vec2::new(x, y)));
}

#[wasm_bindgen]
pub fn celestial_pointer_leave() {
    with_engine(|e| e.clear_pointer());
}

#[wasm_bindgen]
pub fn celestial_set_theme(theme: &str) {
    with_engine(|e| e.set_theme(Theme::from_id(theme)));
}

#[wasm_bindgen]
pub fn celestial_set_config(options_json: &str) -> Result<(), JsValue> {
    let config = SceneConfig::from_json(options_json).map_err(js_error)?;
    with_engine(|e| e.set_config(config))
        .unwrap_or(Ok(()))
        .map_err(js_error)
}

// ── Visibility toggles ──

#[wasm_bindgen]
pub fn celestial_set_show_constellation_names(show: bool) {
    with_engine(|e| e.set_show_constellation_names(show));
}

#[wasm_bindgen]
pub fn celestial_set_show_star_names(show: bool) {
    with_engine(|e| e.set_show_star_names(show));
}

#[wasm_bindgen]
pub fn celestial_set_show_silhouettes(show: bool) {
    with_engine(|e| e.set_show_silhouettes(show));
}

#[wasm_bindgen]
pub fn celestial_set_show_planets(show: bool) {
    with_engine(|e| e.set_show_planets(show));
}

#[wasm_bindgen]
pub fn celestial_set_show_sun(show: bool) {
    with_engine(|e| e.set_show_sun(show));
}

// ── Runtime entities ──

#[wasm_bindgen]
pub fn celestial_add_star() -> Option<u32> {
    with_engine(|e| e.add_star()).flatten().map(|id| id.0)
}

#[wasm_bindgen]
pub fn celestial_add_planet(name: &str) -> Option<u32> {
    with_engine(|e| e.add_planet(name)).flatten().map(|id| id.0)
}

#[wasm_bindgen]
pub fn celestial_add_constellation(name: &str) -> Option<u32> {
    with_engine(|e| e.add_constellation(name)).flatten().map(|id| id.0)
}

#[wasm_bindgen]
pub fn celestial_add_random_constellation() -> Option<u32> {
    with_engine(|e| e.add_random_constellation()).flatten().map(|id| id.0)
}

#[wasm_bindgen]
pub fn celestial_remove_star(id: u32) -> bool {
    with_engine(|e| e.remove_star(EntityId(id))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn celestial_remove_planet(id: u32) -> bool {
    with_engine(|e| e.remove_planet(EntityId(id))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn celestial_remove_constellation(id: u32) -> bool {
    with_engine(|e| e.remove_constellation(EntityId(id))).unwrap_or(false)
}

#[wasm_bindgen]
pub fn celestial_clear_stars() {
    with_engine(|e| e.clear_stars());
}

#[wasm_bindgen]
pub fn celestial_clear_planets() {
    with_engine(|e| e.clear_planets());
}

#[wasm_bindgen]
pub fn celestial_clear_constellations() {
    with_engine(|e| e.clear_constellations());
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn celestial_assets_loaded() -> u32 {
    with_engine(|e| e.asset_status().loaded as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn celestial_assets_total() -> u32 {
    with_engine(|e| e.asset_status().total as u32).unwrap_or(0)
}

#[wasm_bindgen]
pub fn celestial_available_constellations() -> js_sys::Array {
    let keys = with_engine(|e| e.available_constellations()).unwrap_or_default();
    keys.iter().map(|k| JsValue::from_str(k)).collect()
}
