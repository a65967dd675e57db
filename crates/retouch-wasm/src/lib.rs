//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate exposes the retouch-core edit-state engine to
//! JavaScript/TypeScript hosts.
//!
//! # Module Structure
//!
//! - `session` - Crop/draw edit sessions with draft and commit semantics
//! - `transform` - Stateless rotate/flip/is_modified over geometry objects
//! - `drawer` - Animation picker backed by a JS search callback
//! - `types` - Numeric codes for enums crossing the boundary
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession, available_aspects } from '@retouch/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession(state, undefined, undefined);
//! session.begin_crop();
//! session.set_aspect(available_aspects().indexOf("Square") + 1);
//! session.commit_crop();
//! ```

use wasm_bindgen::prelude::*;

mod drawer;
mod logger;
mod session;
mod transform;
mod types;

// Re-export public types
pub use drawer::JsAnimationDrawer;
pub use session::JsEditSession;
pub use transform::{flip, is_modified, rotate_clockwise, JsGeometry};
pub use types::{aspect_label, available_aspects};

/// Initialize the WASM module (called automatically on load).
///
/// Routes `log` records to the browser console at `Warn` and above.
#[wasm_bindgen(start)]
pub fn init() {
    logger::install_panic_hook();
    logger::install(log::LevelFilter::Warn);
}

/// Change console log verbosity: "off", "error", "warn", "info", "debug" or "trace".
#[wasm_bindgen]
pub fn set_log_level(level: &str) {
    logger::install(logger::level_from_str(level));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
