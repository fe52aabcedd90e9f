//! Browser adapter for the pudorys floor-plan editor.
//!
//! Compiles to an empty crate off wasm; on `wasm32` it exports
//! [`Plan2dHandle`], which binds the core editor to an SVG element, a
//! room registry list, and the zoom/snap controls of the hosting page.

#[cfg(target_arch = "wasm32")]
mod dom_surface;
#[cfg(target_arch = "wasm32")]
mod handle;

#[cfg(target_arch = "wasm32")]
pub use handle::Plan2dHandle;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("pudorys web adapter loaded");
}
