//! MediScan Web App (Leptos + WASM)

pub mod app;
pub mod bridge;
mod components;
mod logging;
pub mod storage;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    logging::init();
    leptos::mount::mount_to_body(app::App);
}
