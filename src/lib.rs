/// Pocket Mentor - Chrome Extension that keeps AI study notes
/// Built with Rust + WASM + Yew

mod ai;
mod background;
mod bridge;
mod config;
mod dispatcher;
mod error;
mod menu;
mod note;
mod render;
mod storage;
mod ui;

use wasm_bindgen::prelude::*;

pub use background::{on_installed, on_menu_click};

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Start the Yew app for the notebook popup
#[wasm_bindgen]
pub fn start_notebook() {
    yew::Renderer::<ui::notebook::NotebookPage>::new().render();
}
