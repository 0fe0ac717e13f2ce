//! Browser client for a server-authoritative chess game.
//!
//! The remote service owns the rules, legality checks, and the AI opponent;
//! this crate only renders the board, maps clicks to squares, and syncs over
//! two JSON endpoints. The local board is an optimistic guess that every
//! server response replaces wholesale.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod board;
pub mod client;
pub mod dom;
pub mod http;
pub mod input;
pub mod protocol;
pub mod scene;
pub mod types;
pub mod view;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
