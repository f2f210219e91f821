//! Page rendering
//!
//! `view` is the pure state projection; `dom` writes it to the document.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod view;

pub use view::{Marquee, TileView, ViewModel, class_names, project};
