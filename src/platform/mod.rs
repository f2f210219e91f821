//! Platform abstraction layer
//!
//! Browser implementations of the game's collaborators:
//! - Layout measurement from the DOM
//! - One-shot timers on `setTimeout`
//! - Query-string access and seeding
//!
//! Native builds use `sim::ManualTimers` and `sim::FixedLayout` instead.

#[cfg(target_arch = "wasm32")]
pub mod web;
