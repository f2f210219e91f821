//! Tile Recall - a memory game with moving numbered tiles
//!
//! Core modules:
//! - `sim`: Game logic (itineraries, stage machine, collaborator traits)
//! - `anim`: Tween timeline that moves the tiles
//! - `render`: View projection and DOM output
//! - `platform`: Browser layout, timers and query string
//! - `config` / `settings`: Game configuration and saved preferences

pub mod anim;
pub mod config;
pub mod error;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;

pub use anim::Timeline;
pub use config::GameConfig;
pub use error::GameError;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Tiles per round unless configured otherwise
    pub const DEFAULT_TILE_COUNT: u32 = 6;
    /// Upper bound accepted from the tile-count input
    pub const MAX_TILE_COUNT: u32 = 30;

    /// Step durations (seconds)
    pub const DEFAULT_MIN_DURATION: f32 = 2.0;
    pub const DEFAULT_MAX_DURATION: f32 = 4.0;

    /// Seconds the numbers stay visible after start
    pub const DEFAULT_LEARN_DURATION: f32 = 3.0;
    /// Longest accepted learning phase (seconds)
    pub const MAX_LEARN_DURATION: f32 = 600.0;

    /// Waypoints per itinerary
    pub const ITINERARY_STEPS: usize = 10;

    /// Largest frame delta fed to the timeline (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
}
