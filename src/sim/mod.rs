//! Game logic
//!
//! Pure and platform-free:
//! - Seeded RNG only (one PCG stream per tile)
//! - No DOM, clock or rendering access; those come in through `services`

pub mod itinerary;
pub mod machine;
pub mod services;
pub mod state;
pub mod timers;

pub use itinerary::{
    DurationRange, Itinerary, Waypoint, generate_destination, generate_itinerary,
    generate_itinerary_with_steps, tile_rng,
};
pub use machine::Game;
pub use services::{
    Animator, BoundingBox, FixedLayout, Layout, Repeat, Size, Target, TimerHandle, Timers,
};
pub use state::{ClickOutcome, GameState, Outcome, Stage};
pub use timers::ManualTimers;
