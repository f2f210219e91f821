//! Collaborator contracts used by the game machine
//!
//! The machine never touches the DOM or a real clock. It talks to three
//! services: an animator that moves tiles, a layout that measures elements,
//! and a timer service for the learning countdown.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::itinerary::Waypoint;

/// An element the layout can measure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The play area the tiles move in
    Boundary,
    /// A numbered tile (1-based)
    Tile(u32),
}

impl Target {
    /// DOM id of the element
    pub fn element_id(&self) -> String {
        match self {
            Target::Boundary => "boundary".to_string(),
            Target::Tile(n) => format!("tile-{}", n),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.element_id())
    }
}

/// Measured element size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Legal travel range for a tile's top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Container minus tile, so a tile placed anywhere in range stays fully visible.
    /// A tile larger than its container gets a zero range on that axis.
    pub fn from_measurements(container: Size, tile: Size) -> Self {
        Self {
            width: container.width.saturating_sub(tile.width),
            height: container.height.saturating_sub(tile.height),
        }
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        x <= self.width && y <= self.height
    }
}

/// How a tile's movement sequence repeats once it reaches the end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repeat {
    /// Extra passes after the first one (`None` = forever)
    pub count: Option<u32>,
    /// Alternate forward and reverse passes
    pub yoyo: bool,
}

impl Repeat {
    pub const FOREVER_YOYO: Repeat = Repeat {
        count: None,
        yoyo: true,
    };

    pub const ONCE: Repeat = Repeat {
        count: Some(0),
        yoyo: false,
    };

    /// Total number of passes, `None` when unbounded
    pub fn passes(&self) -> Option<u64> {
        self.count.map(|c| c as u64 + 1)
    }
}

impl Default for Repeat {
    fn default() -> Self {
        Self::FOREVER_YOYO
    }
}

/// Tween engine driving the tiles
pub trait Animator {
    /// Move a tile to a position immediately
    fn place(&mut self, tile: u32, x: u32, y: u32);
    /// Append a timed movement to the tile's queue
    fn enqueue(&mut self, tile: u32, step: Waypoint);
    fn set_repeat(&mut self, tile: u32, repeat: Repeat);
    /// Drop every scheduled movement; tiles stay where they are
    fn cancel_all(&mut self);
    fn pause_all(&mut self);
    fn resume_all(&mut self);
    /// Forget every tile numbered above `tile_count`
    fn retain_tiles(&mut self, _tile_count: u32) {}
}

/// Element measurement
pub trait Layout {
    fn measure(&self, target: Target) -> Option<Size>;
}

/// Opaque id of a scheduled one-shot timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u32);

/// One-shot timers. Firing is reported back to the machine by the host
/// through `Game::on_timer` with the handle returned here.
pub trait Timers {
    fn schedule(&mut self, delay: Duration) -> TimerHandle;
    fn cancel(&mut self, handle: TimerHandle);
}

/// Layout with fixed sizes, for tests and the native demo
#[derive(Debug, Clone, Copy)]
pub struct FixedLayout {
    pub boundary: Size,
    pub tile: Size,
}

impl Layout for FixedLayout {
    fn measure(&self, target: Target) -> Option<Size> {
        match target {
            Target::Boundary => Some(self.boundary),
            Target::Tile(_) => Some(self.tile),
        }
    }
}
