//! Randomized tile itineraries
//!
//! Each tile gets a start position plus a fixed number of timed waypoints,
//! all drawn inside the tile's legal travel range. Nothing downstream needs
//! to clip: a waypoint outside the range can't be generated.

use std::num::NonZeroUsize;

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::services::BoundingBox;
use crate::consts::{DEFAULT_MAX_DURATION, DEFAULT_MIN_DURATION, ITINERARY_STEPS};
use crate::error::GameError;

/// A timed destination (pixels from the top-left of the travel range)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub x: u32,
    pub y: u32,
    /// Seconds to travel here from the previous waypoint
    pub duration: f32,
}

/// Inclusive range of step durations, in seconds. Only valid ranges
/// (`0 < min <= max`) can be built, deserialized ones included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDurationRange")]
pub struct DurationRange {
    min: f32,
    max: f32,
}

#[derive(Deserialize)]
struct RawDurationRange {
    min: f32,
    max: f32,
}

impl TryFrom<RawDurationRange> for DurationRange {
    type Error = GameError;

    fn try_from(raw: RawDurationRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl Default for DurationRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_DURATION,
            max: DEFAULT_MAX_DURATION,
        }
    }
}

impl DurationRange {
    pub fn new(min: f32, max: f32) -> Result<Self, GameError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    fn validate(&self) -> Result<(), GameError> {
        // NaN fails every comparison, so it lands here too
        if !(self.min > 0.0 && self.min <= self.max && self.max.is_finite()) {
            return Err(GameError::InvalidDurationRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    pub fn contains(&self, duration: f32) -> bool {
        duration >= self.min && duration <= self.max
    }
}

/// One tile's full movement plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    /// Initial placement (its duration is unused)
    pub start: Waypoint,
    pub steps: Vec<Waypoint>,
    /// Sum of step durations, start excluded
    pub total_duration: f32,
}

/// Independent RNG stream for one tile of one game
pub fn tile_rng(game_seed: u64, tile: u32) -> Pcg32 {
    Pcg32::new(game_seed, tile as u64)
}

/// Random waypoint inside `bounds`, duration snapped to tenths of a second
pub fn generate_destination<R: Rng>(
    rng: &mut R,
    bounds: BoundingBox,
    durations: DurationRange,
) -> Waypoint {
    let x = (bounds.width as f64 * rng.random::<f64>()).round() as u32;
    let y = (bounds.height as f64 * rng.random::<f64>()).round() as u32;

    let raw = rng.random_range(durations.min..=durations.max);
    // Rounding may step just outside a narrow range
    let duration = ((raw * 10.0).round() / 10.0).clamp(durations.min, durations.max);

    Waypoint {
        x: x.min(bounds.width),
        y: y.min(bounds.height),
        duration,
    }
}

/// Itinerary with the standard number of steps
pub fn generate_itinerary<R: Rng>(
    rng: &mut R,
    bounds: BoundingBox,
    durations: DurationRange,
) -> Itinerary {
    const STEPS: NonZeroUsize = match NonZeroUsize::new(ITINERARY_STEPS) {
        Some(n) => n,
        None => panic!("ITINERARY_STEPS must be non-zero"),
    };
    generate_itinerary_with_steps(rng, bounds, durations, STEPS)
}

pub fn generate_itinerary_with_steps<R: Rng>(
    rng: &mut R,
    bounds: BoundingBox,
    durations: DurationRange,
    steps: NonZeroUsize,
) -> Itinerary {
    let steps: Vec<Waypoint> = (0..steps.get())
        .map(|_| generate_destination(rng, bounds, durations))
        .collect();

    // Start drawn last so it doesn't shift the step sequence
    let start = generate_destination(rng, bounds, durations);

    let total_duration = steps.iter().map(|s| s.duration).sum();

    Itinerary {
        start,
        steps,
        total_duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn durations() -> DurationRange {
        DurationRange::new(2.0, 4.0).unwrap()
    }

    #[test]
    fn test_itinerary_has_ten_steps() {
        let mut rng = tile_rng(42, 1);
        let it = generate_itinerary(&mut rng, BoundingBox::new(720, 520), durations());
        assert_eq!(it.steps.len(), 10);
        let sum: f32 = it.steps.iter().map(|s| s.duration).sum();
        assert_eq!(it.total_duration, sum);
        assert!(it.total_duration >= 20.0 && it.total_duration <= 40.0);
    }

    #[test]
    fn test_duration_snapped_to_tenths() {
        let mut rng = tile_rng(7, 3);
        for _ in 0..200 {
            let wp = generate_destination(&mut rng, BoundingBox::new(100, 100), durations());
            let tenths = wp.duration * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-3, "{}", wp.duration);
        }
    }

    #[test]
    fn test_zero_bounds_pin_to_origin() {
        let mut rng = tile_rng(1, 1);
        let wp = generate_destination(&mut rng, BoundingBox::new(0, 0), durations());
        assert_eq!((wp.x, wp.y), (0, 0));
    }

    #[test]
    fn test_narrow_duration_range() {
        let narrow = DurationRange::new(2.04, 2.06).unwrap();
        let mut rng = tile_rng(9, 9);
        for _ in 0..50 {
            let wp = generate_destination(&mut rng, BoundingBox::new(10, 10), narrow);
            assert!(narrow.contains(wp.duration));
        }
    }

    #[test]
    fn test_tiles_use_independent_streams() {
        let bounds = BoundingBox::new(500, 500);
        let a = generate_itinerary(&mut tile_rng(99, 1), bounds, durations());
        let b = generate_itinerary(&mut tile_rng(99, 2), bounds, durations());
        let a_again = generate_itinerary(&mut tile_rng(99, 1), bounds, durations());
        assert_ne!(a, b);
        assert_eq!(a, a_again);
    }

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let ok: DurationRange = serde_json::from_str(r#"{"min":1.5,"max":2.5}"#).unwrap();
        assert_eq!((ok.min(), ok.max()), (1.5, 2.5));
        assert!(serde_json::from_str::<DurationRange>(r#"{"min":4.0,"max":2.0}"#).is_err());
    }

    #[test]
    fn test_default_range() {
        let range = DurationRange::default();
        assert_eq!((range.min(), range.max()), (2.0, 4.0));
    }

    #[test]
    fn test_invalid_duration_ranges() {
        assert!(DurationRange::new(4.0, 2.0).is_err());
        assert!(DurationRange::new(0.0, 2.0).is_err());
        assert!(DurationRange::new(f32::NAN, 2.0).is_err());
        assert!(DurationRange::new(3.0, 3.0).is_ok());
    }

    proptest! {
        #[test]
        fn waypoints_stay_in_bounds(
            seed in any::<u64>(),
            width in 0u32..4000,
            height in 0u32..4000,
            min in 0.1f32..5.0,
            spread in 0.0f32..5.0,
        ) {
            let range = DurationRange::new(min, min + spread).unwrap();
            let bounds = BoundingBox::new(width, height);
            let it = generate_itinerary(&mut tile_rng(seed, 1), bounds, range);
            prop_assert_eq!(it.steps.len(), ITINERARY_STEPS);
            for wp in it.steps.iter().chain(std::iter::once(&it.start)) {
                prop_assert!(bounds.contains(wp.x, wp.y));
                prop_assert!(range.contains(wp.duration));
            }
        }

        #[test]
        fn custom_step_counts(seed in any::<u64>(), steps in 1usize..40) {
            let count = NonZeroUsize::new(steps).unwrap();
            let it = generate_itinerary_with_steps(
                &mut tile_rng(seed, 2),
                BoundingBox::new(300, 200),
                durations(),
                count,
            );
            prop_assert_eq!(it.steps.len(), steps);
            let sum: f32 = it.steps.iter().map(|s| s.duration).sum();
            prop_assert_eq!(it.total_duration, sum);
        }
    }
}
