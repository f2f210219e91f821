//! Game configuration
//!
//! Fixed for the lifetime of a `Game`, except the tile count which the
//! player can change between rounds.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::GameError;
use crate::sim::{DurationRange, Repeat};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Tiles per round
    pub tile_count: u32,
    /// Range for each itinerary step
    pub durations: DurationRange,
    /// Seconds the numbers stay visible after start
    pub learn_duration: f32,
    /// How tile paths repeat
    pub repeat: Repeat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            durations: DurationRange::default(),
            learn_duration: DEFAULT_LEARN_DURATION,
            repeat: Repeat::FOREVER_YOYO,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        validate_tile_count(self.tile_count as i64)?;
        if !(self.learn_duration > 0.0 && self.learn_duration <= MAX_LEARN_DURATION) {
            return Err(GameError::InvalidLearnDuration(self.learn_duration));
        }
        Ok(())
    }

    pub fn learn_delay(&self) -> Duration {
        Duration::from_secs_f32(self.learn_duration)
    }

    /// Apply overrides by key (`tiles`, `min`, `max`, `learn`), e.g. from a
    /// URL query string. Missing keys keep their current value.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, GameError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tiles) = lookup("tiles") {
            self.tile_count = parse_tile_count(&tiles)?;
        }
        let mut min = self.durations.min();
        let mut max = self.durations.max();
        if let Some(input) = lookup("min") {
            min = parse_seconds(&input, |v| GameError::InvalidDurationRange { min: v, max })?;
        }
        if let Some(input) = lookup("max") {
            max = parse_seconds(&input, |v| GameError::InvalidDurationRange { min, max: v })?;
        }
        self.durations = DurationRange::new(min, max)?;
        if let Some(learn) = lookup("learn") {
            self.learn_duration = parse_seconds(&learn, GameError::InvalidLearnDuration)?;
        }
        self.validate()?;
        Ok(self)
    }
}

/// Parse player input for the tile count
pub fn parse_tile_count(input: &str) -> Result<u32, GameError> {
    let count: i64 = input
        .trim()
        .parse()
        .map_err(|_| GameError::InvalidTileCount(input.to_string()))?;
    validate_tile_count(count)
}

pub fn validate_tile_count(count: i64) -> Result<u32, GameError> {
    if count < 1 || count > MAX_TILE_COUNT as i64 {
        return Err(GameError::TileCountOutOfRange {
            count,
            max: MAX_TILE_COUNT,
        });
    }
    Ok(count as u32)
}

fn parse_seconds<E>(input: &str, err: E) -> Result<f32, GameError>
where
    E: Fn(f32) -> GameError,
{
    input.trim().parse::<f32>().map_err(|_| err(f32::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn query(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.tile_count, 6);
        assert_eq!(cfg.durations.min(), 2.0);
        assert_eq!(cfg.durations.max(), 4.0);
        assert_eq!(cfg.learn_duration, 3.0);
        assert_eq!(cfg.learn_delay(), Duration::from_secs(3));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_parse_tile_count() {
        assert_eq!(parse_tile_count("8"), Ok(8));
        assert_eq!(parse_tile_count(" 3 "), Ok(3));
        assert!(matches!(
            parse_tile_count("abc"),
            Err(GameError::InvalidTileCount(_))
        ));
        assert!(matches!(
            parse_tile_count(""),
            Err(GameError::InvalidTileCount(_))
        ));
        assert_eq!(
            parse_tile_count("0"),
            Err(GameError::TileCountOutOfRange {
                count: 0,
                max: MAX_TILE_COUNT
            })
        );
        assert!(parse_tile_count("-4").is_err());
        assert!(parse_tile_count("1000").is_err());
    }

    #[test]
    fn test_overrides_apply() {
        let cfg = GameConfig::default()
            .with_overrides(query(&[("tiles", "9"), ("min", "1"), ("learn", "5.5")]))
            .unwrap();
        assert_eq!(cfg.tile_count, 9);
        assert_eq!(cfg.durations.min(), 1.0);
        assert_eq!(cfg.durations.max(), 4.0);
        assert_eq!(cfg.learn_duration, 5.5);
    }

    #[test]
    fn test_overrides_reject_bad_values() {
        assert!(
            GameConfig::default()
                .with_overrides(query(&[("min", "6")]))
                .is_err()
        );
        assert!(
            GameConfig::default()
                .with_overrides(query(&[("learn", "soon")]))
                .is_err()
        );
        assert!(
            GameConfig::default()
                .with_overrides(query(&[("learn", "0")]))
                .is_err()
        );
    }

    #[test]
    fn test_learn_duration_is_bounded() {
        for learn in ["1e20", "inf", "601"] {
            assert!(matches!(
                GameConfig::default().with_overrides(query(&[("learn", learn)])),
                Err(GameError::InvalidLearnDuration(_))
            ));
        }
        let cfg = GameConfig::default()
            .with_overrides(query(&[("learn", "600")]))
            .unwrap();
        assert_eq!(cfg.learn_delay(), Duration::from_secs(600));

        let huge = GameConfig {
            learn_duration: f32::MAX,
            ..GameConfig::default()
        };
        assert!(huge.validate().is_err());
    }

    #[test]
    fn test_inverted_range_override_rejected() {
        assert!(matches!(
            GameConfig::default().with_overrides(query(&[("min", "5"), ("max", "3")])),
            Err(GameError::InvalidDurationRange { min, max }) if min == 5.0 && max == 3.0
        ));
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let cfg = GameConfig::default().with_overrides(query(&[])).unwrap();
        assert_eq!(cfg, GameConfig::default());
    }
}
