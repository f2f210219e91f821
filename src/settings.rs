//! Player preferences
//!
//! Persisted in LocalStorage between visits. Game progress is never saved.

use serde::{Deserialize, Serialize};

use crate::config::validate_tile_count;
use crate::consts::DEFAULT_TILE_COUNT;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Last tile count the player chose
    pub tile_count: u32,
    /// Draw outlines around the boundary and tiles
    #[serde(default)]
    pub show_outlines: bool,
    /// Reveal experimental controls (outlines, pause/resume)
    #[serde(default)]
    pub show_experimental: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            show_outlines: false,
            show_experimental: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "tile_recall_settings";

    pub fn toggle_outlines(&mut self) {
        self.show_outlines = !self.show_outlines;
    }

    pub fn toggle_experimental(&mut self) {
        self.show_experimental = !self.show_experimental;
    }

    /// Decode stored JSON, dropping values that no longer validate
    pub fn from_json(json: &str) -> Option<Self> {
        let settings: Settings = serde_json::from_str(json).ok()?;
        validate_tile_count(settings.tile_count as i64).ok()?;
        Some(settings)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Some(settings) = Self::from_json(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
                log::warn!("Discarding unreadable settings");
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::debug!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip_keeps_choices() {
        let mut settings = Settings::default();
        settings.tile_count = 9;
        settings.toggle_outlines();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json), Some(settings));
    }

    #[test]
    fn test_missing_toggles_default_off() {
        let settings = Settings::from_json(r#"{"tile_count":4}"#).unwrap();
        assert_eq!(settings.tile_count, 4);
        assert!(!settings.show_outlines);
        assert!(!settings.show_experimental);
    }

    #[test]
    fn test_rejects_invalid_count() {
        assert_eq!(Settings::from_json(r#"{"tile_count":0}"#), None);
        assert_eq!(Settings::from_json("not json"), None);
    }
}
