//! Startup settings
//!
//! Read once from an optional JSON block embedded in the page; never written
//! back. Any missing field takes its default.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Startup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial gravity (units per frame-delta)
    pub gravity: f32,
    /// Initial timer spawns per second
    pub spawn_per_second: f32,
    /// Chance that a click spawn is an irregular polygon (0.0 - 1.0)
    pub irregular_chance: f64,
    /// Fixed RNG seed; the clock is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: DEFAULT_GRAVITY,
            spawn_per_second: DEFAULT_SPAWN_PER_SECOND,
            irregular_chance: IRREGULAR_CHANCE,
            seed: None,
        }
    }
}

impl Settings {
    /// Element holding `<script type="application/json">` settings
    pub const ELEMENT_ID: &'static str = "settings";

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(settings) => {
                log::info!("Loaded settings: {:?}", settings);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Seed to use for this run
    pub fn seed_or(&self, fallback: u64) -> u64 {
        self.seed.unwrap_or(fallback)
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) if !json.trim().is_empty() => Self::from_json_or_default(&json),
            _ => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Native: settings come from the first argument, if any
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        match std::env::args().nth(1) {
            Some(json) => Self::from_json_or_default(&json),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.gravity, 1.0);
        assert_eq!(settings.spawn_per_second, 1.0);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "gravity": 4.5, "seed": 99 }"#).unwrap();
        assert_eq!(settings.gravity, 4.5);
        assert_eq!(settings.spawn_per_second, DEFAULT_SPAWN_PER_SECOND);
        assert_eq!(settings.seed_or(1), 99);
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert!(Settings::from_json("{ gravity: ").is_err());
        assert_eq!(Settings::from_json_or_default("not json"), Settings::default());
    }
}
