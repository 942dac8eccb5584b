//! Game tuning
//!
//! Persisted as JSON in the durable store. Every field falls back to its
//! default when missing, so older or partial files keep loading.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{Storage, StorageError};

/// Tunable game constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Bird ===
    /// Added to the bird's velocity every tick
    pub gravity: f32,
    /// Velocity set by a jump (negative is up)
    pub jump_impulse: f32,
    pub bird_x: f32,
    pub bird_width: f32,
    pub bird_height: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub gap: f32,
    pub scroll_speed: f32,
    pub spawn_threshold: f32,
    pub min_clearance: f32,

    // === Lifecycle ===
    pub countdown_steps: u8,
    pub countdown_step_ms: f64,
    pub announce_ms: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            bird_x: BIRD_X,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,

            obstacle_width: OBSTACLE_WIDTH,
            gap: OBSTACLE_GAP,
            scroll_speed: SCROLL_SPEED,
            spawn_threshold: SPAWN_THRESHOLD,
            min_clearance: MIN_CLEARANCE,

            countdown_steps: COUNTDOWN_STEPS,
            countdown_step_ms: COUNTDOWN_STEP_MS,
            announce_ms: ANNOUNCE_MS,
        }
    }
}

fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() { value } else { fallback }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Settings {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "flappy_gap_settings";

    /// Replace values that would break the simulation with their defaults
    pub fn sanitize(mut self) -> Self {
        let defaults = Self::default();
        self.gravity = finite_or(self.gravity, defaults.gravity);
        self.jump_impulse = finite_or(self.jump_impulse, defaults.jump_impulse);
        self.bird_x = finite_or(self.bird_x, defaults.bird_x).max(0.0);
        self.bird_width = positive_or(self.bird_width, defaults.bird_width);
        self.bird_height = positive_or(self.bird_height, defaults.bird_height);
        self.obstacle_width = positive_or(self.obstacle_width, defaults.obstacle_width);
        self.gap = positive_or(self.gap, defaults.gap);
        self.scroll_speed = positive_or(self.scroll_speed, defaults.scroll_speed);
        self.spawn_threshold = positive_or(self.spawn_threshold, defaults.spawn_threshold);
        self.min_clearance = finite_or(self.min_clearance, defaults.min_clearance).max(0.0);
        if !(self.countdown_step_ms.is_finite() && self.countdown_step_ms >= 0.0) {
            self.countdown_step_ms = defaults.countdown_step_ms;
        }
        if !(self.announce_ms.is_finite() && self.announce_ms >= 0.0) {
            self.announce_ms = defaults.announce_ms;
        }
        self
    }

    /// Load settings, falling back to defaults if absent or unreadable
    pub fn load(storage: &dyn Storage) -> Self {
        match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings.sanitize();
                }
                Err(e) => log::warn!("Ignoring corrupt settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings unavailable: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings
    pub fn save(&self, storage: &mut dyn Storage) -> Result<(), StorageError> {
        let json = serde_json::to_string(self)?;
        storage.set_item(Self::STORAGE_KEY, &json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_defaults_match_classic_tuning() {
        let s = Settings::default();
        assert_eq!(s.gravity, 0.5);
        assert_eq!(s.jump_impulse, -12.0);
        assert_eq!(s.gap, 150.0);
        assert_eq!(s.spawn_threshold, 200.0);
        assert_eq!(s.min_clearance, 50.0);
        assert_eq!(s.countdown_steps, 3);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let s: Settings = serde_json::from_str(r#"{"gravity": 0.25}"#).unwrap();
        assert_eq!(s.gravity, 0.25);
        assert_eq!(s.jump_impulse, -12.0);
    }

    #[test]
    fn test_load_missing_or_corrupt_uses_defaults() {
        let mut storage = MemoryStorage::new();
        assert_eq!(Settings::load(&storage), Settings::default());

        storage.set_item(Settings::STORAGE_KEY, "{not json").unwrap();
        assert_eq!(Settings::load(&storage), Settings::default());
    }

    #[test]
    fn test_save_load_keeps_custom_values() {
        let mut storage = MemoryStorage::new();
        let mut s = Settings::default();
        s.gap = 180.0;
        s.countdown_steps = 5;
        s.save(&mut storage).unwrap();
        assert_eq!(Settings::load(&storage), s);
    }

    #[test]
    fn test_sanitize_repairs_bad_values() {
        let s = Settings {
            gap: -4.0,
            scroll_speed: f32::NAN,
            announce_ms: -1.0,
            ..Settings::default()
        }
        .sanitize();
        assert_eq!(s.gap, OBSTACLE_GAP);
        assert_eq!(s.scroll_speed, SCROLL_SPEED);
        assert_eq!(s.announce_ms, ANNOUNCE_MS);
    }
}
