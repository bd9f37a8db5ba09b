//! Game settings
//!
//! Host-supplied configuration: screen size, frame rate, audio mix and the
//! gameplay `Tuning`. Validated once at startup; the simulation assumes a
//! validated value from then on.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FPS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::error::SettingsError;
use crate::sim::level;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Simulation ticks per second
    pub fps: u32,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Start a session with background music playing
    pub music_enabled: bool,

    // === Gameplay ===
    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            music_enabled: true,

            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Check every rule the simulation relies on
    pub fn validate(&self) -> Result<(), SettingsError> {
        let (w, h) = (self.screen_width, self.screen_height);
        if !(w > 0.0 && h > 0.0) {
            return Err(SettingsError::NonPositiveScreen {
                width: w,
                height: h,
            });
        }
        if self.fps == 0 {
            return Err(SettingsError::ZeroFrameRate);
        }

        for (field, value) in [
            ("master_volume", self.master_volume),
            ("sfx_volume", self.sfx_volume),
            ("music_volume", self.music_volume),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::VolumeOutOfRange { field, value });
            }
        }

        let t = &self.tuning;
        if t.points_per_level == 0 {
            return Err(SettingsError::ZeroPointsPerLevel);
        }
        if t.max_level == 0 {
            return Err(SettingsError::ZeroMaxLevel);
        }
        if t.asteroid_base_spawn_rate == 0 || t.min_spawn_rate == 0 {
            return Err(SettingsError::ZeroSpawnRate);
        }
        // Asteroid speeds are whole pixels; a level 1 floor of 0 never moves
        let (slowest, _) = level::asteroid_speed_range(t, 1);
        if slowest == 0 || t.asteroid_base_min_speed > t.asteroid_base_max_speed {
            return Err(SettingsError::InvalidSpeedRange {
                min: t.asteroid_base_min_speed,
                max: t.asteroid_base_max_speed,
            });
        }

        for (field, value) in [
            ("enemy_ship_spawn_chance", t.enemy_ship_spawn_chance),
            ("powerup_spawn_chance", t.powerup_spawn_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::ProbabilityOutOfRange { field, value });
            }
        }

        let entities = [
            ("player", t.player_size, t.player_speed),
            ("bullet", t.bullet_size, t.bullet_speed),
            ("enemy bullet", t.enemy_bullet_size, t.enemy_bullet_speed),
            ("asteroid", t.asteroid_size, t.asteroid_base_min_speed),
            ("enemy ship", t.enemy_ship_size, t.enemy_ship_speed),
            ("power-up", t.powerup_size, t.powerup_fall_speed),
        ];
        for (entity, size, speed) in entities {
            if !(size.x > 0.0 && size.y > 0.0 && speed > 0.0) {
                return Err(SettingsError::NonPositiveSize { entity });
            }
            if size.x > w || size.y > h {
                return Err(SettingsError::EntityDoesNotFit { entity });
            }
        }
        if t.player_size.y + t.player_bottom_margin > h {
            return Err(SettingsError::EntityDoesNotFit { entity: "player" });
        }

        Ok(())
    }

    /// Convert a frame count to seconds at the configured frame rate
    pub fn ticks_to_secs(&self, ticks: u32) -> f32 {
        ticks as f32 / self.fps as f32
    }

    /// Convert seconds to whole frames at the configured frame rate
    pub fn secs_to_ticks(&self, secs: f32) -> u32 {
        (secs * self.fps as f32).round().max(0.0) as u32
    }

    /// Parse settings from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(|e| SettingsError::Parse {
            message: e.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse {
            message: e.to_string(),
        })?;
        fs::write(path, json).map_err(|e| SettingsError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
