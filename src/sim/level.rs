//! Score-driven difficulty
//!
//! The level is derived from cumulative score; every difficulty knob is a
//! pure function of the level so spawned entities can capture it once.

use serde::Serialize;

use crate::tuning::Tuning;

/// Level for a given score, clamped to `max_level`
pub fn current_level(tuning: &Tuning, score: u64) -> u32 {
    let level = score / tuning.points_per_level + 1;
    level.min(tuning.max_level as u64) as u32
}

/// Frames between asteroid spawns; non-increasing in level, floored
pub fn spawn_rate(tuning: &Tuning, level: u32) -> u32 {
    let step = 2u32.saturating_mul(level.saturating_sub(1));
    tuning
        .asteroid_base_spawn_rate
        .saturating_sub(step)
        .max(tuning.min_spawn_rate)
}

/// +30% asteroid speed per level above 1
pub fn asteroid_speed_multiplier(level: u32) -> f32 {
    speed_multiplier(level) as f32
}

fn speed_multiplier(level: u32) -> f64 {
    1.0 + level.saturating_sub(1) as f64 * 0.3
}

/// Inclusive whole-pixel speed range for an asteroid spawned at `level`
pub fn asteroid_speed_range(tuning: &Tuning, level: u32) -> (u32, u32) {
    let m = speed_multiplier(level);
    let lo = (tuning.asteroid_base_min_speed as f64 * m).floor() as u32;
    let hi = (tuning.asteroid_base_max_speed as f64 * m).floor() as u32;
    (lo, hi.max(lo))
}

pub fn enemy_ship_speed(tuning: &Tuning, level: u32) -> f32 {
    tuning.enemy_ship_speed + 0.5 * level.saturating_sub(1) as f32
}

/// Frames between enemy shots, never below 1
pub fn enemy_shoot_cooldown(tuning: &Tuning, level: u32) -> u32 {
    let step = 10u32.saturating_mul(level.saturating_sub(1));
    tuning.enemy_shoot_cooldown.saturating_sub(step).max(1)
}

/// Per-frame enemy ship spawn probability (+20% per level)
pub fn enemy_spawn_chance(tuning: &Tuning, level: u32) -> f64 {
    (tuning.enemy_ship_spawn_chance * (1.0 + 0.2 * level as f64)).min(1.0)
}

/// Tracks the recorded level and the "level up" banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelController {
    pub level: u32,
    /// Frames the banner remains visible
    pub level_up_ticks: u32,
}

impl Default for LevelController {
    fn default() -> Self {
        Self {
            level: 1,
            level_up_ticks: 0,
        }
    }
}

impl LevelController {
    /// Recompute the level from score; true on a level-up
    pub fn check_level_up(&mut self, score: u64, tuning: &Tuning) -> bool {
        let level = current_level(tuning, score);
        if level > self.level {
            self.level = level;
            self.level_up_ticks = tuning.level_up_display_ticks;
            true
        } else {
            false
        }
    }

    pub fn decay_banner(&mut self) {
        self.level_up_ticks = self.level_up_ticks.saturating_sub(1);
    }

    pub fn show_level_up(&self) -> bool {
        self.level_up_ticks > 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
