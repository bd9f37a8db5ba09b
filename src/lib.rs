//! Space Shooter - a vertical arcade shooter
//!
//! Core modules:
//! - `sim`: Fixed-timestep simulation (entities, spawning, collisions, levels)
//! - `settings`: Screen/frame-rate/audio configuration with validation
//! - `tuning`: Data-driven game balance
//! - `audio`: Fire-and-forget audio cue side-channel
//! - `highscores`: In-memory leaderboard

pub mod audio;
pub mod error;
pub mod highscores;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::SettingsError;
pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants (defaults for `Settings` and `Tuning`)
pub mod consts {
    /// Reference screen dimensions
    pub const SCREEN_WIDTH: f32 = 1200.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Target frame rate; one simulation tick per frame
    pub const FPS: u32 = 60;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    pub const PLAYER_SPEED: f32 = 5.0;
    /// Gap between the player's bottom edge and the screen bottom
    pub const PLAYER_BOTTOM_MARGIN: f32 = 10.0;
    pub const NORMAL_SHOOT_COOLDOWN: u32 = 15;
    pub const RAPID_FIRE_COOLDOWN: u32 = 5;

    /// Player bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 10.0;
    pub const BULLET_SPEED: f32 = 7.0;

    /// Asteroids
    pub const ASTEROID_WIDTH: f32 = 40.0;
    pub const ASTEROID_HEIGHT: f32 = 40.0;
    pub const ASTEROID_BASE_MIN_SPEED: f32 = 2.0;
    pub const ASTEROID_BASE_MAX_SPEED: f32 = 5.0;
    /// Frames between asteroid spawns at level 1 (lower = more frequent)
    pub const ASTEROID_BASE_SPAWN_RATE: u32 = 30;
    pub const MIN_SPAWN_RATE: u32 = 10;
    pub const ASTEROID_MAX_ROTATION_SPEED: f32 = 5.0;

    /// Level progression
    pub const POINTS_PER_LEVEL: u64 = 100;
    pub const MAX_LEVEL: u32 = 10;
    /// Frames the "level up" banner stays visible (2 seconds at 60 FPS)
    pub const LEVEL_UP_DISPLAY_TICKS: u32 = 120;

    /// Enemy ships
    pub const ENEMY_SHIP_WIDTH: f32 = 35.0;
    pub const ENEMY_SHIP_HEIGHT: f32 = 30.0;
    pub const ENEMY_SHIP_SPEED: f32 = 2.0;
    pub const ENEMY_SHIP_SPAWN_CHANCE: f64 = 0.008;
    pub const ENEMY_SHOOT_COOLDOWN: u32 = 90;
    /// Lower bound of the random delay before an enemy's first shot
    pub const ENEMY_FIRST_SHOT_MIN: u32 = 30;
    /// Frames between enemy horizontal direction changes
    pub const ENEMY_DIRECTION_FLIP_TICKS: u32 = 60;

    /// Enemy bullets
    pub const ENEMY_BULLET_WIDTH: f32 = 4.0;
    pub const ENEMY_BULLET_HEIGHT: f32 = 8.0;
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;

    /// Power-ups
    pub const POWERUP_WIDTH: f32 = 30.0;
    pub const POWERUP_HEIGHT: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 3.0;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.005;
    pub const SHIELD_DURATION: u32 = 300;
    pub const RAPID_FIRE_DURATION: u32 = 300;

    /// Particles
    pub const PARTICLE_LIFETIME: u32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const PARTICLE_MAX_SPEED: f32 = 3.0;
    pub const ASTEROID_BURST: usize = 8;
    pub const ENEMY_SHIP_BURST: usize = 6;
    pub const SHIELD_HIT_BURST: usize = 5;
    pub const PLAYER_DEATH_BURST: usize = 15;

    /// Score awards, multiplied by the target's spawn level
    pub const ASTEROID_POINTS: u64 = 10;
    pub const ENEMY_SHIP_POINTS: u64 = 25;
}

/// Center of an axis-aligned box given its top-left corner and size
#[inline]
pub fn box_center(pos: Vec2, size: Vec2) -> Vec2 {
    pos + size * 0.5
}

/// X coordinate that horizontally centers a child of `child_width` on a parent box
#[inline]
pub fn centered_x(parent_x: f32, parent_width: f32, child_width: f32) -> f32 {
    parent_x + (parent_width - child_width) / 2.0
}
