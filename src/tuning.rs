//! Gameplay balance as data
//!
//! Every number the simulation depends on lives here so that a settings file
//! can rebalance the game, and tests can stage exact scenarios (for example
//! by switching spawns off).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub player_size: Vec2,
    /// Horizontal pixels per frame while a move key is held
    pub player_speed: f32,
    pub player_bottom_margin: f32,
    pub normal_shoot_cooldown: u32,
    pub rapid_fire_cooldown: u32,

    // === Projectiles ===
    pub bullet_size: Vec2,
    pub bullet_speed: f32,
    pub enemy_bullet_size: Vec2,
    pub enemy_bullet_speed: f32,

    // === Asteroids ===
    pub asteroid_size: Vec2,
    pub asteroid_base_min_speed: f32,
    pub asteroid_base_max_speed: f32,
    pub asteroid_max_rotation_speed: f32,
    /// Frames between asteroid spawns at level 1
    pub asteroid_base_spawn_rate: u32,
    /// Floor for the level-scaled spawn rate
    pub min_spawn_rate: u32,

    // === Enemy ships ===
    pub enemy_ship_size: Vec2,
    pub enemy_ship_speed: f32,
    /// Per-frame spawn probability before level scaling
    pub enemy_ship_spawn_chance: f64,
    pub enemy_shoot_cooldown: u32,
    pub enemy_first_shot_min: u32,
    pub enemy_direction_flip_ticks: u32,

    // === Power-ups ===
    pub powerups_enabled: bool,
    pub powerup_size: Vec2,
    pub powerup_fall_speed: f32,
    pub powerup_spawn_chance: f64,
    pub shield_duration: u32,
    pub rapid_fire_duration: u32,
    /// When false (the classic rule) asteroid contact kills even a shielded player
    pub shield_absorbs_asteroids: bool,

    // === Levels ===
    pub points_per_level: u64,
    pub max_level: u32,
    pub level_up_display_ticks: u32,
    pub asteroid_points: u64,
    pub enemy_ship_points: u64,

    // === Particles ===
    pub particle_lifetime: u32,
    pub particle_gravity: f32,
    pub particle_max_speed: f32,
    pub asteroid_burst: usize,
    pub enemy_ship_burst: usize,
    pub shield_hit_burst: usize,
    pub player_death_burst: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,
            player_bottom_margin: PLAYER_BOTTOM_MARGIN,
            normal_shoot_cooldown: NORMAL_SHOOT_COOLDOWN,
            rapid_fire_cooldown: RAPID_FIRE_COOLDOWN,

            bullet_size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            bullet_speed: BULLET_SPEED,
            enemy_bullet_size: Vec2::new(ENEMY_BULLET_WIDTH, ENEMY_BULLET_HEIGHT),
            enemy_bullet_speed: ENEMY_BULLET_SPEED,

            asteroid_size: Vec2::new(ASTEROID_WIDTH, ASTEROID_HEIGHT),
            asteroid_base_min_speed: ASTEROID_BASE_MIN_SPEED,
            asteroid_base_max_speed: ASTEROID_BASE_MAX_SPEED,
            asteroid_max_rotation_speed: ASTEROID_MAX_ROTATION_SPEED,
            asteroid_base_spawn_rate: ASTEROID_BASE_SPAWN_RATE,
            min_spawn_rate: MIN_SPAWN_RATE,

            enemy_ship_size: Vec2::new(ENEMY_SHIP_WIDTH, ENEMY_SHIP_HEIGHT),
            enemy_ship_speed: ENEMY_SHIP_SPEED,
            enemy_ship_spawn_chance: ENEMY_SHIP_SPAWN_CHANCE,
            enemy_shoot_cooldown: ENEMY_SHOOT_COOLDOWN,
            enemy_first_shot_min: ENEMY_FIRST_SHOT_MIN,
            enemy_direction_flip_ticks: ENEMY_DIRECTION_FLIP_TICKS,

            powerups_enabled: true,
            powerup_size: Vec2::new(POWERUP_WIDTH, POWERUP_HEIGHT),
            powerup_fall_speed: POWERUP_FALL_SPEED,
            powerup_spawn_chance: POWERUP_SPAWN_CHANCE,
            shield_duration: SHIELD_DURATION,
            rapid_fire_duration: RAPID_FIRE_DURATION,
            shield_absorbs_asteroids: false,

            points_per_level: POINTS_PER_LEVEL,
            max_level: MAX_LEVEL,
            level_up_display_ticks: LEVEL_UP_DISPLAY_TICKS,
            asteroid_points: ASTEROID_POINTS,
            enemy_ship_points: ENEMY_SHIP_POINTS,

            particle_lifetime: PARTICLE_LIFETIME,
            particle_gravity: PARTICLE_GRAVITY,
            particle_max_speed: PARTICLE_MAX_SPEED,
            asteroid_burst: ASTEROID_BURST,
            enemy_ship_burst: ENEMY_SHIP_BURST,
            shield_hit_burst: SHIELD_HIT_BURST,
            player_death_burst: PLAYER_DEATH_BURST,
        }
    }
}

impl Tuning {
    /// Quiet tuning with every random spawn switched off
    ///
    /// Useful for staging deterministic scenarios: only entities placed by
    /// hand (or fired by the player) exist.
    pub fn without_spawns() -> Self {
        Self {
            asteroid_base_spawn_rate: u32::MAX,
            min_spawn_rate: u32::MAX,
            enemy_ship_spawn_chance: 0.0,
            powerups_enabled: false,
            ..Self::default()
        }
    }
}
