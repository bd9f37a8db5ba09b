//! Entity types and their per-frame update rules
//!
//! Positions are top-left corners in screen space (y grows downward). Every
//! transient entity exposes `advance()` for one frame of motion and
//! `is_expired()` for the cleanup pass.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::level;
use super::rect::Rect;
use crate::centered_x;
use crate::tuning::Tuning;

/// Visible play area, supplied by the host settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn from_settings(settings: &crate::Settings) -> Self {
        Self {
            width: settings.screen_width,
            height: settings.screen_height,
        }
    }

    /// Largest x that keeps a box of `width` fully on screen
    pub fn max_x(&self, width: f32) -> f32 {
        (self.width - width).max(0.0)
    }
}

/// Result of the player absorbing a hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    /// Shield soaked the hit and is now gone
    ShieldAbsorbed,
    /// No shield: the ship is destroyed
    Destroyed,
}

/// The player's ship
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    /// Horizontal pixels per frame
    pub speed: f32,
    pub has_shield: bool,
    pub shield_ticks: u32,
    pub rapid_fire: bool,
    pub rapid_fire_ticks: u32,
    /// Frames until the next shot is allowed
    pub shoot_cooldown: u32,
}

impl Player {
    /// Fresh ship at the default start position: centered, near the bottom
    pub fn new(tuning: &Tuning, screen: Screen) -> Self {
        let size = tuning.player_size;
        Self {
            pos: Vec2::new(
                (screen.width - size.x) / 2.0,
                screen.height - size.y - tuning.player_bottom_margin,
            ),
            size,
            speed: tuning.player_speed,
            has_shield: false,
            shield_ticks: 0,
            rapid_fire: false,
            rapid_fire_ticks: 0,
            shoot_cooldown: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn move_left(&mut self, screen: Screen) {
        self.pos.x = (self.pos.x - self.speed).clamp(0.0, screen.max_x(self.size.x));
    }

    pub fn move_right(&mut self, screen: Screen) {
        self.pos.x = (self.pos.x + self.speed).clamp(0.0, screen.max_x(self.size.x));
    }

    /// Count down buff and weapon timers
    pub fn advance(&mut self) {
        if self.has_shield {
            self.shield_ticks = self.shield_ticks.saturating_sub(1);
            if self.shield_ticks == 0 {
                self.has_shield = false;
            }
        }

        if self.rapid_fire {
            self.rapid_fire_ticks = self.rapid_fire_ticks.saturating_sub(1);
            if self.rapid_fire_ticks == 0 {
                self.rapid_fire = false;
            }
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Arm the weapon cooldown after a shot
    pub fn shoot(&mut self, tuning: &Tuning) {
        self.shoot_cooldown = if self.rapid_fire {
            tuning.rapid_fire_cooldown
        } else {
            tuning.normal_shoot_cooldown
        };
    }

    pub fn activate_shield(&mut self, tuning: &Tuning) {
        self.has_shield = true;
        self.shield_ticks = tuning.shield_duration;
    }

    pub fn activate_rapid_fire(&mut self, tuning: &Tuning) {
        self.rapid_fire = true;
        self.rapid_fire_ticks = tuning.rapid_fire_duration;
    }

    pub fn apply_powerup(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        match kind {
            PowerUpKind::Shield => self.activate_shield(tuning),
            PowerUpKind::RapidFire => self.activate_rapid_fire(tuning),
        }
    }

    /// Take one hit; a shield absorbs it exactly once
    pub fn take_damage(&mut self) -> Damage {
        if self.has_shield {
            self.has_shield = false;
            self.shield_ticks = 0;
            Damage::ShieldAbsorbed
        } else {
            Damage::Destroyed
        }
    }
}

/// Player-fired projectile travelling up
#[derive(Debug, Clone, Serialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl Bullet {
    /// Spawned at the player's horizontal center, on its top edge
    pub fn from_player(player: &Player, tuning: &Tuning) -> Self {
        let size = tuning.bullet_size;
        Self {
            pos: Vec2::new(centered_x(player.pos.x, player.size.x, size.x), player.pos.y),
            size,
            speed: tuning.bullet_speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y -= self.speed;
    }

    pub fn is_expired(&self) -> bool {
        self.pos.y < 0.0
    }
}

/// Enemy-fired projectile travelling down
#[derive(Debug, Clone, Serialize)]
pub struct EnemyBullet {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl EnemyBullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn is_expired(&self, screen: Screen) -> bool {
        self.pos.y > screen.height
    }
}

/// A falling asteroid; speed and value are fixed by its spawn level
#[derive(Debug, Clone, Serialize)]
pub struct Asteroid {
    pub pos: Vec2,
    pub size: Vec2,
    /// Whole pixels per frame
    pub speed: f32,
    /// Degrees, cosmetic only
    pub rotation: f32,
    pub rotation_speed: f32,
    pub level: u32,
}

impl Asteroid {
    /// Roll a new asteroid at `pos` with level-scaled speed and spin
    pub fn spawn(pos: Vec2, level: u32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let (min_speed, max_speed) = level::asteroid_speed_range(tuning, level);
        let spin = tuning.asteroid_max_rotation_speed;
        let rotation_speed = if spin > 0.0 {
            rng.random_range(-spin..=spin) * level::asteroid_speed_multiplier(level)
        } else {
            0.0
        };
        Self {
            pos,
            size: tuning.asteroid_size,
            speed: rng.random_range(min_speed..=max_speed) as f32,
            rotation: 0.0,
            rotation_speed,
            level,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
        self.rotation = (self.rotation + self.rotation_speed).rem_euclid(360.0);
    }

    pub fn is_expired(&self, screen: Screen) -> bool {
        self.pos.y > screen.height
    }
}

/// A descending enemy that weaves side to side and fires downward
#[derive(Debug, Clone, Serialize)]
pub struct EnemyShip {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    /// -1.0 (left) or 1.0 (right)
    pub direction: f32,
    /// Frames since the last timed direction change
    pub move_ticks: u32,
    /// Frames until the next shot
    pub shoot_cooldown: u32,
    pub level: u32,
}

impl EnemyShip {
    pub fn spawn(pos: Vec2, level: u32, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let first_shot_max = tuning.enemy_shoot_cooldown.max(tuning.enemy_first_shot_min);
        Self {
            pos,
            size: tuning.enemy_ship_size,
            speed: level::enemy_ship_speed(tuning, level),
            direction: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            move_ticks: 0,
            shoot_cooldown: rng.random_range(tuning.enemy_first_shot_min..=first_shot_max),
            level,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn advance(&mut self, screen: Screen, flip_ticks: u32) {
        self.pos.y += self.speed;

        self.move_ticks += 1;
        if self.move_ticks >= flip_ticks {
            self.direction = -self.direction;
            self.move_ticks = 0;
        }

        let max_x = screen.max_x(self.size.x);
        self.pos.x = (self.pos.x + self.direction).clamp(0.0, max_x);
        // Edges always turn the ship back inward
        if self.pos.x <= 0.0 {
            self.direction = 1.0;
        } else if self.pos.x >= max_x {
            self.direction = -1.0;
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    pub fn can_shoot(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Fire from the ship's horizontal center, just below its bottom edge
    pub fn shoot(&mut self, tuning: &Tuning) -> EnemyBullet {
        self.shoot_cooldown = level::enemy_shoot_cooldown(tuning, self.level);
        let size = tuning.enemy_bullet_size;
        EnemyBullet {
            pos: Vec2::new(
                centered_x(self.pos.x, self.size.x, size.x),
                self.pos.y + self.size.y,
            ),
            size,
            speed: tuning.enemy_bullet_speed,
        }
    }

    pub fn is_expired(&self, screen: Screen) -> bool {
        self.pos.y > screen.height
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerUpKind {
    Shield,
    RapidFire,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 2] = [PowerUpKind::Shield, PowerUpKind::RapidFire];
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub kind: PowerUpKind,
    /// Radians, drives the renderer's pulsing outline
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(pos: Vec2, kind: PowerUpKind, tuning: &Tuning) -> Self {
        Self {
            pos,
            size: tuning.powerup_size,
            speed: tuning.powerup_fall_speed,
            kind,
            pulse: 0.0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
        self.pulse += 0.2;
    }

    pub fn is_expired(&self, screen: Screen) -> bool {
        self.pos.y > screen.height
    }
}

/// Explosion palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParticleColor {
    Red,
    Orange,
    Yellow,
}

/// Cosmetic debris; never collides
#[derive(Debug, Clone, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub color: ParticleColor,
}

impl Particle {
    /// Particle flying off from `origin` in a random direction
    pub fn random(origin: Vec2, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let s = tuning.particle_max_speed;
        let vel = if s > 0.0 {
            Vec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s))
        } else {
            Vec2::ZERO
        };
        let color = match rng.random_range(0..3) {
            0 => ParticleColor::Red,
            1 => ParticleColor::Orange,
            _ => ParticleColor::Yellow,
        };
        Self {
            pos: origin,
            vel,
            life: tuning.particle_lifetime,
            max_life: tuning.particle_lifetime,
            color,
        }
    }

    pub fn advance(&mut self, gravity: f32) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
        self.vel.y += gravity;
    }

    pub fn is_expired(&self) -> bool {
        self.life == 0
    }

    /// Remaining life as 0-1, for fading
    pub fn alpha(&self) -> f32 {
        if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        }
    }
}

/// Append `count` particles bursting from `origin`
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    count: usize,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    particles.extend((0..count).map(|_| Particle::random(origin, tuning, rng)));
}
