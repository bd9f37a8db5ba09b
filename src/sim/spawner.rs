//! Timer- and chance-driven creation of asteroids, enemy ships and power-ups

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::entities::{Asteroid, EnemyShip, PowerUp, PowerUpKind, Screen};
use super::level;
use crate::tuning::Tuning;

/// Everything created by one spawner step
#[derive(Debug, Default)]
pub struct Spawned {
    pub asteroid: Option<Asteroid>,
    pub enemy_ship: Option<EnemyShip>,
    pub powerup: Option<PowerUp>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Spawner {
    /// Frames since the last asteroid spawn
    pub asteroid_timer: u32,
}

/// Whole-pixel x that keeps a box of `width` on screen, y just above the top
fn entry_position(width: f32, height: f32, screen: Screen, rng: &mut impl Rng) -> Vec2 {
    let max_x = screen.max_x(width).floor() as u32;
    Vec2::new(rng.random_range(0..=max_x) as f32, -height)
}

pub fn spawn_asteroid(level: u32, tuning: &Tuning, screen: Screen, rng: &mut impl Rng) -> Asteroid {
    let size = tuning.asteroid_size;
    let pos = entry_position(size.x, size.y, screen, rng);
    Asteroid::spawn(pos, level, tuning, rng)
}

pub fn spawn_enemy_ship(
    level: u32,
    tuning: &Tuning,
    screen: Screen,
    rng: &mut impl Rng,
) -> EnemyShip {
    let size = tuning.enemy_ship_size;
    let pos = entry_position(size.x, size.y, screen, rng);
    EnemyShip::spawn(pos, level, tuning, rng)
}

pub fn spawn_powerup(tuning: &Tuning, screen: Screen, rng: &mut impl Rng) -> PowerUp {
    let size = tuning.powerup_size;
    let pos = entry_position(size.x, size.y, screen, rng);
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    PowerUp::new(pos, kind, tuning)
}

impl Spawner {
    pub fn reset(&mut self) {
        self.asteroid_timer = 0;
    }

    /// Run one frame of spawning at the given level
    pub fn step(
        &mut self,
        level: u32,
        tuning: &Tuning,
        screen: Screen,
        rng: &mut impl Rng,
    ) -> Spawned {
        let mut spawned = Spawned::default();

        self.asteroid_timer = self.asteroid_timer.saturating_add(1);
        if self.asteroid_timer >= level::spawn_rate(tuning, level) {
            spawned.asteroid = Some(spawn_asteroid(level, tuning, screen, rng));
            self.asteroid_timer = 0;
        }

        // Bernoulli trials, one draw each per frame
        if rng.random::<f64>() < level::enemy_spawn_chance(tuning, level) {
            spawned.enemy_ship = Some(spawn_enemy_ship(level, tuning, screen, rng));
        }

        if tuning.powerups_enabled && rng.random::<f64>() < tuning.powerup_spawn_chance {
            spawned.powerup = Some(spawn_powerup(tuning, screen, rng));
        }

        if let Some(a) = &spawned.asteroid {
            log::debug!("spawned asteroid at x={} level={} speed={}", a.pos.x, a.level, a.speed);
        }
        if let Some(e) = &spawned.enemy_ship {
            log::debug!("spawned enemy ship at x={} level={}", e.pos.x, e.level);
        }
        if let Some(p) = &spawned.powerup {
            log::debug!("spawned {:?} power-up at x={}", p.kind, p.pos.x);
        }

        spawned
    }
}
