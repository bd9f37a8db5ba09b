//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (insertion order of each entity list)
//! - No rendering, audio device or platform dependencies

pub mod collision;
pub mod entities;
pub mod level;
pub mod rect;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionReport, resolve_collisions};
pub use entities::{
    Asteroid, Bullet, Damage, EnemyBullet, EnemyShip, Particle, ParticleColor, Player, PowerUp,
    PowerUpKind, Screen,
};
pub use level::LevelController;
pub use rect::Rect;
pub use spawner::{Spawned, Spawner};
pub use state::{GamePhase, GameState};
pub use tick::{TickInput, autopilot_input, tick};
