//! Fixed timestep simulation tick
//!
//! One call advances the game by exactly one frame:
//! input -> entity updates -> cleanup -> spawner -> collisions -> level check.

use super::collision::resolve_collisions;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move key held this frame
    pub move_left: bool,
    pub move_right: bool,
    /// Shoot key pressed this frame (edge, not level)
    pub shoot: bool,
    /// Restart key pressed this frame; only honored on the game over screen
    pub restart: bool,
    /// Music toggle pressed this frame
    pub toggle_music: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    if input.toggle_music {
        state.toggle_music();
    }

    if input.restart && state.phase == GamePhase::GameOver {
        state.restart();
    }

    match state.phase {
        GamePhase::GameOver => {
            // Only cosmetic timers keep running
            advance_particles(state);
            state.progress.decay_banner();
        }
        GamePhase::Playing => play_frame(state, input),
    }
}

fn advance_particles(state: &mut GameState) {
    let gravity = state.tuning().particle_gravity;
    for particle in state.particles.iter_mut() {
        particle.advance(gravity);
    }
    state.particles.retain(|p| !p.is_expired());
}

fn play_frame(state: &mut GameState, input: &TickInput) {
    state.progress.decay_banner();

    // Player
    state.player.advance();
    let screen = state.screen;
    if input.move_left {
        state.player.move_left(screen);
    }
    if input.move_right {
        state.player.move_right(screen);
    }
    if input.shoot {
        state.player_shoot();
    }

    // Move everything
    for bullet in state.bullets.iter_mut() {
        bullet.advance();
    }
    for asteroid in state.asteroids.iter_mut() {
        asteroid.advance();
    }
    let flip_ticks = state.tuning().enemy_direction_flip_ticks;
    for ship in state.enemy_ships.iter_mut() {
        ship.advance(screen, flip_ticks);
    }
    for bullet in state.enemy_bullets.iter_mut() {
        bullet.advance();
    }
    for powerup in state.powerups.iter_mut() {
        powerup.advance();
    }
    advance_particles(state);

    // Cleanup pass
    state.bullets.retain(|b| !b.is_expired());
    state.asteroids.retain(|a| !a.is_expired(screen));
    state.enemy_ships.retain(|e| !e.is_expired(screen));
    state.enemy_bullets.retain(|b| !b.is_expired(screen));
    state.powerups.retain(|p| !p.is_expired(screen));

    // Surviving ships fire, then new arrivals
    state.enemy_ships_fire();
    state.spawn();

    let report = resolve_collisions(state);
    if report.points > 0 {
        log::debug!("+{} points (score {})", report.points, state.score);
    }

    if state.phase == GamePhase::Playing {
        state.check_level_up();
    }
}

/// Demo/idle mode: steer under the most urgent target and fire
///
/// Targets are the lowest asteroid or enemy ship still above the player;
/// a power-up below every target is grabbed first.
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if state.is_game_over() {
        return input;
    }

    let player = state.player.rect();
    let above_player = |bottom: f32| bottom < player.top();

    let target = state
        .asteroids
        .iter()
        .map(|a| a.rect())
        .chain(state.enemy_ships.iter().map(|e| e.rect()))
        .filter(|r| above_player(r.bottom()) && r.bottom() > 0.0)
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));

    let pickup = state
        .powerups
        .iter()
        .map(|p| p.rect())
        .filter(|r| above_player(r.bottom()))
        .filter(|r| target.is_none_or(|t| r.bottom() > t.bottom()))
        .max_by(|a, b| a.bottom().total_cmp(&b.bottom()));

    let Some(goal) = pickup.or(target) else {
        return input;
    };

    let dx = goal.center().x - player.center().x;
    let deadzone = state.player.speed;
    input.move_left = dx < -deadzone;
    input.move_right = dx > deadzone;
    input.shoot = pickup.is_none() && dx.abs() < goal.size.x / 2.0;
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::audio::{AudioCue, SoundEffect};
    use crate::sim::entities::{Asteroid, Bullet, EnemyBullet, PowerUp, PowerUpKind};
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn quiet_state() -> GameState {
        let settings = Settings {
            tuning: Tuning::without_spawns(),
            ..Settings::default()
        };
        let mut state = GameState::with_settings(12345, settings).unwrap();
        state.drain_cues();
        state
    }

    fn shoot() -> TickInput {
        TickInput {
            shoot: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_bullet_destroys_asteroid() {
        let mut state = quiet_state();
        state.asteroids.push(Asteroid {
            pos: Vec2::new(100.0, -40.0),
            size: Vec2::new(40.0, 40.0),
            speed: 3.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            level: 1,
        });
        // Line the ship up under the asteroid
        state.player.pos.x = 95.0;

        tick(&mut state, &shoot());
        assert_eq!(state.bullets.len(), 1);

        let mut frames = 0;
        while !state.asteroids.is_empty() && frames < 200 {
            tick(&mut state, &TickInput::default());
            frames += 1;
        }

        assert!(state.asteroids.is_empty());
        assert!(state.bullets.is_empty());
        assert_eq!(state.score, 10);
        assert_eq!(state.particles.len(), 8);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_shoot_respects_cooldown() {
        let mut state = quiet_state();
        tick(&mut state, &shoot());
        tick(&mut state, &shoot());
        assert_eq!(state.bullets.len(), 1);

        for _ in 0..14 {
            tick(&mut state, &TickInput::default());
        }
        tick(&mut state, &shoot());
        assert_eq!(state.bullets.len(), 2);

        let cues = state.drain_cues();
        let shots = cues
            .iter()
            .filter(|c| **c == AudioCue::Effect(SoundEffect::Shoot))
            .count();
        assert_eq!(shots, 2);
    }

    #[test]
    fn test_movement_clamped_to_screen() {
        let mut state = quiet_state();
        let left = TickInput {
            move_left: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &left);
        }
        assert_eq!(state.player.pos.x, 0.0);

        let right = TickInput {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..500 {
            tick(&mut state, &right);
        }
        assert_eq!(state.player.pos.x, 1150.0);
    }

    #[test]
    fn test_offscreen_cleanup() {
        let mut state = quiet_state();
        let tuning = state.tuning().clone();
        state.asteroids.push(Asteroid {
            pos: Vec2::new(10.0, 598.0),
            size: Vec2::new(40.0, 40.0),
            speed: 3.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            level: 1,
        });
        state.enemy_bullets.push(EnemyBullet {
            pos: Vec2::new(10.0, 599.0),
            size: Vec2::new(4.0, 8.0),
            speed: 4.0,
        });
        state
            .powerups
            .push(PowerUp::new(Vec2::new(10.0, 598.0), PowerUpKind::Shield, &tuning));
        state.bullets.push(Bullet {
            pos: Vec2::new(10.0, 6.0),
            size: Vec2::new(5.0, 10.0),
            speed: 7.0,
        });

        tick(&mut state, &TickInput::default());
        assert!(state.asteroids.is_empty());
        assert!(state.enemy_bullets.is_empty());
        assert!(state.powerups.is_empty());
        assert!(state.bullets.is_empty());
    }

    #[test]
    fn test_enemy_ship_fires_downward() {
        let mut state = quiet_state();
        let tuning = state.tuning().clone();
        let mut ship = crate::sim::spawner::spawn_enemy_ship(1, &tuning, state.screen, &mut state.rng);
        ship.pos = Vec2::new(300.0, 100.0);
        ship.shoot_cooldown = 1;
        state.enemy_ships.push(ship);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_ships[0].shoot_cooldown, 90);
        let shot_y = state.enemy_bullets[0].pos.y;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.enemy_bullets[0].pos.y, shot_y + 4.0);
    }

    #[test]
    fn test_level_up_event_and_banner() {
        let mut state = quiet_state();
        state.award(100);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.progress.level, 2);
        assert!(state.show_level_up());
        assert!(
            state
                .drain_cues()
                .contains(&AudioCue::Effect(SoundEffect::LevelUp))
        );

        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.show_level_up());
        assert_eq!(state.progress.level, 2);
    }

    #[test]
    fn test_game_over_freezes_play_and_restart() {
        let mut state = quiet_state();
        state.award(60);
        let center = state.player.center();
        state.enemy_bullets.push(EnemyBullet {
            pos: center,
            size: Vec2::new(4.0, 8.0),
            speed: 4.0,
        });
        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());
        assert_eq!(state.high_score(), 60);
        let particles = state.particles.len();
        assert_eq!(particles, 15);

        // Input other than restart is ignored; particles keep decaying
        let before = state.player.pos;
        let busy = TickInput {
            move_left: true,
            shoot: true,
            ..Default::default()
        };
        tick(&mut state, &busy);
        assert!(state.bullets.is_empty());
        assert_eq!(state.player.pos, before);
        assert_eq!(state.particles[0].life, 29);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.player.pos, Vec2::new(575.0, 550.0));
        assert_eq!(state.high_score(), 60);
    }

    #[test]
    fn test_level_recorded_when_last_hit_crosses_boundary() {
        let mut state = quiet_state();
        state.award(95);
        state.asteroids.push(Asteroid {
            pos: Vec2::new(100.0, 300.0),
            size: Vec2::new(40.0, 40.0),
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            level: 1,
        });
        state.bullets.push(Bullet {
            pos: Vec2::new(110.0, 305.0),
            size: Vec2::new(5.0, 10.0),
            speed: 0.0,
        });
        let center = state.player.center();
        state.enemy_bullets.push(EnemyBullet {
            pos: center,
            size: Vec2::new(4.0, 8.0),
            speed: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert!(state.is_game_over());
        assert_eq!(state.score, 105);
        assert_eq!(state.level(), 2);
        assert_eq!(state.progress.level, 2);
        assert_eq!(state.high_scores.entries[0].level, 2);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = quiet_state();
        state.award(40);
        tick(
            &mut state,
            &TickInput {
                restart: true,
                ..Default::default()
            },
        );
        assert_eq!(state.score, 40);
    }

    #[test]
    fn test_score_never_decreases() {
        let mut state = GameState::new(2024);
        let mut last = 0;
        for _ in 0..3000 {
            let input = autopilot_input(&state);
            tick(&mut state, &input);
            if state.is_game_over() {
                break;
            }
            assert!(state.score >= last);
            assert_eq!(state.progress.level, state.level());
            last = state.score;
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        for _ in 0..600 {
            let input = autopilot_input(&state1);
            assert_eq!(input, autopilot_input(&state2));
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.asteroids.len(), state2.asteroids.len());
        assert_eq!(state1.enemy_ships.len(), state2.enemy_ships.len());
        assert_eq!(state1.player.pos, state2.player.pos);
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(16))]

        #[test]
        fn prop_score_and_level_monotonic(seed in proptest::prelude::any::<u64>()) {
            let mut state = GameState::new(seed);
            let (mut score, mut level) = (0, 1);
            for _ in 0..900 {
                let input = autopilot_input(&state);
                tick(&mut state, &input);
                proptest::prop_assert!(state.score >= score);
                proptest::prop_assert!(state.progress.level >= level);
                score = state.score;
                level = state.progress.level;
            }
        }
    }

    #[test]
    fn test_autopilot_tracks_lowest_target() {
        let mut state = quiet_state();
        state.asteroids.push(Asteroid {
            pos: Vec2::new(100.0, 50.0),
            size: Vec2::new(40.0, 40.0),
            speed: 3.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            level: 1,
        });
        state.asteroids.push(Asteroid {
            pos: Vec2::new(900.0, 300.0),
            size: Vec2::new(40.0, 40.0),
            speed: 3.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            level: 1,
        });

        let input = autopilot_input(&state);
        assert!(input.move_right);
        assert!(!input.shoot);

        state.player.pos.x = 895.0;
        let input = autopilot_input(&state);
        assert!(!input.move_left && !input.move_right);
        assert!(input.shoot);
    }
}
