//! Game state and session lifecycle
//!
//! One owned aggregate holds every live entity, the score, the RNG and the
//! queue of audio cues for the host. Nothing lives in globals.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::entities::{
    Asteroid, Bullet, EnemyBullet, EnemyShip, Particle, Player, PowerUp, PowerUpKind, Screen,
    spawn_burst,
};
use super::level::{self, LevelController};
use super::spawner::Spawner;
use crate::audio::{AudioCue, SoundEffect};
use crate::error::SettingsError;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player destroyed, waiting for restart
    GameOver,
}

/// Complete game state; serializes to a read-only snapshot for rendering
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    #[serde(skip)]
    settings: Settings,
    pub screen: Screen,
    pub phase: GamePhase,
    /// Score for the current run; never decreases within a run
    pub score: u64,
    /// Recorded level and level-up banner
    pub progress: LevelController,
    /// Simulation tick counter (whole session, not reset on restart)
    pub time_ticks: u64,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub asteroids: Vec<Asteroid>,
    pub enemy_ships: Vec<EnemyShip>,
    pub powerups: Vec<PowerUp>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    /// Session leaderboard; survives restarts
    pub high_scores: HighScores,
    /// Whether background music should currently be playing
    pub music_on: bool,
    /// Audio cues emitted since the host last drained them
    #[serde(skip)]
    cues: Vec<AudioCue>,
}

impl GameState {
    /// Create a new game with default settings
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Settings::default())
    }

    /// Create a new game, rejecting settings the simulation cannot run with
    pub fn with_settings(seed: u64, settings: Settings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::build(seed, settings))
    }

    fn build(seed: u64, settings: Settings) -> Self {
        let screen = Screen::from_settings(&settings);
        let player = Player::new(&settings.tuning, screen);
        let music_on = settings.music_enabled;
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            screen,
            phase: GamePhase::Playing,
            score: 0,
            progress: LevelController::default(),
            time_ticks: 0,
            player,
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            asteroids: Vec::new(),
            enemy_ships: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            spawner: Spawner::default(),
            high_scores: HighScores::new(),
            music_on,
            cues: Vec::new(),
        };
        if music_on {
            state.emit(AudioCue::MusicStart);
        }
        state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tuning(&self) -> &Tuning {
        &self.settings.tuning
    }

    /// Level derived from the current score
    pub fn level(&self) -> u32 {
        level::current_level(self.tuning(), self.score)
    }

    /// Frames between asteroid spawns at the current level
    pub fn spawn_rate(&self) -> u32 {
        level::spawn_rate(self.tuning(), self.level())
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn show_level_up(&self) -> bool {
        self.progress.show_level_up()
    }

    /// Best score of this process
    pub fn high_score(&self) -> u64 {
        self.high_scores.top_score()
    }

    pub fn shield_secs_remaining(&self) -> f32 {
        self.settings.ticks_to_secs(self.player.shield_ticks)
    }

    pub fn rapid_fire_secs_remaining(&self) -> f32 {
        self.settings.ticks_to_secs(self.player.rapid_fire_ticks)
    }

    pub fn emit(&mut self, cue: AudioCue) {
        self.cues.push(cue);
    }

    /// Hand queued audio cues to the host, oldest first
    pub fn drain_cues(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Add an explosion of `count` particles at `origin`
    pub fn burst(&mut self, origin: Vec2, count: usize) {
        spawn_burst(
            &mut self.particles,
            origin,
            count,
            &self.settings.tuning,
            &mut self.rng,
        );
    }

    /// Fire the player's weapon if it is off cooldown
    pub fn player_shoot(&mut self) -> bool {
        if !self.player.can_shoot() {
            return false;
        }
        let tuning = &self.settings.tuning;
        self.bullets.push(Bullet::from_player(&self.player, tuning));
        self.player.shoot(tuning);
        self.emit(AudioCue::Effect(SoundEffect::Shoot));
        true
    }

    /// Every enemy ship whose cooldown has run out fires once
    pub fn enemy_ships_fire(&mut self) {
        let tuning = &self.settings.tuning;
        for ship in self.enemy_ships.iter_mut() {
            if ship.can_shoot() {
                self.enemy_bullets.push(ship.shoot(tuning));
            }
        }
    }

    /// One spawner step at the score-derived level
    pub fn spawn(&mut self) {
        let level = self.level();
        let spawned = self
            .spawner
            .step(level, &self.settings.tuning, self.screen, &mut self.rng);
        self.asteroids.extend(spawned.asteroid);
        self.enemy_ships.extend(spawned.enemy_ship);
        self.powerups.extend(spawned.powerup);
    }

    pub fn collect_powerup(&mut self, kind: PowerUpKind) {
        self.player.apply_powerup(kind, &self.settings.tuning);
        self.emit(AudioCue::Effect(SoundEffect::Pickup));
    }

    /// Record a level reached by score; true on a level-up
    pub fn check_level_up(&mut self) -> bool {
        if !self.progress.check_level_up(self.score, &self.settings.tuning) {
            return false;
        }
        self.emit(AudioCue::Effect(SoundEffect::LevelUp));
        log::info!("Level up! Now at level {}", self.progress.level);
        true
    }

    pub fn toggle_music(&mut self) {
        self.music_on = !self.music_on;
        self.emit(if self.music_on {
            AudioCue::MusicStart
        } else {
            AudioCue::MusicStop
        });
        log::info!("Music {}", if self.music_on { "on" } else { "off" });
    }

    /// Playing -> GameOver: record the run and silence the music
    pub fn end_run(&mut self) {
        if self.is_game_over() {
            return;
        }
        let previous_best = self.high_score();
        self.phase = GamePhase::GameOver;
        // The fatal frame may also have scored past a level boundary
        self.progress.level = self.progress.level.max(self.level());
        self.high_scores
            .add_score(self.score, self.progress.level, self.time_ticks);

        self.emit(AudioCue::Effect(SoundEffect::PlayerDestroyed));
        if self.music_on {
            self.music_on = false;
            self.emit(AudioCue::MusicStop);
        }

        if self.score > previous_best {
            log::info!("Game over - new high score {} (was {})", self.score, previous_best);
        } else {
            log::info!("Game over - score {} (best {})", self.score, previous_best);
        }
    }

    /// GameOver -> Playing with a fresh run
    ///
    /// Clears every transient collection, including enemy ships, enemy
    /// bullets and power-ups. The leaderboard, RNG stream and session tick
    /// counter carry over.
    pub fn restart(&mut self) {
        if !self.is_game_over() {
            return;
        }
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.progress.reset();
        self.player = Player::new(&self.settings.tuning, self.screen);
        self.bullets.clear();
        self.enemy_bullets.clear();
        self.asteroids.clear();
        self.enemy_ships.clear();
        self.powerups.clear();
        self.particles.clear();
        self.spawner.reset();

        if self.settings.music_enabled && !self.music_on {
            self.music_on = true;
            self.emit(AudioCue::MusicStart);
        }
        log::info!("Restarted (best {})", self.high_score());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawner::spawn_enemy_ship;

    #[test]
    fn test_new_state() {
        let mut state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.spawn_rate(), 30);
        assert_eq!(state.player.pos, Vec2::new(575.0, 550.0));
        assert_eq!(state.drain_cues(), vec![AudioCue::MusicStart]);
        assert!(state.drain_cues().is_empty());
    }

    #[test]
    fn test_with_settings_validates() {
        let bad = Settings {
            screen_width: -1.0,
            ..Settings::default()
        };
        assert!(GameState::with_settings(1, bad).is_err());
        assert!(GameState::with_settings(1, Settings::default()).is_ok());
    }

    #[test]
    fn test_end_run_updates_high_score_once() {
        let mut state = GameState::new(1);
        state.award(120);
        state.end_run();
        assert!(state.is_game_over());
        assert_eq!(state.high_score(), 120);

        // A second fatal event in the same state changes nothing
        state.end_run();
        assert_eq!(state.high_scores.entries.len(), 1);
        assert!(!state.music_on);
    }

    #[test]
    fn test_lower_score_keeps_high_score() {
        let mut state = GameState::new(1);
        state.award(300);
        state.end_run();
        state.restart();
        state.award(200);
        state.end_run();
        assert_eq!(state.high_score(), 300);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(1);
        let tuning = state.tuning().clone();
        state.award(250);
        state.progress.check_level_up(state.score, &tuning);
        state.player.pos.x = 10.0;
        state.player.activate_shield(&tuning);
        state.burst(Vec2::ZERO, 5);
        let ship = spawn_enemy_ship(1, &tuning, state.screen, &mut state.rng);
        state.enemy_ships.push(ship);
        state.spawner.asteroid_timer = 17;

        // Restart is ignored while playing
        state.restart();
        assert_eq!(state.score, 250);

        state.end_run();
        state.drain_cues();
        state.restart();

        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.progress, LevelController::default());
        assert_eq!(state.player.pos, Vec2::new(575.0, 550.0));
        assert!(!state.player.has_shield);
        assert!(state.particles.is_empty());
        assert!(state.enemy_ships.is_empty());
        assert_eq!(state.spawner.asteroid_timer, 0);
        assert_eq!(state.high_score(), 250);
        assert!(state.music_on);
        assert_eq!(state.drain_cues(), vec![AudioCue::MusicStart]);
    }

    #[test]
    fn test_buff_seconds_remaining() {
        let mut state = GameState::new(1);
        assert_eq!(state.shield_secs_remaining(), 0.0);
        assert_eq!(state.rapid_fire_secs_remaining(), 0.0);

        state.collect_powerup(PowerUpKind::Shield);
        state.collect_powerup(PowerUpKind::RapidFire);
        assert_eq!(state.shield_secs_remaining(), 5.0);
        assert_eq!(state.rapid_fire_secs_remaining(), 5.0);

        for _ in 0..30 {
            state.player.advance();
        }
        assert_eq!(state.shield_secs_remaining(), 4.5);
        assert_eq!(state.rapid_fire_secs_remaining(), 4.5);
        assert_eq!(
            state
                .drain_cues()
                .iter()
                .filter(|c| **c == AudioCue::Effect(SoundEffect::Pickup))
                .count(),
            2
        );
    }

    #[test]
    fn test_toggle_music() {
        let mut state = GameState::new(1);
        state.drain_cues();
        state.toggle_music();
        assert!(!state.music_on);
        state.toggle_music();
        assert!(state.music_on);
        assert_eq!(
            state.drain_cues(),
            vec![AudioCue::MusicStop, AudioCue::MusicStart]
        );
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["score"], 0);
        assert!(json.get("rng").is_none());
    }
}
