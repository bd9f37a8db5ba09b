//! Space Shooter headless runner
//!
//! Drives the simulation at one tick per frame with the built-in autopilot,
//! routes audio cues to a logging sink and reports the session result.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;

use space_shooter::Settings;
use space_shooter::audio::{AudioManager, LogSink};
use space_shooter::sim::{GameState, TickInput, autopilot_input, tick};

#[derive(Parser)]
#[command(
    name = "space-shooter",
    about = "Run the space shooter simulation headless"
)]
struct Cli {
    /// Run seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum frames to simulate
    #[arg(long, default_value = "36000")]
    frames: u64,

    /// Settings file (JSON)
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,

    /// Runs to restart after a game over
    #[arg(long, default_value = "0")]
    restarts: u32,

    /// Leave the ship idle instead of flying the demo autopilot
    #[arg(long)]
    no_autopilot: bool,

    /// Pace ticks at the configured frame rate
    #[arg(long)]
    realtime: bool,

    /// Print the final game state as JSON
    #[arg(long)]
    snapshot: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn load_settings(path: Option<&PathBuf>) -> Result<Settings> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        log::warn!("{} not found, using default settings", path.display());
        return Ok(Settings::default());
    }
    Settings::load(path).with_context(|| format!("loading settings from {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = load_settings(cli.settings.as_ref())?;
    if let Some(path) = &cli.write_settings {
        settings.save(path)?;
        return Ok(());
    }

    let seed = cli.seed.unwrap_or_else(clock_seed);
    let frame_time = Duration::from_secs_f64(1.0 / settings.fps as f64);
    let mut audio = AudioManager::new(LogSink, &settings);
    let mut state = GameState::with_settings(seed, settings)?;
    log::info!("Space Shooter starting with seed {}", seed);

    let mut restarts_left = cli.restarts;
    let mut runs = 1;
    for _ in 0..cli.frames {
        let mut input = if cli.no_autopilot {
            TickInput::default()
        } else {
            autopilot_input(&state)
        };
        if state.is_game_over() {
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            runs += 1;
            input.restart = true;
        }

        tick(&mut state, &input);
        audio.play_all(state.drain_cues());

        if cli.realtime {
            std::thread::sleep(frame_time);
        }
    }

    log::info!(
        "Session over after {} frames and {} run(s): score {}, level {}, best {}",
        state.time_ticks,
        runs,
        state.score,
        state.progress.level,
        state.high_score()
    );
    for (rank, entry) in state.high_scores.entries.iter().enumerate() {
        log::info!(
            "  #{} {} pts (level {}, frame {})",
            rank + 1,
            entry.score,
            entry.level,
            entry.tick
        );
    }

    if cli.snapshot {
        println!("{}", serde_json::to_string_pretty(&state)?);
    }
    Ok(())
}
