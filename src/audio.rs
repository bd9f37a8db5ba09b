//! Audio side-channel
//!
//! The simulation only emits cues; it never waits on or reads back anything
//! from audio. A host plugs a real mixer in behind `AudioSink`.

use serde::Serialize;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundEffect {
    /// Player fired a bullet
    Shoot,
    /// Bullet destroyed an asteroid
    AsteroidExplosion,
    /// Bullet destroyed an enemy ship
    ShipExplosion,
    /// Player ship destroyed
    PlayerDestroyed,
    /// Shield absorbed a hit
    ShieldHit,
    /// Power-up collected
    Pickup,
    /// Difficulty increased
    LevelUp,
}

impl SoundEffect {
    /// Relative mix level for this effect
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.4,
            SoundEffect::AsteroidExplosion => 0.6,
            SoundEffect::ShipExplosion => 0.7,
            SoundEffect::PlayerDestroyed => 1.0,
            SoundEffect::ShieldHit => 0.5,
            SoundEffect::Pickup => 0.5,
            SoundEffect::LevelUp => 0.3,
        }
    }
}

/// Fire-and-forget message from the simulation to the audio host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AudioCue {
    Effect(SoundEffect),
    MusicStart,
    MusicStop,
}

/// Music loop mix level relative to the music volume setting
pub const MUSIC_BASE_VOLUME: f32 = 0.2;

/// Backend that actually produces sound
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn start_music(&mut self, volume: f32);
    fn stop_music(&mut self);
}

/// Sink that only logs cues (headless runs)
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
    }

    fn start_music(&mut self, volume: f32) {
        log::debug!("music start @ {:.2}", volume);
    }

    fn stop_music(&mut self) {
        log::debug!("music stop");
    }
}

/// Audio manager for the game
pub struct AudioManager<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &crate::Settings) -> Self {
        Self {
            sink,
            master_volume: settings.master_volume,
            sfx_volume: settings.sfx_volume,
            music_volume: settings.music_volume,
            muted: false,
            music_playing: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn effective_sfx_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume * effect.base_volume()
        }
    }

    fn effective_music_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume * MUSIC_BASE_VOLUME
        }
    }

    /// Forward one cue to the sink
    pub fn play(&mut self, cue: AudioCue) {
        match cue {
            AudioCue::Effect(effect) => {
                let vol = self.effective_sfx_volume(effect);
                if vol <= 0.0 {
                    return;
                }
                self.sink.play_effect(effect, vol);
            }
            AudioCue::MusicStart => {
                if !self.music_playing {
                    let vol = self.effective_music_volume();
                    self.sink.start_music(vol);
                    self.music_playing = true;
                }
            }
            AudioCue::MusicStop => {
                if self.music_playing {
                    self.sink.stop_music();
                    self.music_playing = false;
                }
            }
        }
    }

    /// Play every queued cue in order
    pub fn play_all(&mut self, cues: impl IntoIterator<Item = AudioCue>) {
        for cue in cues {
            self.play(cue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;

    #[derive(Default)]
    struct Recorder {
        effects: Vec<(SoundEffect, f32)>,
        music_starts: u32,
        music_stops: u32,
    }

    impl AudioSink for Recorder {
        fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
            self.effects.push((effect, volume));
        }

        fn start_music(&mut self, _volume: f32) {
            self.music_starts += 1;
        }

        fn stop_music(&mut self) {
            self.music_stops += 1;
        }
    }

    #[test]
    fn test_effect_volume_mix() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 1.0,
            ..Settings::default()
        };
        let mut audio = AudioManager::new(Recorder::default(), &settings);
        audio.play(AudioCue::Effect(SoundEffect::PlayerDestroyed));
        audio.play(AudioCue::Effect(SoundEffect::Shoot));

        let effects = &audio.sink().effects;
        assert_eq!(effects.len(), 2);
        assert!((effects[0].1 - 0.5).abs() < 1e-6);
        assert!((effects[1].1 - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_master_volume_clamped() {
        let mut audio = AudioManager::new(Recorder::default(), &Settings::default());
        audio.set_master_volume(2.0);
        audio.play(AudioCue::Effect(SoundEffect::PlayerDestroyed));
        audio.set_master_volume(-1.0);
        audio.play(AudioCue::Effect(SoundEffect::PlayerDestroyed));

        let effects = &audio.sink().effects;
        assert_eq!(effects.len(), 1);
        assert!((effects[0].1 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_muted_drops_effects() {
        let mut audio = AudioManager::new(Recorder::default(), &Settings::default());
        audio.set_muted(true);
        audio.play(AudioCue::Effect(SoundEffect::Shoot));
        assert!(audio.sink().effects.is_empty());
    }

    #[test]
    fn test_music_start_stop_is_idempotent() {
        let mut audio = AudioManager::new(Recorder::default(), &Settings::default());
        audio.play_all([
            AudioCue::MusicStart,
            AudioCue::MusicStart,
            AudioCue::MusicStop,
            AudioCue::MusicStop,
        ]);
        assert_eq!(audio.sink().music_starts, 1);
        assert_eq!(audio.sink().music_stops, 1);
        assert!(!audio.music_playing());
    }
}
