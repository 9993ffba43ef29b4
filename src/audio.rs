//! Sound cues for simulation events
//!
//! The simulation knows nothing about sound. This module maps each
//! `GameEvent` to a sound file and resolves the files once at startup.
//! A missing file only disables its cue; it never reaches the simulation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Player footstep
    Step,
    /// Lever clunk
    Lever,
    /// Goal chime
    Goal,
    /// Time rewinds for a new loop
    Rewind,
}

impl SoundCue {
    pub const ALL: [SoundCue; 4] = [
        SoundCue::Step,
        SoundCue::Lever,
        SoundCue::Goal,
        SoundCue::Rewind,
    ];

    pub fn for_event(event: GameEvent) -> Self {
        match event {
            GameEvent::Moved => SoundCue::Step,
            GameEvent::LeverToggled => SoundCue::Lever,
            GameEvent::GoalReached => SoundCue::Goal,
            GameEvent::LoopRestarted => SoundCue::Rewind,
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::Step => "step.wav",
            SoundCue::Lever => "lever.wav",
            SoundCue::Goal => "goal.wav",
            SoundCue::Rewind => "rewind.wav",
        }
    }

    /// Relative loudness (footsteps fire every tick, keep them quiet)
    fn gain(&self) -> f32 {
        match self {
            SoundCue::Step => 0.2,
            SoundCue::Lever => 0.8,
            SoundCue::Goal => 1.0,
            SoundCue::Rewind => 0.9,
        }
    }
}

/// A request for the audio backend: which file, how loud
#[derive(Debug, Clone, PartialEq)]
pub struct PlayRequest<'a> {
    pub cue: SoundCue,
    pub path: &'a Path,
    pub volume: f32,
}

/// Resolved sound files plus volume settings
#[derive(Debug, Clone)]
pub struct SoundBank {
    clips: HashMap<SoundCue, PathBuf>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for SoundBank {
    fn default() -> Self {
        Self::silent()
    }
}

impl SoundBank {
    /// A bank with no clips; every cue is skipped
    pub fn silent() -> Self {
        Self {
            clips: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Resolve every cue's file under `dir`, skipping any that are missing
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut bank = Self::silent();
        for cue in SoundCue::ALL {
            let path = dir.join(cue.file_name());
            if path.is_file() {
                bank.clips.insert(cue, path);
            } else {
                log::warn!("Sound {} not found - {:?} cue disabled", path.display(), cue);
            }
        }
        log::info!(
            "Loaded {}/{} sound cues from {}",
            bank.clips.len(),
            SoundCue::ALL.len(),
            dir.display()
        );
        bank
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn clip(&self, cue: SoundCue) -> Option<&Path> {
        self.clips.get(&cue).map(PathBuf::as_path)
    }

    /// Play requests for one tick's events; unresolved cues are dropped
    pub fn requests(&self, events: &[GameEvent]) -> Vec<PlayRequest<'_>> {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return Vec::new();
        }
        events
            .iter()
            .map(|&event| SoundCue::for_event(event))
            .filter_map(|cue| {
                self.clip(cue).map(|path| PlayRequest {
                    cue,
                    path,
                    volume: vol * cue.gain(),
                })
            })
            .collect()
    }
}
