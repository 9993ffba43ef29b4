//! Time Loop - a puzzle game where every attempt becomes a ghost
//!
//! Core modules:
//! - `sim`: Deterministic simulation (recording, ghost replay, fixtures, loop lifecycle)
//! - `level`: Level configuration, built-in layout and validation
//! - `audio`: Event-to-sound cue mapping for the audio collaborator

pub mod audio;
pub mod level;
pub mod sim;

pub use level::{LevelConfig, LevelError};

/// Game configuration constants
pub mod consts {
    /// Logical tick rate the driver is expected to call `tick` at
    pub const TICK_RATE: u32 = 60;

    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Player (and ghost) bounding box edge length
    pub const PLAYER_SIZE: f32 = 20.0;
    /// Distance moved per tick along each input axis
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Number of past loops replayed as ghosts
    pub const MAX_LOOPS: usize = 3;

    /// Lever hit box edge length
    pub const LEVER_SIZE: f32 = 20.0;
    /// Ticks a lever ignores the player after toggling (0.5 s)
    pub const LEVER_COOLDOWN_TICKS: u32 = 30;

    /// Ticks a pressure plate stays pressed after the last touch (1 s)
    pub const PLATE_DURATION_TICKS: u32 = 60;

    /// Movable wall travel per tick, in pixels
    pub const WALL_SPEED: f32 = 20.0;

    /// Length of each half (fade-out, fade-in) of the goal transition (0.5 s)
    pub const TRANSITION_TICKS: u32 = 30;
}
