//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical tick only
//! - Stable iteration order (level order for fixtures, oldest-first for ghosts)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod fixtures;
pub mod geometry;
pub mod ghost;
pub mod recorder;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Blocker, MoveOutcome, find_blocker, move_player, press_plates, toggle_levers};
pub use fixtures::{
    Fixtures, Lever, LeverCooldown, MovableWall, PlateState, PressurePlate, WallMotion,
};
pub use geometry::{Geometry, Rect};
pub use ghost::{GHOST_PALETTE, Ghost, GhostColor, GhostId};
pub use recorder::{ActionLog, ActionRecorder, Direction, Step};
pub use snapshot::Snapshot;
pub use state::{Fade, GameEvent, GamePhase, GameState, Transition};
pub use tick::{TickInput, tick};
