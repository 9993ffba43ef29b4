//! Ghost replay of a finished loop
//!
//! A ghost advances one log entry per tick and then holds its final position.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::recorder::ActionLog;

/// RGBA tint, components in 0-1
pub type GhostColor = [f32; 4];

/// Ghost tints, cycled by loop ordinal (semi-transparent purple first)
pub const GHOST_PALETTE: [GhostColor; 6] = [
    [0.50, 0.00, 1.00, 0.70],
    [0.00, 0.75, 0.85, 0.70],
    [1.00, 0.55, 0.00, 0.70],
    [0.90, 0.20, 0.55, 0.70],
    [0.35, 0.85, 0.25, 0.70],
    [0.95, 0.85, 0.15, 0.70],
];

/// Identity of a ghost: which loop it came from and how it is tinted
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GhostId {
    /// 1-based loop number the recording was made in
    pub ordinal: u32,
    pub color: GhostColor,
}

impl GhostId {
    pub fn new(ordinal: u32) -> Self {
        let slot = (ordinal.saturating_sub(1) as usize) % GHOST_PALETTE.len();
        Self {
            ordinal,
            color: GHOST_PALETTE[slot],
        }
    }
}

/// Replays a frozen action log in lockstep with the global tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ghost {
    pub id: GhostId,
    log: Box<[Vec2]>,
    cursor: usize,
}

impl Ghost {
    pub fn new(id: GhostId, log: ActionLog) -> Self {
        Self {
            id,
            log: log.freeze(),
            cursor: 0,
        }
    }

    pub fn log(&self) -> &[Vec2] {
        &self.log
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the replay has reached its last recorded position
    pub fn finished(&self) -> bool {
        self.cursor + 1 >= self.log.len()
    }

    /// Move one entry forward; holds on the last one
    pub fn advance(&mut self) {
        if !self.finished() {
            self.cursor += 1;
        }
    }

    /// Replay from the first entry again (start of a new loop)
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Position at the cursor, `None` for an empty recording
    pub fn current_position(&self) -> Option<Vec2> {
        self.log.get(self.cursor).copied()
    }

    /// Bounding box at the cursor
    pub fn rect(&self, size: f32) -> Option<Rect> {
        self.current_position().map(|pos| Rect::square(pos, size))
    }
}
