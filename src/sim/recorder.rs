//! Live player movement and the per-loop action log
//!
//! The log is event-sampled: a position is appended only on ticks where the
//! input direction is non-zero. Idle ticks leave no trace, so a ghost replays
//! one recorded move per tick regardless of how long the player paused.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Input direction with each axis in {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "IVec2", into = "IVec2")]
pub struct Direction(IVec2);

impl From<IVec2> for Direction {
    fn from(v: IVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Direction> for IVec2 {
    fn from(direction: Direction) -> Self {
        direction.0
    }
}

impl Direction {
    pub const NONE: Self = Self(IVec2::ZERO);
    pub const LEFT: Self = Self(IVec2::new(-1, 0));
    pub const RIGHT: Self = Self(IVec2::new(1, 0));
    pub const UP: Self = Self(IVec2::new(0, -1));
    pub const DOWN: Self = Self(IVec2::new(0, 1));

    /// Any magnitude is reduced to its sign, so diagonal and oversized input is tolerated
    pub fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x.signum(), y.signum()))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn y(&self) -> i32 {
        self.0.y
    }

    pub fn is_zero(&self) -> bool {
        self.0 == IVec2::ZERO
    }

    pub fn reversed(&self) -> Self {
        Self(-self.0)
    }

    pub fn as_vec2(&self) -> Vec2 {
        self.0.as_vec2()
    }
}

/// Ordered position history of one loop
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    entries: Vec<Vec2>,
}

impl ActionLog {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Vec2] {
        &self.entries
    }

    pub fn last(&self) -> Option<Vec2> {
        self.entries.last().copied()
    }

    fn push(&mut self, pos: Vec2) {
        self.entries.push(pos);
    }

    /// Seal the log. The returned slice is never resized or written again.
    pub fn freeze(self) -> Box<[Vec2]> {
        self.entries.into_boxed_slice()
    }
}

/// Result of a single move: where the player was and where it ended up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub previous: Vec2,
    pub current: Vec2,
}

impl Step {
    pub fn displaced(&self) -> bool {
        self.previous != self.current
    }
}

/// Owns the live player's position and the action log of the current loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecorder {
    position: Vec2,
    /// Edge length of the player box
    size: f32,
    /// Distance per tick along each axis
    speed: f32,
    /// Smallest allowed top-left position
    min_pos: Vec2,
    /// Largest allowed top-left position
    max_pos: Vec2,
    log: ActionLog,
}

impl ActionRecorder {
    pub fn new(start: Vec2, size: f32, speed: f32, arena: &Rect) -> Self {
        let min_pos = arena.min();
        let max_pos = (arena.max() - Vec2::splat(size)).max(min_pos);
        Self {
            position: start.clamp(min_pos, max_pos),
            size,
            speed,
            min_pos,
            max_pos,
            log: ActionLog::default(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current bounding box of the player
    pub fn rect(&self) -> Rect {
        Rect::square(self.position, self.size)
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    /// Move by `direction * speed`, clamping each axis to the arena independently.
    ///
    /// Obstacles are not considered here. A non-zero direction appends the
    /// resulting position to the log, even when clamping cancels the motion.
    pub fn step(&mut self, direction: Direction) -> Step {
        let previous = self.position;
        let candidate = previous + direction.as_vec2() * self.speed;
        self.position = candidate.clamp(self.min_pos, self.max_pos);

        if !direction.is_zero() {
            self.log.push(self.position);
        }

        Step {
            previous,
            current: self.position,
        }
    }

    /// Hand over the finished log and start an empty one
    pub fn take_log(&mut self) -> ActionLog {
        std::mem::take(&mut self.log)
    }

    /// Return to `start` with an empty log. Records nothing.
    pub fn reset(&mut self, start: Vec2) {
        self.position = start.clamp(self.min_pos, self.max_pos);
        self.log = ActionLog::default();
    }
}
