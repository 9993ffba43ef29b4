//! Level configuration
//!
//! A level is plain data: static geometry, the initial fixture layout and a
//! few tuning values. It is validated once, when the game is built; a level
//! that passes validation never produces an error during play.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::fixtures::{Fixtures, Lever, MovableWall, PressurePlate};
use crate::sim::geometry::{Geometry, Rect};

/// Errors raised when loading or validating a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("arena must have positive width and height, got {width}x{height}")]
    InvalidArena { width: f32, height: f32 },
    #[error("player size and speed must be positive, got size {size}, speed {speed}")]
    InvalidPlayer { size: f32, speed: f32 },
    #[error("max_loops must be at least 1")]
    NoLoops,
    #[error("start position {start} puts the player outside the arena")]
    StartOutOfBounds { start: Vec2 },
    #[error("start position overlaps wall {wall}")]
    StartBlocked { wall: usize },
    #[error("start position overlaps movable wall {wall}")]
    StartBlockedByMovableWall { wall: usize },
    #[error("start position overlaps the goal")]
    StartInGoal,
    #[error("lever {lever} links movable wall {wall}, which does not exist")]
    UnknownLeverWall { lever: usize, wall: usize },
    #[error("plate {plate} links movable wall {wall}, which does not exist")]
    UnknownPlateWall { plate: usize, wall: usize },
    #[error("movable wall {wall} is linked by both a lever and a plate")]
    ConflictingWallLinks { wall: usize },
    #[error("plate {plate} has zero duration")]
    ZeroPlateDuration { plate: usize },
    #[error("lever cooldown must be at least 1 tick")]
    ZeroLeverCooldown,
    #[error("wall speed must be positive, got {0}")]
    InvalidWallSpeed(f32),
    #[error("transition must last at least 1 tick")]
    ZeroTransition,
}

/// A movable wall in its initial state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovableWallConfig {
    pub rect: Rect,
    /// Starts placed (solid) when true
    #[serde(default = "default_true")]
    pub active: bool,
    /// Offset when retracted; defaults to just above the arena's top edge
    #[serde(default)]
    pub retract_offset: Option<Vec2>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverConfig {
    pub position: Vec2,
    /// Movable wall toggled by this lever
    #[serde(default)]
    pub wall: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateConfig {
    pub rect: Rect,
    #[serde(default = "default_plate_duration")]
    pub duration: u32,
    /// Movable wall held open while the plate is pressed
    #[serde(default)]
    pub wall: Option<usize>,
}

/// Complete description of one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_arena_width")]
    pub arena_width: f32,
    #[serde(default = "default_arena_height")]
    pub arena_height: f32,
    /// Player spawn (top-left of the player box)
    pub start: Vec2,
    pub goal: Rect,
    #[serde(default)]
    pub walls: Vec<Rect>,
    #[serde(default)]
    pub movable_walls: Vec<MovableWallConfig>,
    #[serde(default)]
    pub levers: Vec<LeverConfig>,
    #[serde(default)]
    pub plates: Vec<PlateConfig>,

    // === Tuning ===
    /// Ghosts retained at once
    #[serde(default = "default_max_loops")]
    pub max_loops: usize,
    #[serde(default = "default_player_size")]
    pub player_size: f32,
    #[serde(default = "default_player_speed")]
    pub player_speed: f32,
    #[serde(default = "default_lever_cooldown")]
    pub lever_cooldown_ticks: u32,
    #[serde(default = "default_wall_speed")]
    pub wall_speed: f32,
    /// Ticks per fade (out and in)
    #[serde(default = "default_transition_ticks")]
    pub transition_ticks: u32,
}

fn default_true() -> bool {
    true
}
fn default_plate_duration() -> u32 {
    PLATE_DURATION_TICKS
}
fn default_arena_width() -> f32 {
    ARENA_WIDTH
}
fn default_arena_height() -> f32 {
    ARENA_HEIGHT
}
fn default_max_loops() -> usize {
    MAX_LOOPS
}
fn default_player_size() -> f32 {
    PLAYER_SIZE
}
fn default_player_speed() -> f32 {
    PLAYER_SPEED
}
fn default_lever_cooldown() -> u32 {
    LEVER_COOLDOWN_TICKS
}
fn default_wall_speed() -> f32 {
    WALL_SPEED
}
fn default_transition_ticks() -> u32 {
    TRANSITION_TICKS
}

impl Default for LevelConfig {
    /// The built-in level: a walled maze with a lever-operated gate on the
    /// right-hand column and a plate-held gate on the bottom corridor.
    fn default() -> Self {
        Self {
            name: "Echoes".to_string(),
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            start: Vec2::new(50.0, 50.0),
            goal: Rect::new(700.0, 500.0, 50.0, 50.0),
            walls: vec![
                Rect::new(100.0, 100.0, 600.0, 20.0), // Top wall
                Rect::new(100.0, 300.0, 600.0, 20.0), // Middle wall
                Rect::new(100.0, 500.0, 400.0, 20.0), // Bottom partial wall
                Rect::new(300.0, 200.0, 20.0, 100.0), // Vertical wall 1
                Rect::new(500.0, 320.0, 20.0, 180.0), // Vertical wall 2
            ],
            movable_walls: vec![
                // Closes the right-hand column beside the middle wall
                MovableWallConfig {
                    rect: Rect::new(700.0, 300.0, 100.0, 20.0),
                    active: true,
                    retract_offset: None,
                },
                // Closes the bottom corridor
                MovableWallConfig {
                    rect: Rect::new(600.0, 520.0, 20.0, 80.0),
                    active: true,
                    retract_offset: None,
                },
            ],
            levers: vec![LeverConfig {
                position: Vec2::new(40.0, 200.0),
                wall: Some(0),
            }],
            plates: vec![PlateConfig {
                rect: Rect::new(30.0, 400.0, 40.0, 40.0),
                duration: PLATE_DURATION_TICKS,
                wall: Some(1),
            }],
            max_loops: MAX_LOOPS,
            player_size: PLAYER_SIZE,
            player_speed: PLAYER_SPEED,
            lever_cooldown_ticks: LEVER_COOLDOWN_TICKS,
            wall_speed: WALL_SPEED,
            transition_ticks: TRANSITION_TICKS,
        }
    }
}

impl LevelConfig {
    /// Parse and validate a level from JSON
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a level file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded level '{}' from {}", config.name, path.display());
        Ok(config)
    }

    pub fn arena(&self) -> Rect {
        Rect::new(0.0, 0.0, self.arena_width, self.arena_height)
    }

    /// Reject anything that would make the simulation misbehave later
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return Err(LevelError::InvalidArena {
                width: self.arena_width,
                height: self.arena_height,
            });
        }
        if !(self.player_size > 0.0 && self.player_speed > 0.0) {
            return Err(LevelError::InvalidPlayer {
                size: self.player_size,
                speed: self.player_speed,
            });
        }
        if self.max_loops == 0 {
            return Err(LevelError::NoLoops);
        }
        if self.lever_cooldown_ticks == 0 {
            return Err(LevelError::ZeroLeverCooldown);
        }
        if !(self.wall_speed > 0.0) {
            return Err(LevelError::InvalidWallSpeed(self.wall_speed));
        }
        if self.transition_ticks == 0 {
            return Err(LevelError::ZeroTransition);
        }

        let player = Rect::square(self.start, self.player_size);
        if !self.arena().contains_rect(&player) {
            return Err(LevelError::StartOutOfBounds { start: self.start });
        }
        if let Some(wall) = self.walls.iter().position(|w| w.intersects(&player)) {
            return Err(LevelError::StartBlocked { wall });
        }
        if let Some(wall) = self
            .movable_walls
            .iter()
            .position(|w| w.active && w.rect.intersects(&player))
        {
            return Err(LevelError::StartBlockedByMovableWall { wall });
        }
        if self.goal.intersects(&player) {
            return Err(LevelError::StartInGoal);
        }

        let wall_count = self.movable_walls.len();
        for (lever, config) in self.levers.iter().enumerate() {
            if let Some(wall) = config.wall.filter(|&w| w >= wall_count) {
                return Err(LevelError::UnknownLeverWall { lever, wall });
            }
        }
        for (plate, config) in self.plates.iter().enumerate() {
            if let Some(wall) = config.wall.filter(|&w| w >= wall_count) {
                return Err(LevelError::UnknownPlateWall { plate, wall });
            }
            if config.duration == 0 {
                return Err(LevelError::ZeroPlateDuration { plate });
            }
        }
        for plate in &self.plates {
            if let Some(wall) = plate
                .wall
                .filter(|&w| self.levers.iter().any(|l| l.wall == Some(w)))
            {
                return Err(LevelError::ConflictingWallLinks { wall });
            }
        }

        Ok(())
    }

    /// Static geometry of this level
    pub fn geometry(&self) -> Geometry {
        Geometry {
            arena: self.arena(),
            walls: self.walls.clone(),
            goal: self.goal,
            start: self.start,
        }
    }

    /// Initial fixture layout of this level
    pub fn fixtures(&self) -> Fixtures {
        let walls = self
            .movable_walls
            .iter()
            .map(|w| {
                let offset = w
                    .retract_offset
                    .unwrap_or_else(|| Vec2::new(0.0, -(w.rect.y + w.rect.h)));
                MovableWall::new(w.rect, offset, self.wall_speed, w.active)
            })
            .collect();
        let levers = self
            .levers
            .iter()
            .map(|l| Lever::new(l.position, LEVER_SIZE, l.wall, self.lever_cooldown_ticks))
            .collect();
        let plates = self
            .plates
            .iter()
            .map(|p| PressurePlate::new(p.rect, p.duration, p.wall))
            .collect();

        Fixtures {
            walls,
            levers,
            plates,
        }
    }
}
