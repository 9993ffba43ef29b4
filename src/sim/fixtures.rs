//! Dynamic level elements: movable walls, levers and pressure plates
//!
//! Each fixture carries an explicit state enum instead of loose flags:
//! - `WallMotion`: placed, retracted, or moving between the two
//! - `LeverCooldown`: ready, or cooling down after a toggle
//! - `PlateState`: idle, or pressed with ticks remaining

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;

/// Animation phase of a movable wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallMotion {
    /// At rest in its level position (solid)
    Placed,
    /// At rest out of the arena (not solid)
    Retracted,
    /// Travelling toward its target (solid at its interpolated position)
    Moving,
}

/// A wall that slides between its placed and retracted positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovableWall {
    /// Rectangle when placed
    pub shape: Rect,
    /// Offset from `shape` when fully retracted
    pub retract_offset: Vec2,
    /// Travel per tick
    pub speed: f32,
    /// Target: placed (`true`) or retracted (`false`)
    active: bool,
    /// Current offset from `shape`
    offset: Vec2,
    motion: WallMotion,
}

impl MovableWall {
    pub fn new(shape: Rect, retract_offset: Vec2, speed: f32, active: bool) -> Self {
        let (offset, motion) = if active {
            (Vec2::ZERO, WallMotion::Placed)
        } else {
            (retract_offset, WallMotion::Retracted)
        };
        Self {
            shape,
            retract_offset,
            speed,
            active,
            offset,
            motion,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn motion(&self) -> WallMotion {
        self.motion
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    fn target_offset(&self) -> Vec2 {
        if self.active {
            Vec2::ZERO
        } else {
            self.retract_offset
        }
    }

    fn rest_state(&self) -> WallMotion {
        if self.active {
            WallMotion::Placed
        } else {
            WallMotion::Retracted
        }
    }

    /// Set the target position. Setting the current target again changes nothing.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
        self.motion = if self.offset == self.target_offset() {
            self.rest_state()
        } else {
            WallMotion::Moving
        };
    }

    pub fn toggle(&mut self) {
        self.set_active(!self.active);
    }

    /// Offset after one more tick of travel
    fn next_offset(&self) -> Vec2 {
        let delta = self.target_offset() - self.offset;
        let dist = delta.length();
        if dist <= self.speed {
            self.target_offset()
        } else {
            self.offset + delta / dist * self.speed
        }
    }

    /// Slide one tick toward the target
    pub fn advance(&mut self) {
        if self.motion != WallMotion::Moving {
            return;
        }
        self.offset = self.next_offset();
        if self.offset == self.target_offset() {
            self.motion = self.rest_state();
        }
    }

    /// Slide one tick toward the target unless that step would land on `body`.
    ///
    /// A held wall stays `Moving` and tries again on the next tick.
    pub fn advance_clear_of(&mut self, body: &Rect) {
        if self.motion != WallMotion::Moving {
            return;
        }
        if self.shape.translated(self.next_offset()).intersects(body) {
            return;
        }
        self.advance();
    }

    /// Collision rectangle at the current animated offset
    pub fn rect(&self) -> Rect {
        self.shape.translated(self.offset)
    }

    /// Anything short of fully retracted blocks movement
    pub fn is_solid(&self) -> bool {
        self.motion != WallMotion::Retracted
    }
}

/// Rate limit on lever toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeverCooldown {
    Ready,
    Cooling { remaining: u32 },
}

/// A player-operated switch, optionally linked to a movable wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lever {
    /// Top-left of the lever hit box
    pub position: Vec2,
    pub size: f32,
    /// Index of the linked movable wall
    pub wall: Option<usize>,
    /// Cooldown length applied after every toggle
    pub cooldown_ticks: u32,
    on: bool,
    cooldown: LeverCooldown,
}

impl Lever {
    pub fn new(position: Vec2, size: f32, wall: Option<usize>, cooldown_ticks: u32) -> Self {
        Self {
            position,
            size,
            wall,
            cooldown_ticks,
            on: false,
            cooldown: LeverCooldown::Ready,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.position, self.size)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn cooldown(&self) -> LeverCooldown {
        self.cooldown
    }

    pub fn cooldown_remaining(&self) -> u32 {
        match self.cooldown {
            LeverCooldown::Ready => 0,
            LeverCooldown::Cooling { remaining } => remaining,
        }
    }

    /// Count the cooldown down by one tick
    pub fn cool(&mut self) {
        if let LeverCooldown::Cooling { remaining } = self.cooldown {
            let remaining = remaining.saturating_sub(1);
            self.cooldown = if remaining == 0 {
                LeverCooldown::Ready
            } else {
                LeverCooldown::Cooling { remaining }
            };
        }
    }

    /// Flip the lever unless it is cooling down. Returns whether it flipped.
    ///
    /// The linked wall is flipped by `Fixtures::try_activate_lever`.
    pub fn try_activate(&mut self) -> bool {
        if self.cooldown != LeverCooldown::Ready {
            return false;
        }
        self.on = !self.on;
        self.cooldown = LeverCooldown::Cooling {
            remaining: self.cooldown_ticks,
        };
        true
    }
}

/// Pressure plate state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlateState {
    Idle,
    Pressed { remaining: u32 },
}

/// A floor plate held down by the player or any ghost
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressurePlate {
    pub rect: Rect,
    /// Ticks the plate stays pressed after the last touch
    pub duration: u32,
    /// Index of a movable wall held open while pressed
    pub wall: Option<usize>,
    state: PlateState,
}

impl PressurePlate {
    pub fn new(rect: Rect, duration: u32, wall: Option<usize>) -> Self {
        Self {
            rect,
            duration,
            wall,
            state: PlateState::Idle,
        }
    }

    pub fn state(&self) -> PlateState {
        self.state
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self.state, PlateState::Pressed { .. })
    }

    pub fn remaining(&self) -> u32 {
        match self.state {
            PlateState::Idle => 0,
            PlateState::Pressed { remaining } => remaining,
        }
    }

    /// Remaining press time as a fraction of `duration` (for gauges)
    pub fn charge(&self) -> f32 {
        if self.duration == 0 {
            return 0.0;
        }
        self.remaining() as f32 / self.duration as f32
    }

    /// Press (or re-press) the plate for a full `duration`
    pub fn touch(&mut self) {
        self.state = PlateState::Pressed {
            remaining: self.duration,
        };
    }

    /// Count the press down by one tick, releasing at zero
    pub fn decay(&mut self) {
        if let PlateState::Pressed { remaining } = self.state {
            let remaining = remaining.saturating_sub(1);
            self.state = if remaining == 0 {
                PlateState::Idle
            } else {
                PlateState::Pressed { remaining }
            };
        }
    }
}

/// All mutable fixtures of a level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Fixtures {
    pub walls: Vec<MovableWall>,
    pub levers: Vec<Lever>,
    pub plates: Vec<PressurePlate>,
}

impl Fixtures {
    /// First solid movable wall overlapping `rect`, if any
    pub fn blocking_wall(&self, rect: &Rect) -> Option<usize> {
        self.walls
            .iter()
            .position(|wall| wall.is_solid() && wall.rect().intersects(rect))
    }

    /// First solid movable wall that `to` overlaps more deeply than `from` did
    ///
    /// A body already caught inside a wall may still move, as long as the
    /// move does not take it deeper.
    pub fn blocking_wall_for_move(&self, from: &Rect, to: &Rect) -> Option<usize> {
        self.walls.iter().position(|wall| {
            let rect = wall.rect();
            wall.is_solid() && rect.overlap_area(to) > rect.overlap_area(from)
        })
    }

    /// Toggle lever `index` and its linked wall. Returns whether it toggled.
    pub fn try_activate_lever(&mut self, index: usize) -> bool {
        let Some(lever) = self.levers.get_mut(index) else {
            return false;
        };
        if !lever.try_activate() {
            return false;
        }
        if let Some(wall) = lever.wall.and_then(|w| self.walls.get_mut(w)) {
            wall.toggle();
        }
        true
    }

    pub fn cool_levers(&mut self) {
        for lever in &mut self.levers {
            lever.cool();
        }
    }

    pub fn decay_plates(&mut self) {
        for plate in &mut self.plates {
            plate.decay();
        }
    }

    /// Touch every plate overlapping `rect`. Returns how many were touched.
    pub fn touch_plates(&mut self, rect: &Rect) -> usize {
        let mut touched = 0;
        for plate in &mut self.plates {
            if plate.rect.intersects(rect) {
                plate.touch();
                touched += 1;
            }
        }
        touched
    }

    /// Retract plate-linked walls while their plate is pressed, place them otherwise
    /// Retract every plate-linked wall while any of its plates is pressed
    pub fn sync_plate_walls(&mut self) {
        for (index, wall) in self.walls.iter_mut().enumerate() {
            let mut linked = self
                .plates
                .iter()
                .filter(|plate| plate.wall == Some(index))
                .peekable();
            if linked.peek().is_none() {
                continue;
            }
            let held = linked.any(PressurePlate::is_pressed);
            wall.set_active(!held);
        }
    }

    /// Advance every moving wall, holding any that would close onto `body`
    pub fn animate_walls(&mut self, body: &Rect) {
        for wall in &mut self.walls {
            wall.advance_clear_of(body);
        }
    }
}
