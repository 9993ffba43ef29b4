//! Read-only view of the simulation for rendering, audio and UI
//!
//! Built fresh after each tick. Owns its data so a collaborator can keep it
//! around (or serialize it) without borrowing the game state.

use glam::Vec2;
use serde::Serialize;

use super::fixtures::{LeverCooldown, PlateState, WallMotion};
use super::geometry::Rect;
use super::ghost::GhostId;
use super::state::{GameEvent, GamePhase, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct GhostView {
    pub id: GhostId,
    /// `None` when the recording is empty
    pub position: Option<Vec2>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MovableWallView {
    /// Rectangle at the current animated offset
    pub rect: Rect,
    pub motion: WallMotion,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct LeverView {
    pub rect: Rect,
    pub on: bool,
    pub cooldown: LeverCooldown,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlateView {
    pub rect: Rect,
    pub state: PlateState,
    /// Remaining press time over duration, 0-1
    pub charge: f32,
}

/// Everything a collaborator may look at after a tick
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time_ticks: u64,
    pub player_position: Vec2,
    pub player_size: f32,
    /// Oldest first
    pub ghosts: Vec<GhostView>,
    pub walls: Vec<Rect>,
    pub goal: Rect,
    pub movable_walls: Vec<MovableWallView>,
    pub levers: Vec<LeverView>,
    pub plates: Vec<PlateView>,
    pub loop_count: u32,
    pub ghost_count: usize,
    pub max_loops: usize,
    pub phase: GamePhase,
    pub transition_progress: f32,
    pub events: Vec<GameEvent>,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            time_ticks: state.time_ticks,
            player_position: state.player_position(),
            player_size: state.player_size(),
            ghosts: state
                .ghost_positions()
                .map(|(id, position)| GhostView { id, position })
                .collect(),
            walls: state.geometry.walls.clone(),
            goal: state.geometry.goal,
            movable_walls: state
                .fixtures
                .walls
                .iter()
                .map(|w| MovableWallView {
                    rect: w.rect(),
                    motion: w.motion(),
                    active: w.is_active(),
                })
                .collect(),
            levers: state
                .fixtures
                .levers
                .iter()
                .map(|l| LeverView {
                    rect: l.rect(),
                    on: l.is_on(),
                    cooldown: l.cooldown(),
                })
                .collect(),
            plates: state
                .fixtures
                .plates
                .iter()
                .map(|p| PlateView {
                    rect: p.rect,
                    state: p.state(),
                    charge: p.charge(),
                })
                .collect(),
            loop_count: state.loop_count,
            ghost_count: state.ghost_count(),
            max_loops: state.max_loops(),
            phase: state.phase,
            transition_progress: state.transition_progress(),
            events: state.events().to_vec(),
        }
    }

    /// Loop number shown to the player (1-based)
    pub fn loop_number(&self) -> u32 {
        self.loop_count + 1
    }
}
