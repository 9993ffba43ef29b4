//! Game state and loop lifecycle
//!
//! All state the simulation owns lives here. Collaborators read it through
//! accessors or a `Snapshot` and never write to it.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::fixtures::Fixtures;
use super::geometry::{Geometry, Rect};
use super::ghost::{Ghost, GhostId};
use super::recorder::ActionRecorder;
use crate::level::{LevelConfig, LevelError};

/// Direction of a screen fade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fade {
    /// Goal reached, fading to black; the loop ends when it completes
    Out,
    /// New loop started, fading back in
    In,
}

/// An in-progress fade, counted in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub fade: Fade,
    pub elapsed: u32,
    pub length: u32,
}

impl Transition {
    pub fn new(fade: Fade, length: u32) -> Self {
        Self {
            fade,
            elapsed: 0,
            length,
        }
    }

    /// Completion in 0-1
    pub fn progress(&self) -> f32 {
        if self.length == 0 {
            return 1.0;
        }
        (self.elapsed as f32 / self.length as f32).min(1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.length
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Input is consulted, interactions resolve
    Playing,
    /// Fading between loops; gameplay frozen, walls still animate
    Transitioning(Transition),
}

/// Discrete per-tick notification for audio/visual collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player was displaced this tick
    Moved,
    /// At least one lever toggled
    LeverToggled,
    /// The player touched the goal
    GoalReached,
    /// A loop ended and a new one began
    LoopRestarted,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Static level data
    pub geometry: Geometry,
    /// Live fixture state
    pub fixtures: Fixtures,
    /// Fixture layout restored at the start of every loop
    initial_fixtures: Fixtures,
    /// Player position and the current loop's action log
    pub(crate) recorder: ActionRecorder,
    /// Retained ghosts, oldest first
    pub(crate) ghosts: VecDeque<Ghost>,
    max_loops: usize,
    /// Completed loops
    pub loop_count: u32,
    /// Completed goal transitions
    pub goals_reached: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Ticks since the current loop started
    pub loop_ticks: u64,
    pub phase: GamePhase,
    transition_ticks: u32,
    /// Events raised during the last tick
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// Build a game from a level, rejecting invalid configurations
    pub fn new(config: LevelConfig) -> Result<Self, LevelError> {
        config.validate()?;

        let geometry = config.geometry();
        let fixtures = config.fixtures();
        let recorder = ActionRecorder::new(
            geometry.start,
            config.player_size,
            config.player_speed,
            &geometry.arena,
        );

        log::info!(
            "Level loaded: {} walls, {} movable walls, {} levers, {} plates, {} loops retained",
            geometry.walls.len(),
            fixtures.walls.len(),
            fixtures.levers.len(),
            fixtures.plates.len(),
            config.max_loops
        );

        Ok(Self {
            geometry,
            initial_fixtures: fixtures.clone(),
            fixtures,
            recorder,
            ghosts: VecDeque::with_capacity(config.max_loops + 1),
            max_loops: config.max_loops,
            loop_count: 0,
            goals_reached: 0,
            time_ticks: 0,
            loop_ticks: 0,
            phase: GamePhase::Playing,
            transition_ticks: config.transition_ticks,
            events: Vec::new(),
        })
    }

    pub fn player_position(&self) -> Vec2 {
        self.recorder.position()
    }

    pub fn player_size(&self) -> f32 {
        self.recorder.size()
    }

    pub fn player_rect(&self) -> Rect {
        self.recorder.rect()
    }

    pub fn recorder(&self) -> &ActionRecorder {
        &self.recorder
    }

    /// Retained ghosts, oldest first
    pub fn ghosts(&self) -> impl Iterator<Item = &Ghost> {
        self.ghosts.iter()
    }

    /// (identity, current position) of every ghost, oldest first
    pub fn ghost_positions(&self) -> impl Iterator<Item = (GhostId, Option<Vec2>)> + '_ {
        self.ghosts.iter().map(|g| (g.id, g.current_position()))
    }

    pub fn ghost_count(&self) -> usize {
        self.ghosts.len()
    }

    pub fn max_loops(&self) -> usize {
        self.max_loops
    }

    /// Fade completion, 0 while playing
    pub fn transition_progress(&self) -> f32 {
        match self.phase {
            GamePhase::Playing => 0.0,
            GamePhase::Transitioning(t) => t.progress(),
        }
    }

    /// Events raised during the last tick, in first-raised order
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub(crate) fn clear_events(&mut self) {
        self.events.clear();
    }

    /// Raise an event once per tick
    pub(crate) fn emit(&mut self, event: GameEvent) {
        if !self.events.contains(&event) {
            self.events.push(event);
        }
    }

    /// Freeze the current recording into a ghost and start a fresh loop
    pub fn end_loop(&mut self) {
        let log = self.recorder.take_log();
        if !log.is_empty() {
            let id = GhostId::new(self.loop_count + 1);
            log::debug!("Ghost #{} recorded ({} moves)", id.ordinal, log.len());
            self.ghosts.push_back(Ghost::new(id, log));
            while self.ghosts.len() > self.max_loops {
                if let Some(evicted) = self.ghosts.pop_front() {
                    log::debug!("Ghost #{} evicted", evicted.id.ordinal);
                }
            }
        }

        for ghost in &mut self.ghosts {
            ghost.rewind();
        }
        self.fixtures = self.initial_fixtures.clone();
        self.recorder.reset(self.geometry.start);

        self.loop_count += 1;
        self.loop_ticks = 0;
        self.emit(GameEvent::LoopRestarted);
        log::info!(
            "Loop {} started ({}/{} ghosts)",
            self.loop_count + 1,
            self.ghosts.len(),
            self.max_loops
        );
    }

    /// Explicit reset: end the loop now and drop any fade in progress
    pub fn restart_loop(&mut self) {
        self.end_loop();
        self.phase = GamePhase::Playing;
    }

    /// Goal reached: freeze gameplay and start fading out
    pub(crate) fn begin_goal_transition(&mut self) {
        self.goals_reached += 1;
        self.phase = GamePhase::Transitioning(Transition::new(Fade::Out, self.transition_ticks));
        self.emit(GameEvent::GoalReached);
        log::info!("Goal reached on loop {}", self.loop_count + 1);
    }

    /// Advance an in-progress fade by one tick
    pub(crate) fn advance_transition(&mut self) {
        let GamePhase::Transitioning(mut transition) = self.phase else {
            return;
        };
        transition.elapsed += 1;
        if !transition.is_complete() {
            self.phase = GamePhase::Transitioning(transition);
            return;
        }
        match transition.fade {
            Fade::Out => {
                self.end_loop();
                self.phase =
                    GamePhase::Transitioning(Transition::new(Fade::In, self.transition_ticks));
            }
            Fade::In => self.phase = GamePhase::Playing,
        }
    }
}
