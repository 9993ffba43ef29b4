//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. The update
//! order below is what makes a ghost's position depend only on its frozen log
//! and the number of ticks since the loop started.

use super::collision::{move_player, press_plates, toggle_levers};
use super::recorder::Direction;
use super::state::{GameEvent, GamePhase, GameState};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Movement direction, each axis in {-1, 0, 1}
    pub direction: Direction,
    /// End the current loop immediately
    pub reset: bool,
}

impl TickInput {
    pub fn moving(direction: Direction) -> Self {
        Self {
            direction,
            reset: false,
        }
    }

    pub fn reset() -> Self {
        Self {
            direction: Direction::NONE,
            reset: true,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.clear_events();
    state.time_ticks += 1;

    // Reset wins over everything, including a fade in progress
    if input.reset {
        state.restart_loop();
    }

    // Gameplay is frozen while fading; only wall animation keeps running
    if let GamePhase::Transitioning(_) = state.phase {
        state.advance_transition();
        let player = state.recorder.rect();
        state.fixtures.animate_walls(&player);
        return;
    }

    state.loop_ticks += 1;

    // Player movement
    state.fixtures.cool_levers();
    let outcome = move_player(
        &mut state.recorder,
        input.direction,
        &state.geometry,
        &state.fixtures,
    );
    if outcome.step.displaced() {
        state.emit(GameEvent::Moved);
    }

    // Levers react to the player only
    let player = state.recorder.rect();
    if toggle_levers(&player, &mut state.fixtures) > 0 {
        state.emit(GameEvent::LeverToggled);
    }

    // Plates: player first, then every ghost after it steps
    state.fixtures.decay_plates();
    press_plates(&player, &mut state.fixtures);

    let ghost_size = state.recorder.size();
    for ghost in &mut state.ghosts {
        ghost.advance();
        if let Some(body) = ghost.rect(ghost_size) {
            press_plates(&body, &mut state.fixtures);
        }
    }

    // Fixture animation
    state.fixtures.sync_plate_walls();
    state.fixtures.animate_walls(&player);

    if state.geometry.reaches_goal(&player) {
        state.begin_goal_transition();
    }
}
