//! Time Loop headless driver
//!
//! Runs a scripted session at the fixed tick rate without a window:
//! loop 1 parks a ghost on the pressure plate, loop 2 walks the bottom
//! corridor the plate holds open and reaches the goal.
//!
//! Usage: `time-loop [LEVEL.json] [SOUNDS_DIR]`

use std::process::ExitCode;

use time_loop::LevelConfig;
use time_loop::audio::SoundBank;
use time_loop::consts::TICK_RATE;
use time_loop::sim::{Direction, GamePhase, GameState, Snapshot, TickInput, tick};

/// (input, repeat count)
fn script() -> Vec<(TickInput, u32)> {
    vec![
        // Loop 1: walk onto the plate and end the loop there
        (TickInput::moving(Direction::DOWN), 70),
        (TickInput::reset(), 1),
        // Loop 2: down the left column, then along the bottom corridor
        (TickInput::moving(Direction::DOWN), 98),
        (TickInput::moving(Direction::RIGHT), 134),
    ]
}

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let level = match args.next() {
        Some(path) => match LevelConfig::load(&path) {
            Ok(level) => level,
            Err(e) => {
                log::error!("Could not load level {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => LevelConfig::default(),
    };
    let sounds = args.next().map(SoundBank::load).unwrap_or_default();

    let mut state = match GameState::new(level) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid level: {}", e);
            return ExitCode::FAILURE;
        }
    };

    log::info!("Time Loop (headless) starting at {} Hz", TICK_RATE);

    let run = |state: &mut GameState, input: &TickInput| {
        tick(state, input);
        for event in state.events() {
            log::debug!("tick {}: {:?}", state.time_ticks, event);
        }
        for request in sounds.requests(state.events()) {
            log::trace!("play {} at {:.2}", request.path.display(), request.volume);
        }
    };

    for (input, repeat) in script() {
        for _ in 0..repeat {
            run(&mut state, &input);
        }
    }

    // Let any goal fade play out
    let mut idle_budget = 4 * TICK_RATE;
    while matches!(state.phase, GamePhase::Transitioning(_)) && idle_budget > 0 {
        run(&mut state, &TickInput::default());
        idle_budget -= 1;
    }

    log::info!(
        "Finished after {} ticks: loop {}, {} goal(s) reached, {}/{} ghosts",
        state.time_ticks,
        state.loop_count + 1,
        state.goals_reached,
        state.ghost_count(),
        state.max_loops()
    );

    match serde_json::to_string_pretty(&Snapshot::capture(&state)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Could not serialize snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
