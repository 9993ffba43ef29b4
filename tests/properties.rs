use glam::Vec2;
use proptest::prelude::*;
use time_loop::LevelConfig;
use time_loop::level::{LeverConfig, MovableWallConfig, PlateConfig};
use time_loop::sim::{
    ActionRecorder, Direction, GameEvent, GameState, Ghost, GhostId, Lever, MovableWall,
    PlateState, PressurePlate, Rect, TickInput, WallMotion, tick,
};

fn open_level() -> LevelConfig {
    LevelConfig {
        walls: Vec::new(),
        movable_walls: Vec::new(),
        levers: Vec::new(),
        plates: Vec::new(),
        ..LevelConfig::default()
    }
}

fn run(state: &mut GameState, input: TickInput, times: usize) {
    for _ in 0..times {
        tick(state, &input);
    }
}

fn ordinals(state: &GameState) -> Vec<u32> {
    state.ghosts().map(|g| g.id.ordinal).collect()
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (-1_i32..=1, -1_i32..=1, prop::bool::weighted(0.05)).prop_map(|(x, y, reset)| TickInput {
        direction: Direction::new(x, y),
        reset,
    })
}

#[test]
fn scenario_move_right_then_reset() {
    let mut state = GameState::new(open_level()).expect("valid level");
    run(&mut state, TickInput::moving(Direction::RIGHT), 10);
    assert_eq!(state.recorder().log().len(), 10);
    assert_eq!(state.player_position().x, 100.0);

    tick(&mut state, &TickInput::reset());
    let ghost = state.ghosts().next().expect("ghost recorded");
    assert_eq!(ghost.id.ordinal, 1);
    assert_eq!(ghost.log().len(), 10);
    assert_eq!(state.player_position(), Vec2::new(50.0, 50.0));
    assert!(state.recorder().log().is_empty());
    assert_eq!(state.loop_count, 1);
}

#[test]
fn scenario_fourth_loop_evicts_first_ghost() {
    let mut state = GameState::new(LevelConfig {
        max_loops: 3,
        ..open_level()
    })
    .expect("valid level");

    for _ in 0..4 {
        run(&mut state, TickInput::moving(Direction::DOWN), 3);
        tick(&mut state, &TickInput::reset());
    }
    assert_eq!(ordinals(&state), vec![2, 3, 4]);
}

#[test]
fn scenario_lever_toggles_once_per_cooldown() {
    let mut state = GameState::new(LevelConfig {
        movable_walls: vec![MovableWallConfig {
            rect: Rect::new(400.0, 400.0, 100.0, 20.0),
            active: true,
            retract_offset: None,
        }],
        levers: vec![LeverConfig {
            position: Vec2::new(55.0, 50.0),
            wall: Some(0),
        }],
        ..open_level()
    })
    .expect("valid level");

    tick(&mut state, &TickInput::default());
    assert_eq!(state.events(), &[GameEvent::LeverToggled]);
    assert!(state.fixtures.levers[0].is_on());
    assert!(!state.fixtures.walls[0].is_active());

    tick(&mut state, &TickInput::default());
    assert!(state.events().is_empty());
    assert!(state.fixtures.levers[0].is_on());
    assert!(!state.fixtures.walls[0].is_active());
}

#[test]
fn scenario_closing_wall_never_traps_player() {
    let mut state = GameState::new(LevelConfig {
        movable_walls: vec![MovableWallConfig {
            rect: Rect::new(100.0, 40.0, 40.0, 40.0),
            active: false,
            retract_offset: None,
        }],
        levers: vec![LeverConfig {
            position: Vec2::new(60.0, 50.0),
            wall: Some(0),
        }],
        wall_speed: 1.0,
        ..open_level()
    })
    .expect("valid level");

    // Pulling the lever on the way sends the wall down onto the player's path
    run(&mut state, TickInput::moving(Direction::RIGHT), 10);
    assert!(state.fixtures.walls[0].is_active());
    assert_eq!(state.player_position(), Vec2::new(100.0, 50.0));

    run(&mut state, TickInput::default(), 100);
    let wall = &state.fixtures.walls[0];
    assert_eq!(wall.motion(), WallMotion::Moving);
    assert!(!wall.rect().intersects(&state.player_rect()));
    assert!(state.fixtures.blocking_wall(&state.player_rect()).is_none());

    // The player is free to walk away, and the wall then finishes closing
    for _ in 0..40 {
        let before = state.player_position();
        tick(&mut state, &TickInput::moving(Direction::DOWN));
        assert_eq!(state.player_position(), before + Vec2::new(0.0, 5.0));
        assert!(state.fixtures.blocking_wall(&state.player_rect()).is_none());
    }
    run(&mut state, TickInput::default(), 10);
    assert_eq!(state.fixtures.walls[0].motion(), WallMotion::Placed);
    assert!(!state.fixtures.walls[0].rect().intersects(&state.player_rect()));
}

#[test]
fn scenario_ghost_presses_plate_alone() {
    let duration = 12;
    let mut state = GameState::new(LevelConfig {
        plates: vec![PlateConfig {
            rect: Rect::new(50.0, 80.0, 40.0, 40.0),
            duration,
            wall: None,
        }],
        ..open_level()
    })
    .expect("valid level");

    // Loop 1 ends standing on the plate
    run(&mut state, TickInput::moving(Direction::DOWN), 3);
    tick(&mut state, &TickInput::reset());
    assert_eq!(state.fixtures.plates[0].state(), PlateState::Idle);

    // Loop 2: the player idles at the start, away from the plate
    tick(&mut state, &TickInput::default());
    assert!(!state.player_rect().intersects(&state.fixtures.plates[0].rect));
    assert_eq!(
        state.fixtures.plates[0].state(),
        PlateState::Pressed { remaining: duration }
    );
}

#[test]
fn scenario_ghost_holds_gate_open() {
    let mut state = GameState::new(LevelConfig::default()).expect("valid level");

    run(&mut state, TickInput::moving(Direction::DOWN), 70);
    tick(&mut state, &TickInput::reset());
    assert_eq!(state.fixtures.walls[1].motion(), WallMotion::Placed);

    run(&mut state, TickInput::default(), 120);
    assert!(state.fixtures.plates[0].is_pressed());
    assert_eq!(state.fixtures.walls[1].motion(), WallMotion::Retracted);
}

#[test]
fn scenario_scripted_solution_reaches_goal() {
    let mut state = GameState::new(LevelConfig::default()).expect("valid level");

    run(&mut state, TickInput::moving(Direction::DOWN), 70);
    tick(&mut state, &TickInput::reset());
    run(&mut state, TickInput::moving(Direction::DOWN), 98);

    let mut reached = false;
    for _ in 0..134 {
        tick(&mut state, &TickInput::moving(Direction::RIGHT));
        reached |= state.events().contains(&GameEvent::GoalReached);
    }
    assert!(reached);
    assert_eq!(state.goals_reached, 1);
}

proptest! {
    #[test]
    fn property_replay_is_deterministic(
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let mut a = GameState::new(LevelConfig::default()).expect("valid level");
        let mut b = GameState::new(LevelConfig::default()).expect("valid level");
        for input in &inputs {
            tick(&mut a, input);
            tick(&mut b, input);
        }
        tick(&mut a, &TickInput::reset());
        tick(&mut b, &TickInput::reset());

        prop_assert_eq!(ordinals(&a), ordinals(&b));
        for (ga, gb) in a.ghosts().zip(b.ghosts()) {
            prop_assert_eq!(ga.log(), gb.log());
        }
        prop_assert_eq!(a.player_position(), b.player_position());
    }

    #[test]
    fn property_player_stays_in_arena_and_out_of_walls(
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let mut state = GameState::new(LevelConfig::default()).expect("valid level");
        let arena = state.geometry.arena;
        for input in &inputs {
            tick(&mut state, input);
            let player = state.player_rect();
            prop_assert!(arena.contains_rect(&player));
            prop_assert!(state.geometry.blocking_wall(&player).is_none());
            prop_assert!(state.fixtures.blocking_wall(&player).is_none());
        }
    }

    #[test]
    fn property_ghost_holds_final_position(moves in 1_usize..40, extra in 0_usize..100) {
        let arena = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut recorder = ActionRecorder::new(Vec2::new(50.0, 50.0), 20.0, 5.0, &arena);
        for _ in 0..moves {
            recorder.step(Direction::DOWN);
        }
        let last = recorder.log().last();
        let mut ghost = Ghost::new(GhostId::new(1), recorder.take_log());

        for _ in 0..(moves + extra) {
            ghost.advance();
        }
        prop_assert_eq!(ghost.cursor(), moves - 1);
        prop_assert_eq!(ghost.current_position(), last);
    }

    #[test]
    fn property_ghost_capacity(max_loops in 1_usize..6, loops in 1_u32..15) {
        let mut state = GameState::new(LevelConfig {
            max_loops,
            ..open_level()
        })
        .expect("valid level");

        for _ in 0..loops {
            tick(&mut state, &TickInput::moving(Direction::RIGHT));
            tick(&mut state, &TickInput::reset());
            prop_assert!(state.ghost_count() <= max_loops);
        }

        let kept = (loops as usize).min(max_loops) as u32;
        let expected: Vec<u32> = (loops - kept + 1..=loops).collect();
        prop_assert_eq!(ordinals(&state), expected);
    }

    #[test]
    fn property_plate_lapses_after_duration(duration in 1_u32..50, held in 0_u32..50) {
        let mut plate = PressurePlate::new(Rect::new(0.0, 0.0, 40.0, 40.0), duration, None);
        plate.touch();
        for _ in 0..held {
            plate.decay();
            plate.touch();
            prop_assert!(plate.is_pressed());
        }
        for _ in 0..duration - 1 {
            plate.decay();
            prop_assert!(plate.is_pressed());
        }
        plate.decay();
        prop_assert_eq!(plate.state(), PlateState::Idle);
    }

    #[test]
    fn property_lever_cooldown_is_exact(cooldown in 1_u32..60) {
        let mut lever = Lever::new(Vec2::ZERO, 20.0, None, cooldown);
        prop_assert!(lever.try_activate());
        for _ in 1..cooldown {
            lever.cool();
            prop_assert!(!lever.try_activate());
        }
        lever.cool();
        prop_assert!(lever.try_activate());
    }

    #[test]
    fn property_wall_never_teleports(
        speed in 1.0_f32..50.0,
        flips in prop::collection::vec(any::<bool>(), 1..120),
    ) {
        let mut wall = MovableWall::new(
            Rect::new(200.0, 200.0, 100.0, 20.0),
            Vec2::new(0.0, -220.0),
            speed,
            true,
        );
        for flip in flips {
            let before = wall.rect();
            if flip {
                wall.toggle();
            }
            prop_assert_eq!(wall.rect(), before);
            wall.advance();
            let moved = (wall.rect().min() - before.min()).length();
            prop_assert!(moved <= speed + 1e-3);
            prop_assert_eq!(wall.rect(), wall.shape.translated(wall.offset()));
        }
    }
}
