//! Per-tick interaction resolution
//!
//! Blocking is plain overlap rejection: a move that ends inside a static wall
//! or a solid movable wall is undone by moving back the same way. There is no
//! minimum-translation push-out, so a diagonal move into a corner can keep
//! the displacement on one axis.

use super::fixtures::Fixtures;
use super::geometry::{Geometry, Rect};
use super::recorder::{ActionRecorder, Direction, Step};

/// What stopped a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker {
    /// Static wall index
    Wall(usize),
    /// Movable wall index
    MovableWall(usize),
}

/// Outcome of resolving one player move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Position at the start of the tick and after resolution
    pub step: Step,
    /// Obstacle that forced a revert, if any
    pub blocked_by: Option<Blocker>,
}

/// First obstacle stopping a move from `from` to `to`: static walls in level
/// order, then movable walls the move would push deeper into
pub fn find_blocker(
    from: &Rect,
    to: &Rect,
    geometry: &Geometry,
    fixtures: &Fixtures,
) -> Option<Blocker> {
    geometry
        .blocking_wall(to)
        .map(Blocker::Wall)
        .or_else(|| {
            fixtures
                .blocking_wall_for_move(from, to)
                .map(Blocker::MovableWall)
        })
}

/// Move the player and revert the move if it lands in an obstacle
///
/// Both the move and the revert go through the recorder, so a blocked move
/// leaves two log entries: the rejected position and the restored one.
pub fn move_player(
    recorder: &mut ActionRecorder,
    direction: Direction,
    geometry: &Geometry,
    fixtures: &Fixtures,
) -> MoveOutcome {
    let start = recorder.position();
    if direction.is_zero() {
        return MoveOutcome {
            step: Step {
                previous: start,
                current: start,
            },
            blocked_by: None,
        };
    }

    let from = recorder.rect();
    recorder.step(direction);
    let blocked_by = find_blocker(&from, &recorder.rect(), geometry, fixtures);
    if blocked_by.is_some() {
        recorder.step(direction.reversed());
    }

    MoveOutcome {
        step: Step {
            previous: start,
            current: recorder.position(),
        },
        blocked_by,
    }
}

/// Try every lever the player overlaps. Returns how many toggled.
pub fn toggle_levers(player: &Rect, fixtures: &mut Fixtures) -> usize {
    let mut toggled = 0;
    for index in 0..fixtures.levers.len() {
        if fixtures.levers[index].rect().intersects(player) && fixtures.try_activate_lever(index) {
            log::debug!("Lever {} toggled", index);
            toggled += 1;
        }
    }
    toggled
}

/// Touch every plate overlapping `body` (player or ghost). Returns how many.
pub fn press_plates(body: &Rect, fixtures: &mut Fixtures) -> usize {
    fixtures.touch_plates(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixtures::{Lever, MovableWall, PressurePlate};
    use glam::Vec2;

    fn geometry() -> Geometry {
        Geometry {
            arena: Rect::new(0.0, 0.0, 800.0, 600.0),
            walls: vec![Rect::new(100.0, 0.0, 20.0, 300.0)],
            goal: Rect::new(700.0, 500.0, 50.0, 50.0),
            start: Vec2::new(50.0, 50.0),
        }
    }

    #[test]
    fn test_free_move() {
        let geometry = geometry();
        let fixtures = Fixtures::default();
        let mut recorder = ActionRecorder::new(geometry.start, 20.0, 5.0, &geometry.arena);

        let outcome = move_player(&mut recorder, Direction::DOWN, &geometry, &fixtures);
        assert_eq!(outcome.blocked_by, None);
        assert!(outcome.step.displaced());
        assert_eq!(recorder.position(), Vec2::new(50.0, 55.0));
    }

    #[test]
    fn test_blocked_move_is_reverted() {
        let geometry = geometry();
        let fixtures = Fixtures::default();
        let mut recorder = ActionRecorder::new(Vec2::new(78.0, 50.0), 20.0, 5.0, &geometry.arena);

        let outcome = move_player(&mut recorder, Direction::RIGHT, &geometry, &fixtures);
        assert_eq!(outcome.blocked_by, Some(Blocker::Wall(0)));
        assert!(!outcome.step.displaced());
        assert_eq!(recorder.position(), Vec2::new(78.0, 50.0));
        // Rejected position and the revert are both recorded
        assert_eq!(
            recorder.log().entries(),
            &[Vec2::new(83.0, 50.0), Vec2::new(78.0, 50.0)]
        );
    }

    #[test]
    fn test_solid_movable_wall_blocks() {
        let geometry = geometry();
        let fixtures = Fixtures {
            walls: vec![MovableWall::new(
                Rect::new(40.0, 72.0, 40.0, 10.0),
                Vec2::new(0.0, -600.0),
                20.0,
                true,
            )],
            ..Default::default()
        };
        let mut recorder = ActionRecorder::new(geometry.start, 20.0, 5.0, &geometry.arena);

        let outcome = move_player(&mut recorder, Direction::DOWN, &geometry, &fixtures);
        assert_eq!(outcome.blocked_by, Some(Blocker::MovableWall(0)));
        assert_eq!(recorder.position(), geometry.start);
    }

    #[test]
    fn test_caught_player_can_step_out_of_movable_wall() {
        let geometry = geometry();
        let fixtures = Fixtures {
            walls: vec![MovableWall::new(
                Rect::new(60.0, 40.0, 30.0, 40.0),
                Vec2::new(0.0, -600.0),
                20.0,
                true,
            )],
            ..Default::default()
        };
        let mut recorder = ActionRecorder::new(geometry.start, 20.0, 5.0, &geometry.arena);

        let deeper = move_player(&mut recorder, Direction::RIGHT, &geometry, &fixtures);
        assert_eq!(deeper.blocked_by, Some(Blocker::MovableWall(0)));
        assert_eq!(recorder.position(), geometry.start);

        let out = move_player(&mut recorder, Direction::LEFT, &geometry, &fixtures);
        assert_eq!(out.blocked_by, None);
        assert_eq!(recorder.position(), Vec2::new(45.0, 50.0));
    }

    #[test]
    fn test_diagonal_revert_keeps_clamped_axis() {
        // Pinned against the left edge, moving down-left into a wall below:
        // the clamp eats the x motion, the revert then adds it back.
        let geometry = Geometry {
            walls: vec![Rect::new(0.0, 72.0, 100.0, 10.0)],
            ..geometry()
        };
        let fixtures = Fixtures::default();
        let mut recorder = ActionRecorder::new(Vec2::new(0.0, 50.0), 20.0, 5.0, &geometry.arena);

        let outcome = move_player(&mut recorder, Direction::new(-1, 1), &geometry, &fixtures);
        assert!(outcome.blocked_by.is_some());
        assert_eq!(recorder.position(), Vec2::new(5.0, 50.0));
    }

    #[test]
    fn test_toggle_levers_only_on_overlap() {
        let mut fixtures = Fixtures {
            levers: vec![
                Lever::new(Vec2::new(200.0, 200.0), 20.0, None, 30),
                Lever::new(Vec2::new(500.0, 200.0), 20.0, None, 30),
            ],
            ..Default::default()
        };
        let player = Rect::new(195.0, 195.0, 20.0, 20.0);
        assert_eq!(toggle_levers(&player, &mut fixtures), 1);
        assert!(fixtures.levers[0].is_on());
        assert!(!fixtures.levers[1].is_on());
        assert_eq!(toggle_levers(&player, &mut fixtures), 0);
    }

    #[test]
    fn test_press_multiple_plates_in_one_tick() {
        let mut fixtures = Fixtures {
            plates: vec![
                PressurePlate::new(Rect::new(0.0, 0.0, 30.0, 30.0), 10, None),
                PressurePlate::new(Rect::new(30.0, 0.0, 30.0, 30.0), 10, None),
            ],
            ..Default::default()
        };
        assert_eq!(press_plates(&Rect::new(20.0, 5.0, 20.0, 20.0), &mut fixtures), 2);
        assert!(fixtures.plates.iter().all(|p| p.is_pressed()));
    }
}
