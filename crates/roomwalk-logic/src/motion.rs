//! Actor motion: facing, walk-cycle frames, collision-gated steps.
//!
//! Algorithm for one step:
//! 1. Candidate = current position + (dx, dy); facing from the delta
//!    (vertical axis wins, zero delta keeps the current facing)
//! 2. Run the combined collision query at the candidate
//! 3. Door overlap → report contact, commit nothing (the session traverses)
//! 4. Wall overlap → blocked, commit nothing
//! 5. Otherwise commit position and facing; the frame advances only when
//!    the facing is unchanged, and resets to 0 on a turn

use serde::Serialize;

use crate::bounds::{Direction, Point, Size};
use crate::collision::query_room;
use crate::config::{ActorConfig, RoomId};
use crate::room::Room;

/// Position, facing and walk-cycle state of the actor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorState {
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub frame: u32,
    pub is_moving: bool,
}

impl ActorState {
    pub fn from_config(config: &ActorConfig) -> Self {
        Self {
            x: config.x,
            y: config.y,
            direction: config.direction,
            frame: 0,
            is_moving: false,
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Outcome of a single controller step, before any room change.
#[derive(Debug, Clone, PartialEq)]
pub enum MotionStep {
    /// Position and facing committed.
    Moved,
    /// A wall is in the way; nothing changed.
    Blocked,
    /// The candidate box touched a door; nothing changed yet.
    DoorContact { door_id: String, direction: Direction },
}

/// Outcome of an attempted move as seen by presentation.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveResult {
    /// Stayed in the same room at a new position.
    Moved { nearby_application: Option<String> },
    /// Hit a wall, or the door led nowhere; actor unchanged.
    Blocked,
    /// Walked through a door into `room_id` (possibly the same room).
    Transitioned { room_id: RoomId },
}

/// Next walk-cycle frame: advance when still facing the same way, else
/// restart the cycle.
pub fn next_frame(previous: Direction, next: Direction, frame: u32, total_frames: u32) -> u32 {
    if previous == next {
        let total = total_frames.max(1);
        (frame % total + 1) % total
    } else {
        0
    }
}

/// Sole owner of the actor state. All mutations go through here.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionController {
    state: ActorState,
    size: Size,
    total_frames: u32,
}

impl MotionController {
    pub fn new(state: ActorState, size: Size, total_frames: u32) -> Self {
        Self {
            state,
            size,
            total_frames: total_frames.max(1),
        }
    }

    pub fn from_config(config: &ActorConfig) -> Self {
        Self::new(
            ActorState::from_config(config),
            config.size(),
            config.total_frames,
        )
    }

    pub fn state(&self) -> &ActorState {
        &self.state
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn total_frames(&self) -> u32 {
        self.total_frames
    }

    /// Try to move by `(dx, dy)` inside `room`.
    pub fn attempt_move(&mut self, dx: f64, dy: f64, room: &Room) -> MotionStep {
        let direction = Direction::from_delta(dx, dy).unwrap_or(self.state.direction);
        let candidate = self.state.position().offset(dx, dy);
        let report = query_room(candidate, self.size, room);

        if let Some(door) = report.door {
            return MotionStep::DoorContact {
                door_id: door.id.clone(),
                direction,
            };
        }
        if !report.can_move {
            log::debug!(
                "Blocked in '{}' at ({:.1},{:.1}) facing {}",
                room.id,
                candidate.x,
                candidate.y,
                direction
            );
            return MotionStep::Blocked;
        }

        self.state.frame = next_frame(
            self.state.direction,
            direction,
            self.state.frame,
            self.total_frames,
        );
        self.state.x = candidate.x;
        self.state.y = candidate.y;
        self.state.direction = direction;
        self.state.is_moving = true;
        MotionStep::Moved
    }

    /// Turn in place; restarts the walk cycle.
    pub fn set_direction(&mut self, direction: Direction) {
        self.state.direction = direction;
        self.state.frame = 0;
    }

    /// Clear the moving flag only.
    pub fn stop_moving(&mut self) {
        self.state.is_moving = false;
    }

    /// Re-spawn at `position` after a room change.
    pub fn enter_at(&mut self, position: Point, direction: Direction) {
        self.state.x = position.x;
        self.state.y = position.y;
        self.state.direction = direction;
        self.state.frame = 0;
        self.state.is_moving = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::room::{Door, Wall, WallKind};

    fn empty_room() -> Room {
        Room {
            id: "r".into(),
            walls: vec![],
            doors: vec![],
            applications: vec![],
        }
    }

    fn wall(x: f64, y: f64, w: f64, h: f64) -> Wall {
        Wall {
            id: format!("w{x}_{y}"),
            kind: WallKind::Custom,
            bounds: BoundingBox::new(x, y, w, h),
        }
    }

    fn controller_at(x: f64, y: f64) -> MotionController {
        let state = ActorState {
            x,
            y,
            direction: Direction::Down,
            frame: 0,
            is_moving: false,
        };
        MotionController::new(state, Size::new(32.0, 32.0), 4)
    }

    // --- Free movement ---

    #[test]
    fn free_move_commits_position_and_facing() {
        let mut c = controller_at(100.0, 100.0);
        let step = c.attempt_move(10.0, 0.0, &empty_room());
        assert_eq!(step, MotionStep::Moved);
        let s = c.state();
        assert_eq!((s.x, s.y), (110.0, 100.0));
        assert_eq!(s.direction, Direction::Right);
        assert!(s.is_moving);
    }

    #[test]
    fn frames_advance_while_facing_holds() {
        let mut c = controller_at(100.0, 100.0);
        let room = empty_room();
        c.attempt_move(0.0, 10.0, &room); // already facing down
        assert_eq!(c.state().frame, 1);
        c.attempt_move(0.0, 10.0, &room);
        assert_eq!(c.state().frame, 2);
        c.attempt_move(0.0, 10.0, &room);
        c.attempt_move(0.0, 10.0, &room);
        assert_eq!(c.state().frame, 0, "wraps at total_frames");
    }

    #[test]
    fn turning_resets_frame() {
        let mut c = controller_at(100.0, 100.0);
        let room = empty_room();
        c.attempt_move(0.0, 10.0, &room);
        c.attempt_move(0.0, 10.0, &room);
        assert_eq!(c.state().frame, 2);
        c.attempt_move(-10.0, 0.0, &room);
        assert_eq!(c.state().frame, 0);
        assert_eq!(c.state().direction, Direction::Left);
        c.attempt_move(-10.0, 0.0, &room);
        assert_eq!(c.state().frame, 1);
    }

    #[test]
    fn diagonal_faces_vertically() {
        let mut c = controller_at(100.0, 100.0);
        c.attempt_move(10.0, -10.0, &empty_room());
        assert_eq!(c.state().direction, Direction::Up);
        assert_eq!(c.state().position(), Point::new(110.0, 90.0));
    }

    #[test]
    fn zero_delta_keeps_facing() {
        let mut c = controller_at(100.0, 100.0);
        c.set_direction(Direction::Left);
        c.attempt_move(0.0, 0.0, &empty_room());
        assert_eq!(c.state().direction, Direction::Left);
        assert_eq!(c.state().frame, 1);
    }

    // --- Walls ---

    #[test]
    fn covering_wall_never_moves_actor() {
        let room = Room {
            walls: vec![wall(-1000.0, -1000.0, 3000.0, 3000.0)],
            ..empty_room()
        };
        let mut c = controller_at(100.0, 100.0);
        let before = *c.state();
        let deltas = [
            (10.0, 0.0),
            (-10.0, 0.0),
            (0.0, 10.0),
            (0.0, -10.0),
            (3.0, 7.0),
            (0.0, 0.0),
        ];
        for (dx, dy) in deltas {
            assert_eq!(c.attempt_move(dx, dy, &room), MotionStep::Blocked);
            assert_eq!(*c.state(), before);
        }
    }

    #[test]
    fn wall_in_path_blocks_but_other_ways_are_free() {
        // wall immediately right of the actor box
        let room = Room {
            walls: vec![wall(132.0, 0.0, 20.0, 500.0)],
            ..empty_room()
        };
        let mut c = controller_at(100.0, 100.0);
        assert_eq!(c.attempt_move(5.0, 0.0, &room), MotionStep::Blocked);
        assert_eq!(c.state().x, 100.0);
        assert_eq!(c.attempt_move(0.0, 5.0, &room), MotionStep::Moved);
    }

    // --- Doors ---

    #[test]
    fn door_contact_commits_nothing() {
        let room = Room {
            walls: vec![wall(132.0, 0.0, 20.0, 500.0)],
            doors: vec![Door {
                id: "east".into(),
                bounds: BoundingBox::new(132.0, 90.0, 20.0, 60.0),
                orientation: Direction::Right,
                leads_to: "other".into(),
            }],
            ..empty_room()
        };
        let mut c = controller_at(100.0, 100.0);
        let before = *c.state();
        let step = c.attempt_move(5.0, 0.0, &room);
        assert_eq!(
            step,
            MotionStep::DoorContact {
                door_id: "east".into(),
                direction: Direction::Right
            }
        );
        assert_eq!(*c.state(), before);
    }

    // --- Direct state changes ---

    #[test]
    fn set_direction_and_stop_moving() {
        let mut c = controller_at(100.0, 100.0);
        let room = empty_room();
        c.attempt_move(0.0, 10.0, &room);
        c.attempt_move(0.0, 10.0, &room);
        c.set_direction(Direction::Up);
        assert_eq!(c.state().frame, 0);
        assert_eq!(c.state().direction, Direction::Up);
        assert!(c.state().is_moving);

        c.attempt_move(0.0, -10.0, &room);
        let before = *c.state();
        c.stop_moving();
        let after = *c.state();
        assert!(!after.is_moving);
        assert_eq!(
            (after.x, after.y, after.direction, after.frame),
            (before.x, before.y, before.direction, before.frame)
        );
    }

    #[test]
    fn zero_total_frames_is_clamped() {
        assert_eq!(next_frame(Direction::Up, Direction::Up, 0, 0), 0);
        let c = MotionController::new(controller_at(0.0, 0.0).state, Size::new(1.0, 1.0), 0);
        assert_eq!(c.total_frames(), 1);
    }

    #[test]
    fn out_of_range_frame_wraps_without_overflow() {
        assert_eq!(next_frame(Direction::Down, Direction::Down, u32::MAX, 4), 0);
        assert_eq!(next_frame(Direction::Down, Direction::Down, 6, 4), 3);

        let mut c = controller_at(100.0, 100.0);
        c.state.frame = u32::MAX;
        assert_eq!(c.attempt_move(0.0, 10.0, &empty_room()), MotionStep::Moved);
        assert!(c.state().frame < c.total_frames());
    }

    #[test]
    fn enter_at_resets_cycle() {
        let mut c = controller_at(100.0, 100.0);
        c.attempt_move(0.0, 10.0, &empty_room());
        c.enter_at(Point::new(5.0, 6.0), Direction::Left);
        let s = c.state();
        assert_eq!(s.position(), Point::new(5.0, 6.0));
        assert_eq!((s.direction, s.frame, s.is_moving), (Direction::Left, 0, true));
    }
}
