//! Door traversal: destination room, reciprocal door, re-entry point.
//!
//! Resolution is pure: [`resolve_traversal`] reads the config and returns
//! everything the session needs to switch rooms in one step, or an error
//! that leaves the session untouched.
//!
//! Algorithm:
//! 1. Look up the source door and its `leads_to` room
//! 2. Convert the destination room at the current viewport
//! 3. Find the reciprocal door: leads back to the source room AND faces
//!    the opposite way (first in id order)
//! 4. Place the actor just inside that door, or at the viewport center if
//!    the destination has no reciprocal door

use crate::bounds::{Direction, Point, Size};
use crate::config::{RoomId, WorldConfig};
use crate::error::WorldError;
use crate::room::{Door, Room};
use crate::transform::{door_to_pixels, room_to_pixels, Viewport};

/// A resolved door crossing, ready to commit.
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal {
    pub room_id: RoomId,
    pub room: Room,
    pub position: Point,
    /// Door the actor re-enters through; `None` when the center fallback
    /// was used.
    pub reciprocal: Option<String>,
}

/// Destination door that leads back to `source_room_id` and faces the
/// opposite way from `source_door`.
pub fn find_reciprocal_door<'a>(
    source_room_id: &str,
    source_door: &Door,
    dest_doors: &'a [Door],
) -> Option<&'a Door> {
    let wanted = source_door.orientation.opposite();
    dest_doors
        .iter()
        .find(|d| d.leads_to == source_room_id && d.orientation == wanted)
}

/// Top-left actor position just outside `door`, `offset` pixels away from
/// its wall and centered on its long axis.
pub fn entry_position(door: &Door, actor: Size, offset: f64) -> Point {
    let b = &door.bounds;
    let center = b.center();
    match door.orientation {
        Direction::Up => Point::new(center.x - actor.width / 2.0, b.bottom() + offset),
        Direction::Down => Point::new(center.x - actor.width / 2.0, b.y - actor.height - offset),
        Direction::Left => Point::new(b.right() + offset, center.y - actor.height / 2.0),
        Direction::Right => Point::new(b.x - actor.width - offset, center.y - actor.height / 2.0),
    }
}

/// Actor centered in the viewport.
pub fn fallback_position(viewport: &Viewport, actor: Size) -> Point {
    let c = viewport.center();
    Point::new(c.x - actor.width / 2.0, c.y - actor.height / 2.0)
}

/// Resolve crossing `door_id` out of `source_room_id`.
///
/// Fails only on a missing source room, door or destination room; a missing
/// reciprocal door falls back to the viewport center.
pub fn resolve_traversal(
    config: &WorldConfig,
    source_room_id: &str,
    door_id: &str,
    viewport: &Viewport,
    actor: Size,
    offset: f64,
) -> Result<Traversal, WorldError> {
    let source = config
        .room(source_room_id)
        .ok_or_else(|| WorldError::UnknownRoom(source_room_id.to_string()))?;
    let door_cfg = source
        .doors
        .get(door_id)
        .ok_or_else(|| WorldError::UnknownDoor {
            room: source_room_id.to_string(),
            door: door_id.to_string(),
        })?;
    let source_door = door_to_pixels(door_id, door_cfg, viewport);

    let dest_id = &source_door.leads_to;
    let dest_cfg = config
        .room(dest_id)
        .ok_or_else(|| WorldError::UnknownRoom(dest_id.clone()))?;
    let room = room_to_pixels(dest_id, dest_cfg, viewport);

    let (position, reciprocal) =
        match find_reciprocal_door(source_room_id, &source_door, &room.doors) {
            Some(door) => (entry_position(door, actor, offset), Some(door.id.clone())),
            None => {
                log::warn!(
                    "No reciprocal door in '{}' for '{}' → '{}'; entering at center",
                    dest_id,
                    source_room_id,
                    door_id
                );
                (fallback_position(viewport, actor), None)
            }
        };

    Ok(Traversal {
        room_id: dest_id.clone(),
        room,
        position,
        reciprocal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::config::{DoorConfig, RoomConfig};
    use crate::transform::compute_viewport;

    const ACTOR: Size = Size {
        width: 32.0,
        height: 32.0,
    };

    fn vp() -> Viewport {
        compute_viewport(1000.0, 800.0, 7.0)
    }

    fn door_cfg(x: f64, y: f64, orientation: Direction, leads_to: &str) -> DoorConfig {
        DoorConfig {
            x,
            y,
            width: None,
            height: None,
            orientation,
            leads_to: leads_to.into(),
        }
    }

    fn make_door(id: &str, orientation: Direction, leads_to: &str) -> Door {
        Door {
            id: id.into(),
            bounds: BoundingBox::new(100.0, 200.0, 60.0, 40.0),
            orientation,
            leads_to: leads_to.into(),
        }
    }

    /// Rooms A and B joined by a right door in A and a left door in B.
    fn two_rooms() -> WorldConfig {
        let mut a = RoomConfig::enclosed(7.0);
        a.insert_door("d1", door_cfg(90.0, 40.0, Direction::Right, "B"));
        let mut b = RoomConfig::enclosed(7.0);
        b.insert_door("d2", door_cfg(0.0, 40.0, Direction::Left, "A"));
        let mut world = WorldConfig::default();
        world.rooms.clear();
        world.insert_room("A", a);
        world.insert_room("B", b);
        world.start_room = "A".into();
        world
    }

    #[test]
    fn reciprocal_needs_both_target_and_opposite_orientation() {
        let source = make_door("s", Direction::Right, "B");
        let dest = vec![
            make_door("a", Direction::Left, "C"),  // wrong target
            make_door("b", Direction::Right, "A"), // wrong orientation
            make_door("c", Direction::Left, "A"),
            make_door("d", Direction::Left, "A"),
        ];
        let found = find_reciprocal_door("A", &source, &dest).unwrap();
        assert_eq!(found.id, "c", "first match in order wins");

        assert!(find_reciprocal_door("A", &source, &dest[..2]).is_none());
        assert!(find_reciprocal_door("A", &source, &[]).is_none());
    }

    #[test]
    fn entry_positions_sit_outside_each_wall() {
        // door box (100,200) 60×40, center (130,220)
        let up = entry_position(&make_door("u", Direction::Up, "x"), ACTOR, 15.0);
        assert_eq!(up, Point::new(114.0, 255.0));
        let down = entry_position(&make_door("d", Direction::Down, "x"), ACTOR, 15.0);
        assert_eq!(down, Point::new(114.0, 153.0));
        let left = entry_position(&make_door("l", Direction::Left, "x"), ACTOR, 15.0);
        assert_eq!(left, Point::new(175.0, 204.0));
        let right = entry_position(&make_door("r", Direction::Right, "x"), ACTOR, 15.0);
        assert_eq!(right, Point::new(53.0, 204.0));
    }

    #[test]
    fn traversal_enters_right_of_reciprocal_left_door() {
        let world = two_rooms();
        let t = resolve_traversal(&world, "A", "d1", &vp(), ACTOR, 15.0).unwrap();
        assert_eq!(t.room_id, "B");
        assert_eq!(t.reciprocal.as_deref(), Some("d2"));

        let d2 = t.room.door("d2").unwrap();
        // immediately right of D2, vertically centered on it
        assert_eq!(t.position.x, d2.bounds.right() + 15.0);
        let actor_center_y = t.position.y + ACTOR.height / 2.0;
        assert!((actor_center_y - d2.bounds.center().y).abs() < 1e-9);
    }

    #[test]
    fn missing_reciprocal_falls_back_to_center() {
        let mut world = two_rooms();
        world.room_mut("B").unwrap().remove_door("d2");
        let t = resolve_traversal(&world, "A", "d1", &vp(), ACTOR, 15.0).unwrap();
        assert_eq!(t.room_id, "B");
        assert_eq!(t.reciprocal, None);
        assert_eq!(t.position, Point::new(484.0, 384.0));
    }

    #[test]
    fn self_loop_respawns_at_opposite_door() {
        let mut room = RoomConfig::enclosed(7.0);
        room.insert_door("loop_out", door_cfg(0.0, 30.0, Direction::Right, "A"));
        room.insert_door("loop_in", door_cfg(0.0, 60.0, Direction::Left, "A"));
        let mut world = WorldConfig::default();
        world.rooms.clear();
        world.insert_room("A", room);
        world.start_room = "A".into();

        let t = resolve_traversal(&world, "A", "loop_out", &vp(), ACTOR, 15.0).unwrap();
        assert_eq!(t.room_id, "A");
        assert_eq!(t.reciprocal.as_deref(), Some("loop_in"));
        let door = t.room.door("loop_in").unwrap();
        assert_eq!(t.position, entry_position(door, ACTOR, 15.0));
    }

    #[test]
    fn unknown_ids_are_errors() {
        let mut world = two_rooms();
        let err = resolve_traversal(&world, "Z", "d1", &vp(), ACTOR, 15.0).unwrap_err();
        assert!(matches!(err, WorldError::UnknownRoom(ref r) if r == "Z"));

        let err = resolve_traversal(&world, "A", "nope", &vp(), ACTOR, 15.0).unwrap_err();
        assert!(matches!(err, WorldError::UnknownDoor { .. }));

        world.rooms.remove("B");
        let err = resolve_traversal(&world, "A", "d1", &vp(), ACTOR, 15.0).unwrap_err();
        assert!(matches!(err, WorldError::UnknownRoom(ref r) if r == "B"));
    }
}
