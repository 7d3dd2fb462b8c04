//! Stateless collision queries over a pixel-space room snapshot.
//!
//! Discrete, point-in-time AABB tests only: a step is checked at its
//! destination, never along the way, so a large delta can tunnel through a
//! thin wall. Callers move in fixed small steps. The engine never pushes an
//! already-overlapping actor out; only commit positions that pass.
//!
//! Every query is total. Empty slices mean "no collision", and NaN geometry
//! fails every comparison and so never collides.

use crate::bounds::{BoundingBox, Point, Size};
use crate::room::{Application, Door, Room, Wall};

/// Strict overlap on all four half-planes. Boxes that only share an edge
/// do not overlap.
pub fn aabb_overlap(a: &BoundingBox, b: &BoundingBox) -> bool {
    a.x < b.right() && b.x < a.right() && a.y < b.bottom() && b.y < a.bottom()
}

/// True if the actor box at `pos` overlaps any wall.
pub fn wall_blocks(pos: Point, actor: Size, walls: &[Wall]) -> bool {
    let actor_box = BoundingBox::at(pos, actor);
    walls.iter().any(|w| aabb_overlap(&actor_box, &w.bounds))
}

/// First door (in snapshot order) overlapping the actor box at `pos`.
pub fn door_at<'a>(pos: Point, actor: Size, doors: &'a [Door]) -> Option<&'a Door> {
    let actor_box = BoundingBox::at(pos, actor);
    doors.iter().find(|d| aabb_overlap(&actor_box, &d.bounds))
}

/// First application (in snapshot order) whose center lies within half the
/// combined size of the actor's center on both axes.
///
/// The bound is inclusive, unlike [`aabb_overlap`]: an actor standing flush
/// against an icon's edge still picks it up.
pub fn app_near<'a>(pos: Point, actor: Size, apps: &'a [Application]) -> Option<&'a Application> {
    let center = BoundingBox::at(pos, actor).center();
    apps.iter().find(|app| {
        let app_center = app.bounds.center();
        (center.x - app_center.x).abs() <= (actor.width + app.bounds.width) / 2.0
            && (center.y - app_center.y).abs() <= (actor.height + app.bounds.height) / 2.0
    })
}

/// Result of [`combined_query`]. `can_move` only reflects walls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionReport<'a> {
    pub can_move: bool,
    pub door: Option<&'a Door>,
    pub application: Option<&'a Application>,
}

/// Wall, door and application checks at one candidate position.
pub fn combined_query<'a>(
    pos: Point,
    actor: Size,
    walls: &[Wall],
    doors: &'a [Door],
    apps: &'a [Application],
) -> CollisionReport<'a> {
    CollisionReport {
        can_move: !wall_blocks(pos, actor, walls),
        door: door_at(pos, actor, doors),
        application: app_near(pos, actor, apps),
    }
}

/// [`combined_query`] against a whole room snapshot.
pub fn query_room(pos: Point, actor: Size, room: &Room) -> CollisionReport<'_> {
    combined_query(pos, actor, &room.walls, &room.doors, &room.applications)
}

/// What a pointer hit, topmost first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit<'a> {
    Application(&'a Application),
    Door(&'a Door),
    Wall(&'a Wall),
}

impl Hit<'_> {
    pub fn id(&self) -> &str {
        match self {
            Hit::Application(a) => &a.id,
            Hit::Door(d) => &d.id,
            Hit::Wall(w) => &w.id,
        }
    }
}

/// Pointer hit-test in render order: applications, then doors, then walls.
pub fn point_query<'a>(
    point: Point,
    walls: &'a [Wall],
    doors: &'a [Door],
    apps: &'a [Application],
) -> Option<Hit<'a>> {
    if let Some(app) = apps.iter().find(|a| a.bounds.contains_point(point)) {
        return Some(Hit::Application(app));
    }
    if let Some(door) = doors.iter().find(|d| d.bounds.contains_point(point)) {
        return Some(Hit::Door(door));
    }
    walls
        .iter()
        .find(|w| w.bounds.contains_point(point))
        .map(Hit::Wall)
}
