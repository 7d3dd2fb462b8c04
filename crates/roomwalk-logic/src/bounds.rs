//! Pixel-space primitives: points, sizes, axis-aligned boxes, facings.
//!
//! Screen coordinates: origin at the top-left, y grows downward. A box's
//! `(x, y)` is its top-left corner.

use serde::{Deserialize, Serialize};

/// A position in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned box in pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box of `size` whose top-left corner sits at `pos`.
    pub fn at(pos: Point, size: Size) -> Self {
        Self::new(pos.x, pos.y, size.width, size.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: the left/top edges belong to the box, the
    /// right/bottom edges do not.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// True if `self` fully covers `other`.
    pub fn covers(&self, other: &BoundingBox) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// Facing of the actor and orientation of a door.
///
/// For a door the orientation names the viewport edge it sits on:
/// `Up` is the top wall, `Right` the right wall, and so on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The geometric opposite: up↔down, left↔right.
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Up/down doors run horizontally along the top/bottom wall.
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Facing implied by a movement delta. The vertical axis wins when
    /// both are non-zero; a zero delta has no facing.
    pub fn from_delta(dx: f64, dy: f64) -> Option<Self> {
        if dy < 0.0 {
            Some(Direction::Up)
        } else if dy > 0.0 {
            Some(Direction::Down)
        } else if dx < 0.0 {
            Some(Direction::Left)
        } else if dx > 0.0 {
            Some(Direction::Right)
        } else {
            None
        }
    }

    /// Movement delta for one step of `step` pixels in this direction.
    pub fn delta(self, step: f64) -> (f64, f64) {
        match self {
            Direction::Up => (0.0, -step),
            Direction::Down => (0.0, step),
            Direction::Left => (-step, 0.0),
            Direction::Right => (step, 0.0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
