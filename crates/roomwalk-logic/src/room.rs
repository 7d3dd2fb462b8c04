//! Pixel-space room snapshot handed to collision and rendering.
//!
//! A `Room` is always derived from a [`crate::config::RoomConfig`] at a
//! given viewport. It is read-only: edits go back through the inverse
//! transforms into the config and a fresh snapshot is built.

use serde::Serialize;

use crate::bounds::{BoundingBox, Direction};
use crate::config::RoomId;
use crate::constants::walls;

/// Which edge a wall is pinned to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WallKind {
    Top,
    Bottom,
    Left,
    Right,
    Custom,
}

impl WallKind {
    pub fn from_id(id: &str) -> Self {
        match id {
            walls::TOP => WallKind::Top,
            walls::BOTTOM => WallKind::Bottom,
            walls::LEFT => WallKind::Left,
            walls::RIGHT => WallKind::Right,
            _ => WallKind::Custom,
        }
    }

    pub fn is_edge(self) -> bool {
        self != WallKind::Custom
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wall {
    pub id: String,
    pub kind: WallKind,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Door {
    pub id: String,
    pub bounds: BoundingBox,
    pub orientation: Direction,
    pub leads_to: RoomId,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub bounds: BoundingBox,
    pub name: String,
    pub command: Option<String>,
    pub rotation: Option<f64>,
    pub menu_items: Vec<MenuItem>,
}

/// Popover entry. Positioned at (0, 0) relative to its popover, so its
/// bounds never take part in room-space collision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub bounds: BoundingBox,
    pub name: String,
    pub command: Option<String>,
    pub rotation: Option<f64>,
}

/// Snapshot of one room. Every list is in ascending id order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub walls: Vec<Wall>,
    pub doors: Vec<Door>,
    pub applications: Vec<Application>,
}

impl Room {
    pub fn wall(&self, id: &str) -> Option<&Wall> {
        self.walls.iter().find(|w| w.id == id)
    }

    pub fn door(&self, id: &str) -> Option<&Door> {
        self.doors.iter().find(|d| d.id == id)
    }

    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wall_kind_from_edge_ids() {
        assert_eq!(WallKind::from_id("top"), WallKind::Top);
        assert_eq!(WallKind::from_id("right"), WallKind::Right);
        assert_eq!(WallKind::from_id("counter"), WallKind::Custom);
        assert!(WallKind::Left.is_edge());
        assert!(!WallKind::Custom.is_edge());
    }
}
