//! Percent-space world configuration: the persisted room graph.
//!
//! This is the only authoritative geometry. Positions and sizes are
//! percentages of the viewport (walls, doors, application positions) or of
//! the wall thickness (application sizes). Pixel views are derived from it by
//! [`crate::transform`] and never written back except through the inverse
//! transforms.
//!
//! ```
//! use roomwalk_logic::config::WorldConfig;
//!
//! let world = WorldConfig::default();
//! let json = world.to_json_pretty().unwrap();
//! let back = WorldConfig::from_json(&json).unwrap();
//! assert_eq!(world, back);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::bounds::{Direction, Size};
use crate::constants::{actor, layout, walls};
use crate::error::WorldError;

pub type RoomId = String;

/// The whole persisted world: start room, wall sizing, actor and rooms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    pub start_room: RoomId,
    /// Wall thickness as a percent of each viewport dimension.
    #[serde(default = "default_wall_percent")]
    pub wall_percent: f64,
    #[serde(default)]
    pub actor: ActorConfig,
    pub rooms: BTreeMap<RoomId, RoomConfig>,
}

fn default_wall_percent() -> f64 {
    layout::DEFAULT_WALL_PERCENT
}

/// Initial actor state and motion tuning. Position is in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActorConfig {
    pub x: f64,
    pub y: f64,
    pub direction: Direction,
    pub width: f64,
    pub height: f64,
    pub total_frames: u32,
    pub step_size: f64,
    pub entry_offset: f64,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            x: 400.0,
            y: 300.0,
            direction: Direction::Down,
            width: actor::DEFAULT_WIDTH,
            height: actor::DEFAULT_HEIGHT,
            total_frames: actor::DEFAULT_TOTAL_FRAMES,
            step_size: actor::DEFAULT_STEP_SIZE,
            entry_offset: actor::DEFAULT_ENTRY_OFFSET,
        }
    }
}

impl ActorConfig {
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// One room in percent space.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    pub walls: BTreeMap<String, WallConfig>,
    pub doors: BTreeMap<String, DoorConfig>,
    pub applications: BTreeMap<String, ApplicationConfig>,
}

/// Wall rectangle in percent of the viewport. Ignored for the four edge
/// walls, which are always flush to their edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl WallConfig {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Door in percent space. Only the long-axis size is meaningful: `width`
/// for up/down doors, `height` for left/right doors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoorConfig {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    pub orientation: Direction,
    pub leads_to: RoomId,
}

/// Interactive icon. Position is percent of the viewport, size is percent
/// of the wall thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationConfig {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub menu_items: BTreeMap<String, MenuItemConfig>,
}

/// Entry of an application's popover menu. Sizes are absolute pixels and
/// there is no nested menu: a `menuItems` key here is rejected at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MenuItemConfig {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl WorldConfig {
    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String, WorldError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn room(&self, id: &str) -> Option<&RoomConfig> {
        self.rooms.get(id)
    }

    pub fn room_mut(&mut self, id: &str) -> Option<&mut RoomConfig> {
        self.rooms.get_mut(id)
    }

    pub fn has_room(&self, id: &str) -> bool {
        self.rooms.contains_key(id)
    }

    /// Insert or replace a room, returning the previous one.
    pub fn insert_room(&mut self, id: impl Into<RoomId>, room: RoomConfig) -> Option<RoomConfig> {
        self.rooms.insert(id.into(), room)
    }

    /// Remove a room and every door elsewhere that leads into it.
    pub fn remove_room(&mut self, id: &str) -> Option<RoomConfig> {
        let removed = self.rooms.remove(id)?;
        for room in self.rooms.values_mut() {
            room.doors.retain(|_, d| d.leads_to != id);
        }
        Some(removed)
    }
}

impl RoomConfig {
    /// A room with the four edge walls and nothing else.
    pub fn enclosed(wall_percent: f64) -> Self {
        let far = 100.0 - wall_percent;
        let mut room = RoomConfig::default();
        room.walls.insert(
            walls::TOP.into(),
            WallConfig::new(0.0, 0.0, 100.0, wall_percent),
        );
        room.walls.insert(
            walls::BOTTOM.into(),
            WallConfig::new(0.0, far, 100.0, wall_percent),
        );
        room.walls.insert(
            walls::LEFT.into(),
            WallConfig::new(0.0, 0.0, wall_percent, 100.0),
        );
        room.walls.insert(
            walls::RIGHT.into(),
            WallConfig::new(far, 0.0, wall_percent, 100.0),
        );
        room
    }

    pub fn insert_door(&mut self, id: impl Into<String>, door: DoorConfig) -> Option<DoorConfig> {
        self.doors.insert(id.into(), door)
    }

    pub fn remove_door(&mut self, id: &str) -> Option<DoorConfig> {
        self.doors.remove(id)
    }

    /// Doors in this room that lead to `room_id`, in id order.
    pub fn doors_leading_to<'a>(
        &'a self,
        room_id: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a DoorConfig)> + 'a {
        self.doors.iter().filter(move |(_, d)| d.leads_to == room_id)
    }
}

impl Default for WorldConfig {
    /// Two connected rooms: a hall with a terminal and a study with a
    /// browser whose menu has one entry.
    fn default() -> Self {
        let wall_percent = layout::DEFAULT_WALL_PERCENT;

        let mut hall = RoomConfig::enclosed(wall_percent);
        hall.walls
            .insert("counter".into(), WallConfig::new(30.0, 60.0, 20.0, 5.0));
        hall.insert_door(
            "east",
            DoorConfig {
                x: 100.0 - wall_percent,
                y: 40.0,
                width: None,
                height: Some(15.0),
                orientation: Direction::Right,
                leads_to: "study".into(),
            },
        );
        hall.applications.insert(
            "terminal".into(),
            ApplicationConfig {
                x: 20.0,
                y: 20.0,
                width: 100.0,
                height: 100.0,
                name: "Terminal".into(),
                command: Some("xterm".into()),
                rotation: None,
                menu_items: BTreeMap::new(),
            },
        );

        let mut study = RoomConfig::enclosed(wall_percent);
        study.insert_door(
            "west",
            DoorConfig {
                x: 0.0,
                y: 40.0,
                width: None,
                height: Some(15.0),
                orientation: Direction::Left,
                leads_to: "hall".into(),
            },
        );
        let mut menu_items = BTreeMap::new();
        menu_items.insert(
            "private".into(),
            MenuItemConfig {
                x: 0.0,
                y: 0.0,
                width: 48.0,
                height: 48.0,
                name: "Private Window".into(),
                command: Some("firefox --private-window".into()),
                rotation: None,
            },
        );
        study.applications.insert(
            "browser".into(),
            ApplicationConfig {
                x: 60.0,
                y: 30.0,
                width: 100.0,
                height: 100.0,
                name: "Browser".into(),
                command: Some("firefox".into()),
                rotation: None,
                menu_items,
            },
        );

        let mut rooms = BTreeMap::new();
        rooms.insert("hall".to_string(), hall);
        rooms.insert("study".to_string(), study);

        Self {
            start_room: "hall".into(),
            wall_percent,
            actor: ActorConfig::default(),
            rooms,
        }
    }
}
