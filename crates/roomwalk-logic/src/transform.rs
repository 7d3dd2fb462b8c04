//! Percent ↔ pixel conversion for viewports, walls, doors and applications.
//!
//! Forward transforms build a pixel [`Room`] from a percent
//! [`RoomConfig`]; the inverse transforms turn dragged pixel geometry back
//! into percentages for persistence.
//!
//! Conventions:
//! - Walls and door/application positions are percent of the full viewport,
//!   converted per axis.
//! - Edge walls ignore their percent rect and hug their viewport edge.
//! - Doors are pinned to the wall their orientation names; their short axis
//!   is the wall thickness.
//! - Application sizes are percent of the wall thickness (width of
//!   `wall_thickness_x`, height of `wall_thickness_y`), so icons scale with
//!   the chrome rather than the room.

use serde::Serialize;

use crate::bounds::{BoundingBox, Direction, Point};
use crate::config::{ApplicationConfig, DoorConfig, MenuItemConfig, RoomConfig, WallConfig};
use crate::constants::layout;
use crate::room::{Application, Door, MenuItem, Room, Wall, WallKind};

/// Resolved window size and wall thickness, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub wall_thickness_x: f64,
    pub wall_thickness_y: f64,
}

impl Viewport {
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Finite, strictly positive dimensions.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }

    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }
}

/// Build a viewport; thickness is `wall_percent`% of each dimension.
pub fn compute_viewport(width: f64, height: f64, wall_percent: f64) -> Viewport {
    Viewport {
        width,
        height,
        wall_thickness_x: percent_to_pixel(wall_percent, width),
        wall_thickness_y: percent_to_pixel(wall_percent, height),
    }
}

/// Viewport with the default 7% walls.
pub fn default_viewport(width: f64, height: f64) -> Viewport {
    compute_viewport(width, height, layout::DEFAULT_WALL_PERCENT)
}

pub fn percent_to_pixel(value: f64, dimension: f64) -> f64 {
    value * dimension / 100.0
}

/// Inverse of [`percent_to_pixel`]. A zero dimension maps to 0%.
pub fn pixel_to_percent(value: f64, dimension: f64) -> f64 {
    if dimension == 0.0 {
        return 0.0;
    }
    value * 100.0 / dimension
}

// ── Forward: percent → pixel ────────────────────────────────────────────

pub fn wall_to_pixels(id: &str, config: &WallConfig, viewport: &Viewport) -> Wall {
    let kind = WallKind::from_id(id);
    let (w, h) = (viewport.width, viewport.height);
    let (tx, ty) = (viewport.wall_thickness_x, viewport.wall_thickness_y);
    let bounds = match kind {
        WallKind::Top => BoundingBox::new(0.0, 0.0, w, ty),
        WallKind::Bottom => BoundingBox::new(0.0, h - ty, w, ty),
        WallKind::Left => BoundingBox::new(0.0, 0.0, tx, h),
        WallKind::Right => BoundingBox::new(w - tx, 0.0, tx, h),
        WallKind::Custom => BoundingBox::new(
            percent_to_pixel(config.x, w),
            percent_to_pixel(config.y, h),
            percent_to_pixel(config.width, w),
            percent_to_pixel(config.height, h),
        ),
    };
    Wall {
        id: id.to_string(),
        kind,
        bounds,
    }
}

pub fn door_to_pixels(id: &str, config: &DoorConfig, viewport: &Viewport) -> Door {
    let (w, h) = (viewport.width, viewport.height);
    let (tx, ty) = (viewport.wall_thickness_x, viewport.wall_thickness_y);

    let bounds = if config.orientation.is_vertical() {
        let length = config
            .width
            .map(|p| percent_to_pixel(p, w))
            .unwrap_or(layout::DEFAULT_DOOR_LENGTH);
        let y = match config.orientation {
            Direction::Up => 0.0,
            _ => h - ty,
        };
        BoundingBox::new(percent_to_pixel(config.x, w), y, length, ty)
    } else {
        let length = config
            .height
            .map(|p| percent_to_pixel(p, h))
            .unwrap_or(layout::DEFAULT_DOOR_LENGTH);
        let x = match config.orientation {
            Direction::Left => 0.0,
            _ => w - tx,
        };
        BoundingBox::new(x, percent_to_pixel(config.y, h), tx, length)
    };

    Door {
        id: id.to_string(),
        bounds,
        orientation: config.orientation,
        leads_to: config.leads_to.clone(),
    }
}

pub fn application_to_pixels(
    id: &str,
    config: &ApplicationConfig,
    viewport: &Viewport,
) -> Application {
    Application {
        id: id.to_string(),
        bounds: BoundingBox::new(
            percent_to_pixel(config.x, viewport.width),
            percent_to_pixel(config.y, viewport.height),
            percent_to_pixel(config.width, viewport.wall_thickness_x),
            percent_to_pixel(config.height, viewport.wall_thickness_y),
        ),
        name: config.name.clone(),
        command: config.command.clone(),
        rotation: config.rotation,
        menu_items: config
            .menu_items
            .iter()
            .map(|(item_id, item)| menu_item_to_pixels(item_id, item))
            .collect(),
    }
}

/// Menu items keep their absolute size and sit at the popover origin.
pub fn menu_item_to_pixels(id: &str, config: &MenuItemConfig) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        bounds: BoundingBox::new(0.0, 0.0, config.width, config.height),
        name: config.name.clone(),
        command: config.command.clone(),
        rotation: config.rotation,
    }
}

/// Convert a whole room. Output lists follow the config's key order.
pub fn room_to_pixels(id: &str, config: &RoomConfig, viewport: &Viewport) -> Room {
    Room {
        id: id.to_string(),
        walls: config
            .walls
            .iter()
            .map(|(wall_id, w)| wall_to_pixels(wall_id, w, viewport))
            .collect(),
        doors: config
            .doors
            .iter()
            .map(|(door_id, d)| door_to_pixels(door_id, d, viewport))
            .collect(),
        applications: config
            .applications
            .iter()
            .map(|(app_id, a)| application_to_pixels(app_id, a, viewport))
            .collect(),
    }
}

// ── Inverse: pixel → percent ────────────────────────────────────────────

pub fn wall_to_config(bounds: &BoundingBox, viewport: &Viewport) -> WallConfig {
    WallConfig {
        x: pixel_to_percent(bounds.x, viewport.width),
        y: pixel_to_percent(bounds.y, viewport.height),
        width: pixel_to_percent(bounds.width, viewport.width),
        height: pixel_to_percent(bounds.height, viewport.height),
    }
}

/// The long axis is always written explicitly, so a door that used the
/// default length keeps the same pixel size after a round trip.
pub fn door_to_config(door: &Door, viewport: &Viewport) -> DoorConfig {
    let b = &door.bounds;
    let (width, height) = if door.orientation.is_vertical() {
        (Some(pixel_to_percent(b.width, viewport.width)), None)
    } else {
        (None, Some(pixel_to_percent(b.height, viewport.height)))
    };
    DoorConfig {
        x: pixel_to_percent(b.x, viewport.width),
        y: pixel_to_percent(b.y, viewport.height),
        width,
        height,
        orientation: door.orientation,
        leads_to: door.leads_to.clone(),
    }
}

pub fn application_to_config(app: &Application, viewport: &Viewport) -> ApplicationConfig {
    let b = &app.bounds;
    ApplicationConfig {
        x: pixel_to_percent(b.x, viewport.width),
        y: pixel_to_percent(b.y, viewport.height),
        width: pixel_to_percent(b.width, viewport.wall_thickness_x),
        height: pixel_to_percent(b.height, viewport.wall_thickness_y),
        name: app.name.clone(),
        command: app.command.clone(),
        rotation: app.rotation,
        menu_items: app
            .menu_items
            .iter()
            .map(|item| {
                (
                    item.id.clone(),
                    MenuItemConfig {
                        x: item.bounds.x,
                        y: item.bounds.y,
                        width: item.bounds.width,
                        height: item.bounds.height,
                        name: item.name.clone(),
                        command: item.command.clone(),
                        rotation: item.rotation,
                    },
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn vp() -> Viewport {
        compute_viewport(1000.0, 800.0, 7.0)
    }

    fn door(x: f64, y: f64, orientation: Direction) -> DoorConfig {
        DoorConfig {
            x,
            y,
            width: None,
            height: None,
            orientation,
            leads_to: "b".into(),
        }
    }

    #[test]
    fn viewport_thickness_is_percent_of_each_axis() {
        let v = vp();
        assert!(approx(v.wall_thickness_x, 70.0));
        assert!(approx(v.wall_thickness_y, 56.0));
        assert!(v.is_valid());
        assert!(!compute_viewport(0.0, 800.0, 7.0).is_valid());
        assert!(!compute_viewport(f64::NAN, 800.0, 7.0).is_valid());
    }

    #[test]
    fn percent_round_trip() {
        for &d in &[1.0, 3.0, 640.0, 1000.0, 1920.0, 7777.7] {
            for &p in &[0.0, 0.1, 7.0, 33.333, 50.0, 99.9, 100.0, 250.0] {
                let back = pixel_to_percent(percent_to_pixel(p, d), d);
                assert!(approx(back, p), "p={p} d={d} back={back}");
            }
        }
        assert_eq!(pixel_to_percent(12.0, 0.0), 0.0);
    }

    #[test]
    fn top_wall_spans_full_width() {
        let wall = wall_to_pixels("top", &WallConfig::new(0.0, 0.0, 100.0, 7.0), &vp());
        assert_eq!(wall.kind, WallKind::Top);
        assert_eq!(wall.bounds, BoundingBox::new(0.0, 0.0, 1000.0, 56.0));
    }

    #[test]
    fn edge_walls_are_flush_regardless_of_percent() {
        let v = vp();
        let junk = WallConfig::new(40.0, 40.0, 1.0, 1.0);
        let bottom = wall_to_pixels("bottom", &junk, &v).bounds;
        let left = wall_to_pixels("left", &junk, &v).bounds;
        let right = wall_to_pixels("right", &junk, &v).bounds;
        assert!(approx(bottom.y, 744.0) && approx(bottom.bottom(), 800.0));
        assert_eq!(bottom.width, 1000.0);
        assert_eq!(left, BoundingBox::new(0.0, 0.0, 70.0, 800.0));
        assert!(approx(right.x, 930.0) && approx(right.right(), 1000.0));
    }

    #[test]
    fn custom_wall_converts_per_axis() {
        let wall = wall_to_pixels("counter", &WallConfig::new(30.0, 60.0, 20.0, 5.0), &vp());
        assert_eq!(wall.kind, WallKind::Custom);
        assert!(approx(wall.bounds.x, 300.0));
        assert!(approx(wall.bounds.y, 480.0));
        assert!(approx(wall.bounds.width, 200.0));
        assert!(approx(wall.bounds.height, 40.0));
    }

    #[test]
    fn horizontal_doors_pin_to_top_and_bottom() {
        let v = vp();
        let up = door_to_pixels("u", &door(50.0, 33.0, Direction::Up), &v);
        assert_eq!(up.bounds, BoundingBox::new(500.0, 0.0, 60.0, 56.0));

        let mut cfg = door(10.0, 0.0, Direction::Down);
        cfg.width = Some(10.0);
        let down = door_to_pixels("d", &cfg, &v);
        assert!(approx(down.bounds.y, 744.0));
        assert!(approx(down.bounds.width, 100.0));
        assert!(approx(down.bounds.height, 56.0));
    }

    #[test]
    fn vertical_doors_pin_to_left_and_right() {
        let v = vp();
        let right = door_to_pixels("r", &door(90.0, 40.0, Direction::Right), &v);
        assert!(approx(right.bounds.x, 930.0));
        assert!(approx(right.bounds.y, 320.0));
        assert_eq!((right.bounds.width, right.bounds.height), (70.0, 60.0));

        let mut cfg = door(0.0, 40.0, Direction::Left);
        cfg.height = Some(15.0);
        let left = door_to_pixels("l", &cfg, &v);
        assert_eq!(left.bounds.x, 0.0);
        assert!(approx(left.bounds.height, 120.0));
        assert_eq!(left.leads_to, "b");
    }

    #[test]
    fn application_size_follows_wall_thickness() {
        let cfg = ApplicationConfig {
            x: 20.0,
            y: 20.0,
            width: 100.0,
            height: 50.0,
            name: "Terminal".into(),
            command: None,
            rotation: Some(90.0),
            menu_items: BTreeMap::new(),
        };
        let app = application_to_pixels("t", &cfg, &vp());
        assert!(approx(app.bounds.x, 200.0));
        assert!(approx(app.bounds.y, 160.0));
        assert!(approx(app.bounds.width, 70.0));
        assert!(approx(app.bounds.height, 28.0));
        assert_eq!(app.rotation, Some(90.0));
    }

    #[test]
    fn menu_items_keep_absolute_size_at_origin() {
        let item = MenuItemConfig {
            x: 55.0,
            y: 12.0,
            width: 48.0,
            height: 24.0,
            name: "New".into(),
            command: Some("new".into()),
            rotation: None,
        };
        let px = menu_item_to_pixels("n", &item);
        assert_eq!(px.bounds, BoundingBox::new(0.0, 0.0, 48.0, 24.0));
    }

    #[test]
    fn inverse_transforms_recover_percentages() {
        let v = compute_viewport(1366.0, 768.0, 7.0);

        let wall_cfg = WallConfig::new(12.5, 33.3, 41.0, 2.75);
        let wall = wall_to_pixels("pillar", &wall_cfg, &v);
        let back = wall_to_config(&wall.bounds, &v);
        assert!(approx(back.x, 12.5) && approx(back.y, 33.3));
        assert!(approx(back.width, 41.0) && approx(back.height, 2.75));

        let mut door_cfg = door(0.0, 42.0, Direction::Left);
        door_cfg.height = Some(12.0);
        let px = door_to_pixels("w", &door_cfg, &v);
        let back = door_to_config(&px, &v);
        assert!(approx(back.y, 42.0));
        assert!(approx(back.height.unwrap(), 12.0));
        assert_eq!(back.width, None);
        assert_eq!(back.orientation, Direction::Left);

        let app_cfg = ApplicationConfig {
            x: 61.0,
            y: 17.5,
            width: 90.0,
            height: 110.0,
            name: "Mail".into(),
            command: Some("mail".into()),
            rotation: None,
            menu_items: BTreeMap::new(),
        };
        let app = application_to_pixels("m", &app_cfg, &v);
        let back = application_to_config(&app, &v);
        assert!(approx(back.x, 61.0) && approx(back.y, 17.5));
        assert!(approx(back.width, 90.0) && approx(back.height, 110.0));
        assert_eq!(back.name, "Mail");
    }

    #[test]
    fn default_length_door_round_trips_to_same_pixels() {
        let v = vp();
        let px = door_to_pixels("u", &door(25.0, 0.0, Direction::Up), &v);
        let again = door_to_pixels("u", &door_to_config(&px, &v), &v);
        assert!(approx(again.bounds.width, px.bounds.width));
        assert!(approx(again.bounds.x, px.bounds.x));
    }

    #[test]
    fn room_lists_are_in_key_order() {
        let mut room = RoomConfig::enclosed(7.0);
        room.doors.insert("z".into(), door(0.0, 10.0, Direction::Left));
        room.doors.insert("a".into(), door(0.0, 60.0, Direction::Left));
        let px = room_to_pixels("r", &room, &vp());
        let ids: Vec<_> = px.doors.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, ["a", "z"]);
        assert_eq!(px.walls.len(), 4);
        assert_eq!(px.id, "r");
    }
}
