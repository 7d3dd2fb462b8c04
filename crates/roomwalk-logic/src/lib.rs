//! Pure navigation logic for Roomwalk.
//!
//! This crate contains the room-based navigation core independent of any
//! renderer, window system or input source. Functions take plain data and
//! return results, making them unit-testable and portable across a desktop
//! shell, headless CLI tools, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`bounds`] | Points, sizes, axis-aligned boxes, facing directions |
//! | [`collision`] | AABB wall/door tests, application proximity, pointer hit-test |
//! | [`config`] | Percent-space world config (rooms, walls, doors, applications) |
//! | [`constants`] | Wall ids, default wall/door/actor sizes |
//! | [`error`] | `WorldError` for lookups, viewport setup and JSON |
//! | [`geometry`] | World layout validation (sizes, door links, connectivity) |
//! | [`motion`] | Actor state, walk-cycle frames, collision-gated steps |
//! | [`navigator`] | Door traversal, reciprocal doors, entry placement |
//! | [`room`] | Pixel-space room snapshot |
//! | [`session`] | Explicit world session: current room, actor, edit commits |
//! | [`transform`] | Viewport and percent ↔ pixel conversion |

pub mod bounds;
pub mod collision;
pub mod config;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod motion;
pub mod navigator;
pub mod room;
pub mod session;
pub mod transform;
