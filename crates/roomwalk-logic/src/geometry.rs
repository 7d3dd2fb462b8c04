//! World layout validation.
//!
//! Pure functions over a [`WorldConfig`] that report problems as data
//! instead of failing. A world with only warnings is fully walkable; errors
//! mark geometry or links that will misbehave at runtime.

use std::collections::{BTreeSet, VecDeque};

use crate::config::WorldConfig;
use crate::room::WallKind;

/// A layout validation finding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Finding severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn error(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Error,
        message,
    }
}

fn warning(category: &'static str, message: String) -> ValidationError {
    ValidationError {
        category,
        severity: Severity::Warning,
        message,
    }
}

// ── A. Element geometry (per-room) ──────────────────────────────────────

/// Check that custom walls, explicitly sized doors and applications have
/// finite, positive sizes. Edge walls are skipped: their rect is ignored.
pub fn check_room_dimensions(config: &WorldConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (room_id, room) in &config.rooms {
        for (id, w) in &room.walls {
            if WallKind::from_id(id).is_edge() {
                continue;
            }
            if !positive(w.width) || !positive(w.height) {
                errors.push(error(
                    "element_geometry",
                    format!(
                        "Wall '{}' in '{}' has non-positive size: {}×{}",
                        id, room_id, w.width, w.height
                    ),
                ));
            }
        }
        for (id, d) in &room.doors {
            let explicit = [d.width, d.height];
            if explicit.iter().flatten().any(|&v| !positive(v)) {
                errors.push(error(
                    "element_geometry",
                    format!("Door '{}' in '{}' has a non-positive length", id, room_id),
                ));
            }
        }
        for (id, a) in &room.applications {
            if !positive(a.width) || !positive(a.height) {
                errors.push(error(
                    "element_geometry",
                    format!(
                        "Application '{}' in '{}' has non-positive size: {}×{}",
                        id, room_id, a.width, a.height
                    ),
                ));
            }
        }
    }
    errors
}

/// Check that menu items have a positive pixel size.
pub fn check_menu_items(config: &WorldConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (room_id, room) in &config.rooms {
        for (app_id, app) in &room.applications {
            for (item_id, item) in &app.menu_items {
                if !positive(item.width) || !positive(item.height) {
                    errors.push(error(
                        "menu_items",
                        format!(
                            "Menu item '{}' of '{}' in '{}' has non-positive size: {}×{}",
                            item_id, app_id, room_id, item.width, item.height
                        ),
                    ));
                }
            }
        }
    }
    errors
}

// ── B. Door links ───────────────────────────────────────────────────────

/// Check that every door leads to an existing room.
pub fn check_door_targets(config: &WorldConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (room_id, room) in &config.rooms {
        for (id, d) in &room.doors {
            if !config.has_room(&d.leads_to) {
                errors.push(error(
                    "door_links",
                    format!(
                        "Door '{}' in '{}' leads to non-existent room '{}'",
                        id, room_id, d.leads_to
                    ),
                ));
            }
        }
    }
    errors
}

/// Check that each door's destination has a door leading back that faces
/// the opposite way. Without one the actor enters at the viewport center.
pub fn check_reciprocal_doors(config: &WorldConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (room_id, room) in &config.rooms {
        for (id, d) in &room.doors {
            let Some(dest) = config.room(&d.leads_to) else {
                continue; // caught by target check
            };
            let wanted = d.orientation.opposite();
            let found = dest
                .doors_leading_to(room_id)
                .any(|(_, back)| back.orientation == wanted);
            if !found {
                errors.push(warning(
                    "door_links",
                    format!(
                        "Door '{}' in '{}' has no {}-facing door back in '{}'",
                        id, room_id, wanted, d.leads_to
                    ),
                ));
            }
        }
    }
    errors
}

// ── C. Graph-level ──────────────────────────────────────────────────────

/// Check that the start room exists.
pub fn check_start_room(config: &WorldConfig) -> Vec<ValidationError> {
    if config.has_room(&config.start_room) {
        Vec::new()
    } else {
        vec![error(
            "connectivity",
            format!("Start room '{}' does not exist", config.start_room),
        )]
    }
}

/// Check that every room is reachable from the start room by walking
/// through doors.
pub fn check_connectivity(config: &WorldConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !config.has_room(&config.start_room) {
        return errors; // caught by start room check
    }

    let mut visited: BTreeSet<&str> = BTreeSet::new();
    let mut queue = VecDeque::new();
    visited.insert(config.start_room.as_str());
    queue.push_back(config.start_room.as_str());

    while let Some(current) = queue.pop_front() {
        let Some(room) = config.room(current) else {
            continue;
        };
        for d in room.doors.values() {
            let next = d.leads_to.as_str();
            if config.has_room(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    let unreached: Vec<&str> = config
        .rooms
        .keys()
        .map(String::as_str)
        .filter(|id| !visited.contains(id))
        .collect();

    if !unreached.is_empty() {
        errors.push(warning(
            "connectivity",
            format!(
                "{} of {} rooms unreachable from '{}' (e.g. '{}')",
                unreached.len(),
                config.rooms.len(),
                config.start_room,
                unreached[0]
            ),
        ));
    }
    errors
}

// ── Master validation ───────────────────────────────────────────────────

/// Run all layout validations and return combined results.
pub fn validate_world(config: &WorldConfig) -> Vec<ValidationError> {
    let mut all = Vec::new();
    all.extend(check_start_room(config));
    all.extend(check_room_dimensions(config));
    all.extend(check_menu_items(config));
    all.extend(check_door_targets(config));
    all.extend(check_reciprocal_doors(config));
    all.extend(check_connectivity(config));
    all
}

/// True if any finding is an error.
pub fn has_errors(findings: &[ValidationError]) -> bool {
    findings.iter().any(|f| f.severity == Severity::Error)
}
