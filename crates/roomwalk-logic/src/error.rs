//! Errors for world loading, traversal and edit commits.
//!
//! Geometry queries never fail; only lookups by id, viewport setup and JSON
//! parsing produce a `WorldError`.

/// Errors that can occur while loading or driving a world.
#[derive(Debug)]
pub enum WorldError {
    /// A room id that is not in the room graph.
    UnknownRoom(String),
    /// A door id that is not in the given room.
    UnknownDoor { room: String, door: String },
    /// A wall or application id that is not in the given room.
    UnknownElement {
        room: String,
        kind: &'static str,
        id: String,
    },
    /// Viewport dimensions that are not finite and positive.
    InvalidViewport { width: f64, height: f64 },
    Json(serde_json::Error),
}

impl From<serde_json::Error> for WorldError {
    fn from(e: serde_json::Error) -> Self {
        WorldError::Json(e)
    }
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::UnknownRoom(room) => write!(f, "Unknown room '{}'", room),
            WorldError::UnknownDoor { room, door } => {
                write!(f, "Room '{}' has no door '{}'", room, door)
            }
            WorldError::UnknownElement { room, kind, id } => {
                write!(f, "Room '{}' has no {} '{}'", room, kind, id)
            }
            WorldError::InvalidViewport { width, height } => {
                write!(f, "Invalid viewport {}×{}", width, height)
            }
            WorldError::Json(e) => write!(f, "World config JSON error: {}", e),
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Json(e) => Some(e),
            _ => None,
        }
    }
}
