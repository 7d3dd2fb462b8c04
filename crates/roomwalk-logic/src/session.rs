//! Explicit world session: config, current room, actor.
//!
//! A `Session` is constructed from a [`WorldConfig`] and a window size and
//! passed around by its owner; there is no global "current world". It keeps
//! the pixel snapshot of the current room in step with the config and the
//! viewport, and it is the only place where `current_room_id` changes.
//!
//! ```
//! use roomwalk_logic::bounds::Direction;
//! use roomwalk_logic::config::WorldConfig;
//! use roomwalk_logic::motion::MoveResult;
//! use roomwalk_logic::session::Session;
//!
//! let mut session = Session::new(WorldConfig::default(), 1000.0, 800.0).unwrap();
//! let result = session.step(Direction::Right);
//! assert!(matches!(result, MoveResult::Moved { .. }));
//! ```

use crate::bounds::{BoundingBox, Direction, Point, Size};
use crate::collision::{app_near, point_query, Hit};
use crate::config::{RoomConfig, RoomId, WorldConfig};
use crate::error::WorldError;
use crate::motion::{ActorState, MotionController, MotionStep, MoveResult};
use crate::navigator::{resolve_traversal, Traversal};
use crate::room::{Application, Door, Room};
use crate::transform::{
    application_to_config, application_to_pixels, compute_viewport, door_to_config,
    room_to_pixels, wall_to_config, Viewport,
};

#[derive(Debug, Clone)]
pub struct Session {
    config: WorldConfig,
    viewport: Viewport,
    current_room_id: RoomId,
    room: Room,
    motion: MotionController,
}

impl Session {
    /// Start a session in the config's start room.
    pub fn new(config: WorldConfig, width: f64, height: f64) -> Result<Self, WorldError> {
        let viewport = checked_viewport(width, height, config.wall_percent)?;
        let start = config.start_room.clone();
        let room_config = config
            .room(&start)
            .ok_or_else(|| WorldError::UnknownRoom(start.clone()))?;
        let room = room_to_pixels(&start, room_config, &viewport);
        let motion = MotionController::from_config(&config.actor);

        log::info!(
            "Session started in '{}' ({} rooms, viewport {}×{})",
            start,
            config.rooms.len(),
            width,
            height
        );

        Ok(Self {
            config,
            viewport,
            current_room_id: start,
            room,
            motion,
        })
    }

    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn current_room_id(&self) -> &str {
        &self.current_room_id
    }

    /// Pixel snapshot of the current room.
    pub fn room(&self) -> &Room {
        &self.room
    }

    pub fn actor(&self) -> &ActorState {
        self.motion.state()
    }

    pub fn actor_size(&self) -> Size {
        self.motion.size()
    }

    // ── Movement ────────────────────────────────────────────────────────

    /// Move by `(dx, dy)`; walking into a door switches rooms.
    pub fn attempt_move(&mut self, dx: f64, dy: f64) -> MoveResult {
        match self.motion.attempt_move(dx, dy, &self.room) {
            MotionStep::Moved => MoveResult::Moved {
                nearby_application: self.nearby_application().map(|a| a.id.clone()),
            },
            MotionStep::Blocked => MoveResult::Blocked,
            MotionStep::DoorContact { door_id, direction } => match self.resolve(&door_id) {
                Ok(traversal) => {
                    let room_id = traversal.room_id.clone();
                    self.commit(traversal, direction);
                    MoveResult::Transitioned { room_id }
                }
                Err(e) => {
                    log::warn!(
                        "Door '{}' in '{}' cannot be traversed: {}",
                        door_id,
                        self.current_room_id,
                        e
                    );
                    MoveResult::Blocked
                }
            },
        }
    }

    /// One configured step in `direction`.
    pub fn step(&mut self, direction: Direction) -> MoveResult {
        let (dx, dy) = direction.delta(self.config.actor.step_size);
        self.attempt_move(dx, dy)
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.motion.set_direction(direction);
    }

    pub fn stop_moving(&mut self) {
        self.motion.stop_moving();
    }

    /// Cross `door_id` of the current room directly (e.g. on click). The
    /// actor keeps its facing. On error nothing changes.
    pub fn traverse(&mut self, door_id: &str) -> Result<(), WorldError> {
        let traversal = self.resolve(door_id)?;
        let facing = self.motion.state().direction;
        self.commit(traversal, facing);
        Ok(())
    }

    fn resolve(&self, door_id: &str) -> Result<Traversal, WorldError> {
        resolve_traversal(
            &self.config,
            &self.current_room_id,
            door_id,
            &self.viewport,
            self.motion.size(),
            self.config.actor.entry_offset,
        )
    }

    /// Infallible: room, snapshot and actor change together.
    fn commit(&mut self, traversal: Traversal, direction: Direction) {
        log::info!(
            "Room transition '{}' → '{}' at ({:.1},{:.1})",
            self.current_room_id,
            traversal.room_id,
            traversal.position.x,
            traversal.position.y
        );
        self.current_room_id = traversal.room_id;
        self.room = traversal.room;
        self.motion.enter_at(traversal.position, direction);
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Application within pickup range of the actor, if any.
    pub fn nearby_application(&self) -> Option<&Application> {
        let actor = self.motion.state();
        app_near(actor.position(), self.motion.size(), &self.room.applications)
    }

    /// Pointer hit-test against the current room.
    pub fn hit_test(&self, point: Point) -> Option<Hit<'_>> {
        point_query(
            point,
            &self.room.walls,
            &self.room.doors,
            &self.room.applications,
        )
    }

    // ── Viewport and world changes ──────────────────────────────────────

    /// New window size. The actor keeps its pixel position.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), WorldError> {
        self.viewport = checked_viewport(width, height, self.config.wall_percent)?;
        self.rebuild_room();
        Ok(())
    }

    pub fn set_wall_percent(&mut self, wall_percent: f64) {
        self.config.wall_percent = wall_percent;
        self.viewport = compute_viewport(self.viewport.width, self.viewport.height, wall_percent);
        self.rebuild_room();
    }

    /// Replace the world. The actor is rebuilt from the new config in its
    /// start room; on error the current world stays.
    pub fn reload(&mut self, config: WorldConfig) -> Result<(), WorldError> {
        let fresh = Session::new(config, self.viewport.width, self.viewport.height)?;
        log::info!("World reloaded, start room '{}'", fresh.current_room_id);
        *self = fresh;
        Ok(())
    }

    // ── Edit commits ────────────────────────────────────────────────────

    /// Persist a dragged wall of the current room.
    pub fn commit_wall(&mut self, id: &str, bounds: BoundingBox) -> Result<(), WorldError> {
        let viewport = self.viewport;
        let room_id = self.current_room_id.clone();
        let wall = self
            .current_room_config_mut()?
            .walls
            .get_mut(id)
            .ok_or_else(|| unknown_element(&room_id, "wall", id))?;
        *wall = wall_to_config(&bounds, &viewport);
        self.rebuild_room();
        Ok(())
    }

    /// Persist a dragged door of the current room. Orientation and target
    /// are kept.
    pub fn commit_door(&mut self, id: &str, bounds: BoundingBox) -> Result<(), WorldError> {
        let viewport = self.viewport;
        let room_id = self.current_room_id.clone();
        let door = self
            .current_room_config_mut()?
            .doors
            .get_mut(id)
            .ok_or_else(|| WorldError::UnknownDoor {
                room: room_id.clone(),
                door: id.to_string(),
            })?;
        let moved = Door {
            id: id.to_string(),
            bounds,
            orientation: door.orientation,
            leads_to: door.leads_to.clone(),
        };
        *door = door_to_config(&moved, &viewport);
        self.rebuild_room();
        Ok(())
    }

    /// Persist a dragged or resized application of the current room. Only
    /// position and size change.
    pub fn commit_application(&mut self, id: &str, bounds: BoundingBox) -> Result<(), WorldError> {
        let viewport = self.viewport;
        let room_id = self.current_room_id.clone();
        let app = self
            .current_room_config_mut()?
            .applications
            .get_mut(id)
            .ok_or_else(|| unknown_element(&room_id, "application", id))?;
        let mut moved = application_to_pixels(id, app, &viewport);
        moved.bounds = bounds;
        let percent = application_to_config(&moved, &viewport);
        app.x = percent.x;
        app.y = percent.y;
        app.width = percent.width;
        app.height = percent.height;
        self.rebuild_room();
        Ok(())
    }

    fn current_room_config_mut(&mut self) -> Result<&mut RoomConfig, WorldError> {
        let id = &self.current_room_id;
        self.config
            .rooms
            .get_mut(id)
            .ok_or_else(|| WorldError::UnknownRoom(id.clone()))
    }

    fn rebuild_room(&mut self) {
        self.room = match self.config.room(&self.current_room_id) {
            Some(cfg) => room_to_pixels(&self.current_room_id, cfg, &self.viewport),
            None => Room {
                id: self.current_room_id.clone(),
                walls: Vec::new(),
                doors: Vec::new(),
                applications: Vec::new(),
            },
        };
    }
}

fn checked_viewport(width: f64, height: f64, wall_percent: f64) -> Result<Viewport, WorldError> {
    let viewport = compute_viewport(width, height, wall_percent);
    if viewport.is_valid() {
        Ok(viewport)
    } else {
        Err(WorldError::InvalidViewport { width, height })
    }
}

fn unknown_element(room: &str, kind: &'static str, id: &str) -> WorldError {
    WorldError::UnknownElement {
        room: room.to_string(),
        kind,
        id: id.to_string(),
    }
}
