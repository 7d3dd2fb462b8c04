//! Layout and motion constants: wall ids, default sizes, animation.
//!
//! Plain constants with no engine dependency. The transform layer, the
//! navigator and the harness all read from here.

pub mod layout {
    /// Wall thickness as a percent of the matching viewport dimension.
    pub const DEFAULT_WALL_PERCENT: f64 = 7.0;
    /// Long-axis length (pixels) of a door whose config omits it.
    pub const DEFAULT_DOOR_LENGTH: f64 = 60.0;
}

pub mod walls {
    pub const TOP: &str = "top";
    pub const BOTTOM: &str = "bottom";
    pub const LEFT: &str = "left";
    pub const RIGHT: &str = "right";

    /// Wall ids that are pinned to a viewport edge.
    pub const EDGES: [&str; 4] = [TOP, BOTTOM, LEFT, RIGHT];
}

pub mod actor {
    pub const DEFAULT_WIDTH: f64 = 32.0;
    pub const DEFAULT_HEIGHT: f64 = 32.0;
    /// Frames in one walk cycle of the sprite sheet.
    pub const DEFAULT_TOTAL_FRAMES: u32 = 4;
    /// Pixels covered by one discrete key press.
    pub const DEFAULT_STEP_SIZE: f64 = 10.0;
    /// Gap between a door and the actor re-spawned next to it.
    pub const DEFAULT_ENTRY_OFFSET: f64 = 15.0;
}
