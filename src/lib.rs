//! Lilypad - a lane-crossing arcade simulation core
//!
//! Core module:
//! - `sim`: Deterministic simulation (entities, movement, collisions, game state)
//!
//! Rendering, keyboard polling and level-file parsing belong to the caller:
//! the simulation consumes already-parsed entity descriptors plus an
//! abstract per-frame input signal, and exposes a drawable snapshot and the
//! level-completed / game-over flags for the outer state machine.

pub mod sim;

pub use sim::{
    Direction, Entity, EntityDescriptor, EntityKind, ExtraLifeAgent, FrameInput, Goal, Motion,
    Player, SpriteView, Tag, TagSet, World,
};

/// Game configuration constants
pub mod consts {
    /// Screen width, in pixels
    pub const SCREEN_WIDTH: f32 = 1024.0;
    /// Screen height, in pixels
    pub const SCREEN_HEIGHT: f32 = 768.0;
    /// Tile size, in pixels
    pub const TILE_SIZE: f32 = 48.0;

    /// Player size (square), in pixels
    pub const PLAYER_SIZE: f32 = 48.0;
    /// Player default respawn position
    pub const RESPAWN_X: f32 = 512.0;
    pub const RESPAWN_Y: f32 = 720.0;
    /// Starting lives
    pub const START_LIVES: i32 = 3;

    /// Archetype speeds (pixels per second)
    pub const BUS_SPEED: f32 = 150.0;
    pub const RACECAR_SPEED: f32 = 500.0;
    pub const BIKE_SPEED: f32 = 200.0;
    pub const BULLDOZER_SPEED: f32 = 50.0;
    pub const LOG_SPEED: f32 = 100.0;
    pub const LONG_LOG_SPEED: f32 = 70.0;
    pub const TURTLE_SPEED: f32 = 85.0;

    /// Diveable cycle: time spent surfaced, then submerged (seconds)
    pub const DIVE_SURFACED_SECS: f32 = 7.0;
    pub const DIVE_SUBMERGED_SECS: f32 = 2.0;

    /// Extra-life agent lifetime and self-move interval (seconds)
    pub const EXTRA_LIFE_LIFETIME_SECS: f32 = 14.0;
    pub const EXTRA_LIFE_STEP_SECS: f32 = 2.0;
    /// Spawn window relative to elapsed level time (whole seconds, inclusive)
    pub const EXTRA_LIFE_MIN_SECS: u32 = 25;
    pub const EXTRA_LIFE_MAX_SECS: u32 = 35;
}
