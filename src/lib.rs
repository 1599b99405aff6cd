//! Tile Hop - kinematics and collision core for a tile-based platformer
//!
//! Core modules:
//! - `sim`: Deterministic per-tick simulation (body, collision, bouncing tiles, camera)
//! - `level`: Geometry ingestion from a map loader's output
//! - `settings`: Data-driven physics configuration
//! - `error`: Errors raised while loading configuration or geometry

pub mod error;
pub mod level;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use level::{Level, LevelDescriptor};
pub use settings::{GameMode, PhysicsConfig};

/// Reference tuning constants
pub mod consts {
    /// Viewport dimensions in pixels
    pub const SCREEN_WIDTH: i32 = 480;
    pub const SCREEN_HEIGHT: i32 = 320;

    /// Simulation rate (one tick per rendered frame)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks run per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta fed to the fixed-step accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Tile edge length in pixels
    pub const TILE_SIZE: i32 = 16;

    /// Platformer defaults (pixels per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_FORCE: f32 = 8.0;
    pub const MAX_FALL_SPEED: f32 = 10.0;
    pub const WALK_SPEED: f32 = 2.5;

    /// Top-down defaults
    pub const TOP_DOWN_SPEED: f32 = 5.0;
    pub const TOP_DOWN_BODY_SIZE: i32 = 32;

    /// Interactive tile bounce
    pub const BOUNCE_DURATION_TICKS: u32 = 10;
    pub const BOUNCE_PEAK_HEIGHT: f32 = 8.0;

    /// Height of the probe above the body's head used for strike detection
    pub const STRIKE_PROBE_HEIGHT: i32 = 4;
}

