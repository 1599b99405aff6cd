//! Deterministic simulation module
//!
//! All per-tick logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (colliders and tiles in ingestion order)
//! - No rendering, input-device or map-format dependencies

pub mod body;
pub mod camera;
pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;
pub mod tile;
pub mod timestep;

pub use body::KinematicBody;
pub use camera::Camera;
pub use collision::{AxisContact, move_and_resolve, resolve_axis};
pub use rect::{Axis, Rect};
pub use state::{Frame, SimEvent, SimState, TileFrame};
pub use tick::{TickInput, TickResult, advance, tick};
pub use tile::{Bounce, InteractiveTile, TileSet, TileState};
pub use timestep::FixedTimestep;
