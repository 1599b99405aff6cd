//! Level geometry ingestion
//!
//! A map loader hands over its collision objects, spawn markers and the cells
//! of the interactive tile layer as a [`LevelDescriptor`]. [`Level`] is the
//! validated form the simulation consumes: degenerate colliders are dropped
//! here so the resolver never sees them, and a missing spawn or tile layer
//! falls back to `(0, 0)` and no tiles.

use std::path::Path;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::TILE_SIZE;
use crate::error::{Error, Result};
use crate::sim::{InteractiveTile, Rect};

fn default_tile_size() -> u32 {
    TILE_SIZE as u32
}

fn too_large(what: &str, w: u32, h: u32) -> Error {
    Error::InvalidConfig(format!("{what} {w}x{h} is out of range"))
}

/// Convert unsigned descriptor dimensions, rejecting values below `min`
fn pixel_size(what: &str, w: u32, h: u32, min: i32) -> Result<IVec2> {
    match (i32::try_from(w), i32::try_from(h)) {
        (Ok(x), Ok(y)) if x >= min && y >= min => Ok(IVec2::new(x, y)),
        _ => Err(too_large(what, w, h)),
    }
}

/// Component-wise product, or None on overflow
fn checked_scale(a: IVec2, b: IVec2) -> Option<IVec2> {
    Some(IVec2::new(a.x.checked_mul(b.x)?, a.y.checked_mul(b.y)?))
}

/// A rectangle object from a map's object layer (pixel units)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
}

impl ObjectDescriptor {
    fn rect(&self) -> Rect {
        Rect::new(
            self.x.round() as i32,
            self.y.round() as i32,
            self.width.unwrap_or(0.0).round() as i32,
            self.height.unwrap_or(0.0).round() as i32,
        )
    }
}

/// An occupied cell of the interactive tile layer (tile units)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileCell {
    pub x: i32,
    pub y: i32,
}

/// Raw level data as produced by a map loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDescriptor {
    pub width_tiles: u32,
    pub height_tiles: u32,
    #[serde(default = "default_tile_size")]
    pub tile_width: u32,
    #[serde(default = "default_tile_size")]
    pub tile_height: u32,
    #[serde(default)]
    pub colliders: Vec<ObjectDescriptor>,
    /// Spawn markers; origin is the marker's bottom-left corner
    #[serde(default)]
    pub spawn: Vec<ObjectDescriptor>,
    #[serde(default)]
    pub interactive: Vec<TileCell>,
}

/// Static level geometry
#[derive(Debug, Clone)]
pub struct Level {
    /// World extent in pixels
    pub world_size: IVec2,
    /// Tile edge lengths in pixels
    pub tile_size: IVec2,
    /// Actor spawn, top-left corner in world pixels
    pub spawn: Vec2,
    solids: Vec<Rect>,
    tiles: Vec<InteractiveTile>,
}

impl Level {
    /// Assemble a level, discarding colliders without area
    pub fn new(
        world_size: IVec2,
        tile_size: IVec2,
        solids: impl IntoIterator<Item = Rect>,
        tiles: impl IntoIterator<Item = InteractiveTile>,
        spawn: Option<Vec2>,
    ) -> Self {
        let solids = solids
            .into_iter()
            .filter(|r| {
                if r.is_degenerate() {
                    log::debug!("Dropping degenerate collider {:?}", r);
                }
                !r.is_degenerate()
            })
            .collect();

        let spawn = spawn.unwrap_or_else(|| {
            log::debug!("No spawn point, using origin");
            Vec2::ZERO
        });

        Self {
            world_size,
            tile_size,
            spawn,
            solids,
            tiles: tiles.into_iter().collect(),
        }
    }

    pub fn from_descriptor(desc: &LevelDescriptor) -> Result<Self> {
        let tile_size = pixel_size("tile size", desc.tile_width, desc.tile_height, 1)?;
        let world_tiles = pixel_size("world size", desc.width_tiles, desc.height_tiles, 0)?;
        let world_size = checked_scale(world_tiles, tile_size)
            .ok_or_else(|| too_large("world size", desc.width_tiles, desc.height_tiles))?;

        let spawn = desc.spawn.first().map(|marker| {
            let spawn = Vec2::new(marker.x, marker.y - marker.height.unwrap_or(0.0));
            log::info!("Using spawn point at ({}, {})", spawn.x, spawn.y);
            spawn
        });

        let tiles = desc
            .interactive
            .iter()
            .map(|cell| {
                let coord = IVec2::new(cell.x, cell.y);
                // Both edges of the tile must stay in range
                let pos = checked_scale(coord, tile_size)
                    .filter(|pos| {
                        pos.x.checked_add(tile_size.x).is_some()
                            && pos.y.checked_add(tile_size.y).is_some()
                    })
                    .ok_or_else(|| {
                        Error::InvalidConfig(format!(
                            "tile cell ({}, {}) is out of range",
                            cell.x, cell.y
                        ))
                    })?;
                Ok(InteractiveTile::new(coord, Rect::from_pos_size(pos, tile_size)))
            })
            .collect::<Result<Vec<_>>>()?;

        let level = Self::new(
            world_size,
            tile_size,
            desc.colliders.iter().map(ObjectDescriptor::rect),
            tiles,
            spawn,
        );
        log::info!(
            "Level {}x{} px: {} colliders, {} interactive tiles",
            world_size.x,
            world_size.y,
            level.solids.len(),
            level.tiles.len()
        );
        Ok(level)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let desc: LevelDescriptor = serde_json::from_str(json).map_err(|source| Error::Parse {
            what: "level",
            source,
        })?;
        Self::from_descriptor(&desc)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }

    /// Static colliders in provider order
    pub fn solids(&self) -> &[Rect] {
        &self.solids
    }

    /// Interactive tiles not yet handed to a simulation
    pub fn tiles(&self) -> &[InteractiveTile] {
        &self.tiles
    }

    /// Move the interactive tiles out; the simulation owns their state from then on
    pub fn take_tiles(&mut self) -> Vec<InteractiveTile> {
        std::mem::take(&mut self.tiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL_JSON: &str = r#"{
        "width_tiles": 30,
        "height_tiles": 20,
        "colliders": [
            { "x": 0, "y": 304, "width": 480, "height": 16 },
            { "x": 64, "y": 200, "width": 0, "height": 16 },
            { "x": 96, "y": 200 }
        ],
        "spawn": [ { "x": 100, "y": 296, "width": 16, "height": 16 } ],
        "interactive": [ { "x": 5, "y": 14 }, { "x": 6, "y": 14 } ]
    }"#;

    #[test]
    fn test_load_from_json() {
        let level = Level::from_json(LEVEL_JSON).unwrap();
        assert_eq!(level.world_size, IVec2::new(480, 320));
        assert_eq!(level.tile_size, IVec2::new(16, 16));
        assert_eq!(level.solids(), &[Rect::new(0, 304, 480, 16)]);
        assert_eq!(level.spawn, Vec2::new(100.0, 280.0));
        assert_eq!(level.tiles().len(), 2);
        assert_eq!(level.tiles()[1].base, Rect::new(96, 224, 16, 16));
        assert_eq!(level.tiles()[1].coord, IVec2::new(6, 14));
    }

    #[test]
    fn test_missing_layers_fall_back() {
        let level = Level::from_json(r#"{ "width_tiles": 10, "height_tiles": 5 }"#).unwrap();
        assert_eq!(level.spawn, Vec2::ZERO);
        assert!(level.tiles().is_empty());
        assert!(level.solids().is_empty());
        assert_eq!(level.world_size, IVec2::new(160, 80));
    }

    #[test]
    fn test_degenerate_colliders_dropped() {
        let level = Level::new(
            IVec2::new(100, 100),
            IVec2::splat(16),
            [
                Rect::new(0, 0, 0, 10),
                Rect::new(0, 0, 10, -1),
                Rect::new(5, 5, 10, 10),
            ],
            Vec::<InteractiveTile>::new(),
            None,
        );
        assert_eq!(level.solids(), &[Rect::new(5, 5, 10, 10)]);
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let err =
            Level::from_json(r#"{ "width_tiles": 4294967295, "height_tiles": 20 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = Level::from_json(
            r#"{ "width_tiles": 200000, "height_tiles": 20, "tile_width": 200000 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = Level::from_json(
            r#"{ "width_tiles": 30, "height_tiles": 20, "tile_height": 0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        let err = Level::from_json(
            r#"{ "width_tiles": 30, "height_tiles": 20, "interactive": [ { "x": 2147483647, "y": 0 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));

        // Position fits, far edge does not
        let err = Level::from_json(
            r#"{ "width_tiles": 30, "height_tiles": 20, "interactive": [ { "x": 134217727, "y": 0 } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_json_is_error() {
        let err = Level::from_json(r#"{ "width_tiles": "wide" }"#).unwrap_err();
        assert!(matches!(err, Error::Parse { what: "level", .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = Level::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
