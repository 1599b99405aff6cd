//! Interactive tiles: solid blocks that bounce when struck from below
//!
//! Each tile is `Idle` until struck, then `Animating` for a fixed number of
//! ticks while its collider is lifted by a decaying offset. Strikes on an
//! animating tile are ignored.

use std::collections::HashMap;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::settings::PhysicsConfig;

/// Bounce animation curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounce {
    /// Ticks until the tile settles
    pub duration: u32,
    /// Lift at the moment of the strike
    pub peak: f32,
}

impl Bounce {
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            duration: config.bounce_duration,
            peak: config.bounce_peak_height,
        }
    }

    /// Vertical offset `timer` ticks after a strike
    ///
    /// The lift decays linearly from `-peak` to zero over `duration` ticks.
    pub fn offset_at(&self, timer: u32) -> f32 {
        let t = timer as f32 / self.duration.max(1) as f32;
        -(self.peak * (1.0 - t)).abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileState {
    #[default]
    Idle,
    Animating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractiveTile {
    /// Tile-map cell, the tile's identity
    pub coord: IVec2,
    /// Resting footprint in world pixels
    pub base: Rect,
    pub state: TileState,
    /// Ticks since the strike (0 while idle)
    pub timer: u32,
    /// Current lift, negative is up
    pub offset_y: f32,
}

impl InteractiveTile {
    pub fn new(coord: IVec2, base: Rect) -> Self {
        Self {
            coord,
            base,
            state: TileState::Idle,
            timer: 0,
            offset_y: 0.0,
        }
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.state == TileState::Animating
    }

    /// Current collider: the base footprint raised by the bounce offset
    pub fn rect(&self) -> Rect {
        self.base.translated(IVec2::new(0, self.offset_y.round() as i32))
    }

    /// Start a bounce. Returns false if the tile was already bouncing.
    pub fn strike(&mut self, bounce: &Bounce) -> bool {
        if self.is_animating() {
            return false;
        }
        self.state = TileState::Animating;
        self.timer = 0;
        self.offset_y = bounce.offset_at(0);
        true
    }

    /// Advance the bounce by one tick. Returns true on the tick it settles.
    pub fn advance(&mut self, bounce: &Bounce) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.timer += 1;
        if self.timer <= bounce.duration {
            self.offset_y = bounce.offset_at(self.timer);
            false
        } else {
            self.state = TileState::Idle;
            self.timer = 0;
            self.offset_y = 0.0;
            true
        }
    }
}

/// All interactive tiles of a level, indexed by cell
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    tiles: Vec<InteractiveTile>,
    by_coord: HashMap<IVec2, usize>,
}

impl TileSet {
    /// Build the set; a cell listed twice keeps its first tile
    pub fn new(tiles: impl IntoIterator<Item = InteractiveTile>) -> Self {
        let mut set = Self::default();
        for tile in tiles {
            if set.by_coord.contains_key(&tile.coord) {
                log::warn!("Duplicate interactive tile at {}, ignoring", tile.coord);
                continue;
            }
            set.by_coord.insert(tile.coord, set.tiles.len());
            set.tiles.push(tile);
        }
        set
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, coord: IVec2) -> Option<&InteractiveTile> {
        self.by_coord.get(&coord).map(|&i| &self.tiles[i])
    }

    pub fn get_mut(&mut self, coord: IVec2) -> Option<&mut InteractiveTile> {
        self.by_coord.get(&coord).map(|&i| &mut self.tiles[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &InteractiveTile> {
        self.tiles.iter()
    }

    /// Current colliders, in ingestion order
    pub fn colliders(&self) -> impl Iterator<Item = Rect> + '_ {
        self.tiles.iter().map(InteractiveTile::rect)
    }

    /// Strike the first idle tile overlapping `probe`, if any
    pub fn strike_first(&mut self, probe: Rect, bounce: &Bounce) -> Option<IVec2> {
        let tile = self
            .tiles
            .iter_mut()
            .find(|t| !t.is_animating() && probe.intersects(&t.rect()))?;
        tile.strike(bounce);
        log::debug!("Tile struck at {}", tile.coord);
        Some(tile.coord)
    }

    /// Advance every bouncing tile; returns the cells that settled this tick
    pub fn advance(&mut self, bounce: &Bounce) -> Vec<IVec2> {
        let mut settled = Vec::new();
        for tile in &mut self.tiles {
            if tile.advance(bounce) {
                log::debug!("Tile settled at {}", tile.coord);
                settled.push(tile.coord);
            }
        }
        settled
    }
}
