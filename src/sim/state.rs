//! Simulation state and the per-tick snapshot handed to a renderer

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::body::KinematicBody;
use super::camera::Camera;
use super::rect::Rect;
use super::tile::{Bounce, TileSet};
use crate::level::Level;
use crate::settings::PhysicsConfig;

/// Something notable that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimEvent {
    /// A jump was issued from the ground
    Jumped,
    /// The body came to rest on a floor after being airborne
    Landed,
    /// An upward move was stopped by a ceiling
    HeadBump,
    /// An interactive tile started bouncing
    TileStruck { coord: IVec2 },
    /// An interactive tile finished bouncing
    TileSettled { coord: IVec2 },
}

/// Everything the simulation mutates, for a single actor in a single level
#[derive(Debug, Clone)]
pub struct SimState {
    pub config: PhysicsConfig,
    /// Static geometry, never mutated by a tick; its tiles live in `tiles`
    pub level: Level,
    pub body: KinematicBody,
    pub tiles: TileSet,
    pub camera: Camera,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl SimState {
    pub fn new(mut level: Level, config: PhysicsConfig) -> Self {
        let body = KinematicBody::new(level.spawn, config.body_size);
        let tiles = TileSet::new(level.take_tiles());
        let mut camera = Camera::new(config.viewport, level.world_size);
        camera.update(body.rect().center());

        Self {
            config,
            level,
            body,
            tiles,
            camera,
            time_ticks: 0,
        }
    }

    pub fn bounce(&self) -> Bounce {
        Bounce::from_config(&self.config)
    }

    /// Static colliders followed by the interactive tiles' current colliders
    pub fn colliders(&self) -> impl Iterator<Item = Rect> + '_ {
        collider_chain(&self.level, &self.tiles)
    }

    /// Resolved post-tick state in world coordinates
    pub fn snapshot(&self) -> Frame {
        Frame {
            tick: self.time_ticks,
            body_pos: self.body.pos,
            body_rect: self.body.rect(),
            velocity: self.body.vel,
            grounded: self.body.grounded,
            tiles: self
                .tiles
                .iter()
                .map(|t| TileFrame {
                    coord: t.coord,
                    rect: t.rect(),
                    offset_y: t.offset_y,
                })
                .collect(),
            view: self.camera.view,
        }
    }
}

/// Collision set in resolver order: static geometry, then interactive tiles
pub(crate) fn collider_chain<'a>(
    level: &'a Level,
    tiles: &'a TileSet,
) -> impl Iterator<Item = Rect> + 'a {
    level.solids().iter().copied().chain(tiles.colliders())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileFrame {
    pub coord: IVec2,
    pub rect: Rect,
    pub offset_y: f32,
}

/// What a renderer reads after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub body_pos: Vec2,
    pub body_rect: Rect,
    pub velocity: Vec2,
    pub grounded: bool,
    pub tiles: Vec<TileFrame>,
    /// Camera view; subtract its position for screen coordinates
    pub view: Rect,
}
