//! Fixed-step simulation tick
//!
//! One tick runs, in order: input to velocity, gravity and jump, horizontal
//! move and resolve, vertical move and resolve, strike detection, tile
//! animation, camera. The order is fixed; the horizontal pass never sees
//! this tick's vertical displacement.

use serde::{Deserialize, Serialize};

use super::collision::move_and_resolve;
use super::rect::Axis;
use super::state::{SimEvent, SimState, collider_chain};
use super::tile::Bounce;

/// Held inputs for a single tick, sampled once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Jump button held
    pub jump: bool,
}

impl TickInput {
    /// -1, 0 or 1 along x
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.right as i32 as f32 - self.left as i32 as f32
    }

    /// -1, 0 or 1 along y (down is positive)
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.down as i32 as f32 - self.up as i32 as f32
    }
}

/// Result of one or more ticks
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated, in the order they happened
    pub events: Vec<SimEvent>,
}

impl TickResult {
    pub fn contains(&self, event: &SimEvent) -> bool {
        self.events.contains(event)
    }
}

/// Advance the simulation by one tick
pub fn tick(state: &mut SimState, input: &TickInput) -> TickResult {
    let mut result = TickResult::default();
    state.time_ticks += 1;

    let SimState {
        config,
        level,
        body,
        tiles,
        camera,
        ..
    } = state;
    let bounce = Bounce::from_config(config);
    let was_grounded = body.grounded;

    // Velocity is set from input each tick, not accumulated
    body.vel.x = input.horizontal() * config.move_speed;
    if config.gravity_enabled() {
        body.vel.y = (body.vel.y + config.gravity).min(config.max_fall_speed);
        if input.jump && was_grounded {
            body.vel.y = -config.jump_force;
            log::debug!("Jump at ({}, {})", body.pos.x, body.pos.y);
            result.events.push(SimEvent::Jumped);
        }
    } else {
        body.vel.y = input.vertical() * config.move_speed;
    }

    move_and_resolve(body, collider_chain(level, tiles), Axis::Horizontal);

    body.grounded = false;
    let contact = move_and_resolve(body, collider_chain(level, tiles), Axis::Vertical);
    if contact.landed() {
        body.grounded = true;
        if !was_grounded {
            result.events.push(SimEvent::Landed);
        }
    } else if contact.bumped_head() {
        result.events.push(SimEvent::HeadBump);
    }

    // Only one tile may be struck per tick, and never on a head-bump tick
    if config.gravity_enabled() && body.vel.y < 0.0 {
        let probe = body.head_probe(config.strike_probe_height);
        if let Some(coord) = tiles.strike_first(probe, &bounce) {
            result.events.push(SimEvent::TileStruck { coord });
        }
    }

    for coord in tiles.advance(&bounce) {
        result.events.push(SimEvent::TileSettled { coord });
    }

    camera.update(body.rect().center());

    result
}

/// Run `ticks` ticks with the same input snapshot
pub fn advance(state: &mut SimState, input: &TickInput, ticks: u32) -> TickResult {
    let mut result = TickResult::default();
    for _ in 0..ticks {
        result.events.extend(tick(state, input).events);
    }
    result
}
