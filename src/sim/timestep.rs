//! Wall-clock to tick conversion
//!
//! A frame loop feeds elapsed time in and gets back how many whole ticks to
//! run. Ticks always run to completion; quitting is only checked between them.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::settings::PhysicsConfig;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Seconds per tick
    pub dt: f32,
    /// Upper bound on ticks per frame
    pub max_substeps: u32,
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }

    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self::new(config.tick_dt())
    }

    /// Accumulate `frame_dt` seconds and return the number of ticks due
    ///
    /// Long frames are capped so a stall never triggers a burst of catch-up
    /// ticks beyond `max_substeps`.
    pub fn ticks_due(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks == self.max_substeps && self.accumulator >= self.dt {
            log::debug!(
                "Dropping {:.3}s of simulation time after {} substeps",
                self.accumulator,
                ticks
            );
            self.accumulator = 0.0;
        }
        ticks
    }

    /// Fraction of a tick left in the accumulator, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.dt
    }
}
