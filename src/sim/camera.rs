//! Camera that follows a target and stays inside the world

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Camera {
    /// Visible region in world pixels; size is the viewport and never changes
    pub view: Rect,
    /// World extent in pixels
    pub world_size: IVec2,
}

impl Camera {
    pub fn new(viewport: IVec2, world_size: IVec2) -> Self {
        Self {
            view: Rect::from_pos_size(IVec2::ZERO, viewport),
            world_size,
        }
    }

    #[inline]
    pub fn viewport(&self) -> IVec2 {
        self.view.size()
    }

    /// Center the view on `target`, clamped per axis to the world
    ///
    /// On an axis where the world is smaller than the viewport the view is
    /// pinned to 0.
    pub fn update(&mut self, target: IVec2) {
        let viewport = self.viewport();
        let desired = target - viewport / 2;
        let max = self.world_size - viewport;
        let clamp = |desired: i32, max: i32| if max >= 0 { desired.clamp(0, max) } else { 0 };
        self.view.x = clamp(desired.x, max.x);
        self.view.y = clamp(desired.y, max.y);
    }

    /// Convert a world rectangle to screen coordinates
    pub fn to_screen(&self, rect: Rect) -> Rect {
        rect.translated(-self.view.pos())
    }
}
