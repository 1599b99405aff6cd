//! Axis-separated collision resolution against solid rectangles
//!
//! A body is moved along one axis at a time and then pushed back out of any
//! collider it ended up overlapping. The direction of travel for the pass is
//! read once, before any correction, so every overlapping collider is
//! resolved against the same direction and the last correction stands.

use glam::IVec2;

use super::body::KinematicBody;
use super::rect::{Axis, Rect};

/// Result of resolving one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisContact {
    /// Whether any collider overlapped the body during the pass
    pub hit: bool,
    /// Axis that was resolved
    pub axis: Axis,
    /// Surface normal of the last collider that stopped the body
    /// (zero when nothing stopped it, e.g. embedded at rest)
    pub normal: IVec2,
    /// Index, in the order supplied, of the last overlapping collider
    pub collider: Option<usize>,
}

impl AxisContact {
    pub fn miss(axis: Axis) -> Self {
        Self {
            hit: false,
            axis,
            normal: IVec2::ZERO,
            collider: None,
        }
    }

    /// A downward move was stopped by something underneath
    #[inline]
    pub fn landed(&self) -> bool {
        self.axis == Axis::Vertical && self.normal == IVec2::NEG_Y
    }

    /// An upward move was stopped by something overhead
    #[inline]
    pub fn bumped_head(&self) -> bool {
        self.axis == Axis::Vertical && self.normal == IVec2::Y
    }
}

/// Resolve the body's overlap with `colliders` along `axis`
///
/// Colliders are visited in the order given. Moving in the positive
/// direction snaps the body's leading edge to the collider's near edge, and
/// symmetrically for the negative direction. A body with zero velocity on the
/// axis that is already embedded is left where it is. Any overlap zeroes the
/// velocity component and re-derives the continuous position from the box.
///
/// Colliders must be non-degenerate; level ingestion filters the rest.
pub fn resolve_axis<I>(body: &mut KinematicBody, colliders: I, axis: Axis) -> AxisContact
where
    I: IntoIterator<Item = Rect>,
{
    let direction = body.vel_on(axis);
    let mut contact = AxisContact::miss(axis);

    for (index, collider) in colliders.into_iter().enumerate() {
        let mut rect = body.rect();
        if !rect.intersects(&collider) {
            continue;
        }
        log::trace!("Collision with {:?} on {:?} axis", collider, axis);

        let normal = match axis {
            Axis::Horizontal if direction > 0.0 => {
                rect.set_right(collider.left());
                IVec2::NEG_X
            }
            Axis::Horizontal if direction < 0.0 => {
                rect.x = collider.right();
                IVec2::X
            }
            Axis::Vertical if direction > 0.0 => {
                rect.set_bottom(collider.top());
                IVec2::NEG_Y
            }
            Axis::Vertical if direction < 0.0 => {
                rect.y = collider.bottom();
                IVec2::Y
            }
            _ => IVec2::ZERO,
        };

        body.place_rect(axis, rect);
        body.set_vel_on(axis, 0.0);

        contact.hit = true;
        contact.collider = Some(index);
        if normal != IVec2::ZERO {
            contact.normal = normal;
        }
    }

    contact
}

/// Move the body by its full velocity on `axis`, then resolve that axis
pub fn move_and_resolve<I>(body: &mut KinematicBody, colliders: I, axis: Axis) -> AxisContact
where
    I: IntoIterator<Item = Rect>,
{
    body.move_axis(axis);
    resolve_axis(body, colliders, axis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use proptest::prelude::*;

    fn body_at(x: f32, y: f32, vel: Vec2) -> KinematicBody {
        let mut body = KinematicBody::new(Vec2::new(x, y), IVec2::new(16, 16));
        body.vel = vel;
        body
    }

    #[test]
    fn test_moving_right_snaps_to_left_edge() {
        let wall = Rect::new(40, 0, 16, 64);
        let mut body = body_at(20.0, 10.0, Vec2::new(8.0, 0.0));
        let contact = move_and_resolve(&mut body, [wall], Axis::Horizontal);

        assert!(contact.hit);
        assert_eq!(contact.normal, IVec2::NEG_X);
        assert_eq!(contact.collider, Some(0));
        assert_eq!(body.rect().right(), 40);
        assert_eq!(body.pos.x, 24.0);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_moving_left_snaps_to_right_edge() {
        let wall = Rect::new(0, 0, 16, 64);
        let mut body = body_at(20.0, 10.0, Vec2::new(-6.0, 0.0));
        let contact = move_and_resolve(&mut body, [wall], Axis::Horizontal);

        assert_eq!(contact.normal, IVec2::X);
        assert_eq!(body.rect().left(), 16);
        assert_eq!(body.vel.x, 0.0);
    }

    #[test]
    fn test_falling_lands_on_floor() {
        let floor = Rect::new(0, 304, 480, 16);
        let mut body = body_at(100.0, 286.0, Vec2::new(0.0, 4.0));
        let contact = move_and_resolve(&mut body, [floor], Axis::Vertical);

        assert!(contact.landed());
        assert_eq!(body.rect().bottom(), 304);
        assert_eq!(body.pos.y, 288.0);
        assert_eq!(body.vel.y, 0.0);
    }

    #[test]
    fn test_rising_bumps_head() {
        let ceiling = Rect::new(0, 0, 480, 16);
        let mut body = body_at(100.0, 20.0, Vec2::new(0.0, -8.0));
        let contact = move_and_resolve(&mut body, [ceiling], Axis::Vertical);

        assert!(contact.bumped_head());
        assert_eq!(body.rect().top(), 16);
    }

    #[test]
    fn test_embedded_at_rest_is_not_pushed_out() {
        let block = Rect::new(0, 0, 32, 32);
        let mut body = body_at(8.0, 8.0, Vec2::ZERO);
        let contact = resolve_axis(&mut body, [block], Axis::Horizontal);

        assert!(contact.hit);
        assert_eq!(contact.normal, IVec2::ZERO);
        assert_eq!(body.rect(), Rect::new(8, 8, 16, 16));
        assert!(body.rect().intersects(&block));
    }

    #[test]
    fn test_no_overlap_is_a_miss() {
        let floor = Rect::new(0, 304, 480, 16);
        let mut body = body_at(100.0, 200.0, Vec2::new(0.0, 5.0));
        let contact = move_and_resolve(&mut body, [floor], Axis::Vertical);

        assert_eq!(contact, AxisContact::miss(Axis::Vertical));
        assert_eq!(body.vel.y, 5.0);
    }

    #[test]
    fn test_multiple_overlaps_last_correction_wins() {
        // Two stacked floor pieces, deeper one listed first
        let lower = Rect::new(0, 112, 64, 16);
        let upper = Rect::new(0, 100, 64, 16);
        let mut body = body_at(10.0, 90.0, Vec2::new(0.0, 10.0));
        let contact = move_and_resolve(&mut body, [lower, upper], Axis::Vertical);

        assert_eq!(contact.collider, Some(1));
        assert_eq!(body.rect().bottom(), 100);
        assert!(!body.rect().intersects(&lower));
        assert!(!body.rect().intersects(&upper));
    }

    #[test]
    fn test_horizontal_pass_ignores_vertical_velocity() {
        let mut body = body_at(0.0, 0.0, Vec2::new(5.0, 5.0));
        let wall = Rect::new(20, 0, 16, 16);
        let contact = move_and_resolve(&mut body, [wall], Axis::Horizontal);

        assert!(contact.hit);
        assert_eq!(body.rect().pos(), IVec2::new(4, 0));
        assert_eq!(body.vel.y, 5.0);
    }

    proptest! {
        #[test]
        fn prop_no_tunneling_horizontal(
            start_x in -200i32..200,
            gap in 0i32..32,
            speed in 0.0f32..=16.0,
            wall_width in 16i32..64,
            y in -50i32..50,
        ) {
            let mut body = body_at(start_x as f32, y as f32, Vec2::new(speed, 0.0));
            let wall = Rect::new(start_x + 16 + gap, y - 8, wall_width, 32);
            move_and_resolve(&mut body, [wall], Axis::Horizontal);

            prop_assert!(!body.rect().intersects(&wall));
            prop_assert!(body.rect().right() <= wall.left());
        }

        #[test]
        fn prop_no_tunneling_falling(
            start_y in -200i32..200,
            gap in 0i32..32,
            speed in 0.0f32..=16.0,
            floor_height in 16i32..48,
        ) {
            let mut body = body_at(0.0, start_y as f32, Vec2::new(0.0, speed));
            let floor = Rect::new(-32, start_y + 16 + gap, 96, floor_height);
            let contact = move_and_resolve(&mut body, [floor], Axis::Vertical);

            prop_assert!(!body.rect().intersects(&floor));
            prop_assert!(body.rect().bottom() <= floor.top());
            if contact.hit {
                prop_assert!(contact.landed());
                prop_assert_eq!(body.rect().bottom(), floor.top());
            }
        }
    }
}
