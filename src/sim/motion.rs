//! Horizontal scroll movement shared by every moving entity
//!
//! Lanes recycle seamlessly: an entity whose trailing edge fully leaves one
//! side of the screen re-enters with its leading edge at the opposite side,
//! so a lane never loses an entity.

use crate::consts::SCREEN_WIDTH;
use crate::sim::entity::Motion;

/// Advance an x coordinate by one frame of scrolling, wrapping at the edges
pub fn scroll_x(x: f32, half_width: f32, motion: &Motion, dt: f32) -> f32 {
    if motion.moving_right {
        let to_x = x + motion.speed * dt;
        if to_x - half_width >= SCREEN_WIDTH {
            -half_width
        } else {
            to_x
        }
    } else {
        let to_x = x - motion.speed * dt;
        if to_x + half_width <= 0.0 {
            SCREEN_WIDTH + half_width
        } else {
            to_x
        }
    }
}

/// A Reversible entity flips when its leading edge reaches either boundary
pub fn should_reverse(x: f32, half_width: f32, motion: &Motion) -> bool {
    (!motion.moving_right && x < half_width)
        || (motion.moving_right && x > SCREEN_WIDTH - half_width)
}
