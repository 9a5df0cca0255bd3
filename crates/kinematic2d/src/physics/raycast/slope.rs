//! Slope climbing
//!
//! Turns horizontal intent into movement along a climbable incline.

use crate::foundation::math::utils::{deg_to_rad, direction_sign};
use crate::foundation::math::Vec2;
use crate::physics::raycast::CollisionState;

/// Re-project `velocity` onto a slope of `slope_angle` degrees.
///
/// The horizontal distance is kept and split into a climb along the slope.
/// Nothing happens when the body already rises faster than the climb would
/// lift it, so a jump is never flattened by a slope. Returns whether the
/// climb was applied.
pub fn climb(velocity: &mut Vec2, slope_angle: f32, state: &mut CollisionState) -> bool {
    let move_distance = velocity.x.abs();
    let radians = deg_to_rad(slope_angle);
    let climb_velocity_y = move_distance * radians.sin();

    if velocity.y > climb_velocity_y {
        return false;
    }

    velocity.y = climb_velocity_y;
    velocity.x = move_distance * radians.cos() * direction_sign(velocity.x);
    state.below = true;
    state.climbing_slope = true;
    state.slope_angle = slope_angle;
    true
}
