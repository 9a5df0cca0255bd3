//! Axis sweeps
//!
//! A sweep casts one row of parallel rays along a single axis and clamps that
//! axis of the velocity to the nearest hit. The horizontal sweep must run
//! before the vertical one: vertical rays are shifted by the resolved
//! horizontal movement so they test where the body will actually be.

use crate::foundation::math::utils::{angle_between_deg, direction_sign};
use crate::foundation::math::{right, up, Vec2};
use crate::physics::raycast::{slope, CollisionState, RayOriginCalculator};
use crate::spatial::RayCaster;

/// Casts rows of rays for one body against its collision mask
pub struct CollisionSweeper<'a, C: ?Sized> {
    caster: &'a C,
    rays: &'a RayOriginCalculator,
}

impl<'a, C: RayCaster + ?Sized> CollisionSweeper<'a, C> {
    /// Create a sweeper over up-to-date ray origins
    pub fn new(caster: &'a C, rays: &'a RayOriginCalculator) -> Self {
        Self { caster, rays }
    }

    /// Clamp `velocity.x` against walls and climb slopes met by the bottom ray
    pub fn sweep_horizontal(&self, velocity: &mut Vec2, state: &mut CollisionState) {
        let config = self.rays.config();
        let skin = config.skin_width;
        let direction_x = direction_sign(velocity.x);
        let mut ray_length = velocity.x.abs() + skin;

        for i in 0..self.rays.spacing().horizontal_count {
            let origin = self.rays.horizontal_ray_origin(i, direction_x);
            let Some(hit) =
                self.caster
                    .cast_ray(origin, right() * direction_x, ray_length, config.collision_mask)
            else {
                continue;
            };

            let slope_angle = angle_between_deg(hit.normal, up());
            log::trace!(
                "Horizontal ray {i} hit {:?} at {:.4} (slope {slope_angle:.1})",
                hit.body,
                hit.distance
            );

            if i == 0 && slope_angle <= config.max_climb_angle {
                // Walk up to the start of a new slope before climbing it
                let mut distance_to_slope_start = 0.0;
                if slope_angle != state.slope_angle_old {
                    distance_to_slope_start = hit.distance - skin;
                    velocity.x -= distance_to_slope_start * direction_x;
                }
                slope::climb(velocity, slope_angle, state);
                velocity.x += distance_to_slope_start * direction_x;
            }

            if !state.climbing_slope || slope_angle > config.max_climb_angle {
                velocity.x = (hit.distance - skin) * direction_x;
                ray_length = hit.distance;

                state.left = direction_x == -1.0;
                state.right = direction_x == 1.0;
            }
        }
    }

    /// Clamp `velocity.y` against floors and ceilings
    pub fn sweep_vertical(&self, velocity: &mut Vec2, state: &mut CollisionState) {
        let config = self.rays.config();
        let skin = config.skin_width;
        let direction_y = direction_sign(velocity.y);
        let mut ray_length = velocity.y.abs() + skin;

        for i in 0..self.rays.spacing().vertical_count {
            let origin = self.rays.vertical_ray_origin(i, direction_y, velocity.x);
            let Some(hit) =
                self.caster
                    .cast_ray(origin, up() * direction_y, ray_length, config.collision_mask)
            else {
                continue;
            };
            log::trace!("Vertical ray {i} hit {:?} at {:.4}", hit.body, hit.distance);

            velocity.y = (hit.distance - skin) * direction_y;
            ray_length = hit.distance;

            state.below = direction_y == -1.0;
            state.above = direction_y == 1.0;
        }
    }
}
