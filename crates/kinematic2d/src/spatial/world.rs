//! Reference collision world
//!
//! Stores bodies in a slot map and answers ray queries by testing every body
//! in the mask. Good enough for levels of a few hundred bodies; larger worlds
//! should put a broad phase behind [`RayCaster`] instead.

use serde::{Deserialize, Serialize};

use crate::foundation::collections::{BodyHandle, BodyMap};
use crate::foundation::math::Vec2;
use crate::physics::collision::{Aabb2, Ray2, RayHit, Segment2};
use crate::physics::collision_layers::LayerMask;
use crate::spatial::spatial_query::{BodyStore, RayCaster};

/// Shape of a body, relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Axis-aligned box
    Box {
        /// Half width and half height
        half_extents: Vec2,
    },
    /// Sloped surface between two points
    Ramp {
        /// Start point, relative to the body position
        from: Vec2,
        /// End point, relative to the body position
        to: Vec2,
    },
}

/// A body stored in a [`ColliderWorld`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// World-space position (box center, or ramp origin)
    pub position: Vec2,
    /// Collision shape
    pub shape: ColliderShape,
    /// Layers this body sits on
    pub layers: LayerMask,
}

impl Body {
    /// Test a ray against this body's shape
    fn intersect_ray(&self, ray: &Ray2) -> Option<(f32, Vec2)> {
        match self.shape {
            ColliderShape::Box { half_extents } => {
                Aabb2::from_center_half_extents(self.position, half_extents).intersect_ray(ray)
            }
            ColliderShape::Ramp { from, to } => {
                Segment2::new(self.position + from, self.position + to).intersect_ray(ray)
            }
        }
    }
}

/// Collision world holding boxes and ramps
#[derive(Debug, Default, Clone)]
pub struct ColliderWorld {
    bodies: BodyMap<Body>,
}

impl ColliderWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body and return its handle
    pub fn insert(&mut self, body: Body) -> BodyHandle {
        self.bodies.insert(body)
    }

    /// Insert an axis-aligned box
    pub fn insert_box(&mut self, center: Vec2, half_extents: Vec2, layers: LayerMask) -> BodyHandle {
        self.insert(Body {
            position: center,
            shape: ColliderShape::Box { half_extents },
            layers,
        })
    }

    /// Insert a ramp between two world-space points
    pub fn insert_ramp(&mut self, from: Vec2, to: Vec2, layers: LayerMask) -> BodyHandle {
        self.insert(Body {
            position: from,
            shape: ColliderShape::Ramp {
                from: Vec2::zeros(),
                to: to - from,
            },
            layers,
        })
    }

    /// Remove a body
    pub fn remove(&mut self, body: BodyHandle) -> Option<Body> {
        self.bodies.remove(body)
    }

    /// Look up a body
    pub fn get(&self, body: BodyHandle) -> Option<&Body> {
        self.bodies.get(body)
    }

    /// Number of bodies in the world
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate over all bodies
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies.iter()
    }
}

impl RayCaster for ColliderWorld {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if direction.norm_squared() <= f32::EPSILON || max_distance < 0.0 {
            return None;
        }
        let ray = Ray2::new(origin, direction);

        let mut nearest: Option<RayHit> = None;
        for (handle, body) in self.bodies.iter().filter(|(_, b)| mask.accepts(b.layers)) {
            let Some((distance, normal)) = body.intersect_ray(&ray) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if nearest.map_or(true, |best| distance < best.distance) {
                nearest = Some(RayHit {
                    body: handle,
                    distance,
                    point: ray.point_at(distance),
                    normal,
                });
            }
        }
        nearest
    }
}

impl BodyStore for ColliderWorld {
    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(body).map(|b| b.position)
    }

    fn half_extents(&self, body: BodyHandle) -> Option<Vec2> {
        match self.bodies.get(body)?.shape {
            ColliderShape::Box { half_extents } => Some(half_extents),
            ColliderShape::Ramp { .. } => None,
        }
    }

    fn translate(&mut self, body: BodyHandle, delta: Vec2) -> bool {
        match self.bodies.get_mut(body) {
            Some(b) => {
                b.position += delta;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nearest_hit_wins() {
        let mut world = ColliderWorld::new();
        let far = world.insert_box(Vec2::new(5.0, 0.0), Vec2::new(0.5, 0.5), LayerMask::ENVIRONMENT);
        let near = world.insert_box(Vec2::new(2.0, 0.0), Vec2::new(0.5, 0.5), LayerMask::ENVIRONMENT);

        let hit = world
            .cast_ray(Vec2::zeros(), Vec2::new(1.0, 0.0), 10.0, LayerMask::ENVIRONMENT)
            .unwrap();
        assert_eq!(hit.body, near);
        assert_ne!(hit.body, far);
        assert_relative_eq!(hit.distance, 1.5, epsilon = 1e-6);
        assert_relative_eq!(hit.point, Vec2::new(1.5, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_mask_filters_bodies() {
        let mut world = ColliderWorld::new();
        world.insert_box(Vec2::new(2.0, 0.0), Vec2::new(0.5, 0.5), LayerMask::PLAYER);
        let hit = world.cast_ray(Vec2::zeros(), Vec2::new(1.0, 0.0), 10.0, LayerMask::ENVIRONMENT);
        assert!(hit.is_none());
    }

    #[test]
    fn test_max_distance_limits_hits() {
        let mut world = ColliderWorld::new();
        world.insert_box(Vec2::new(2.0, 0.0), Vec2::new(0.5, 0.5), LayerMask::ENVIRONMENT);
        assert!(world
            .cast_ray(Vec2::zeros(), Vec2::new(1.0, 0.0), 1.4, LayerMask::ENVIRONMENT)
            .is_none());
        assert!(world
            .cast_ray(Vec2::zeros(), Vec2::new(1.0, 0.0), 1.5, LayerMask::ENVIRONMENT)
            .is_some());
    }

    #[test]
    fn test_ramp_reports_slope_normal() {
        let mut world = ColliderWorld::new();
        let ramp = world.insert_ramp(Vec2::new(0.0, 0.0), Vec2::new(4.0, 4.0), LayerMask::ENVIRONMENT);
        let hit = world
            .cast_ray(Vec2::new(-1.0, 1.0), Vec2::new(1.0, 0.0), 5.0, LayerMask::ENVIRONMENT)
            .unwrap();
        assert_eq!(hit.body, ramp);
        assert_relative_eq!(hit.normal, Vec2::new(-1.0, 1.0).normalize(), epsilon = 1e-5);
        assert!(world.half_extents(ramp).is_none());
    }

    #[test]
    fn test_translate_and_bounds() {
        let mut world = ColliderWorld::new();
        let body = world.insert_box(Vec2::zeros(), Vec2::new(0.5, 1.0), LayerMask::PLAYER);
        assert!(world.translate(body, Vec2::new(1.0, 2.0)));
        let bounds = world.bounds(body).unwrap();
        assert_relative_eq!(bounds.min, Vec2::new(0.5, 1.0), epsilon = 1e-6);
        assert_relative_eq!(bounds.max, Vec2::new(1.5, 3.0), epsilon = 1e-6);

        world.remove(body);
        assert!(!world.translate(body, Vec2::zeros()));
        assert!(world.is_empty());
    }
}
