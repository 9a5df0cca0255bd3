//! Basic geometric primitives for ray casting
//!
//! Contains rays, ray hits, axis-aligned boxes and line segments (ramps).

use crate::foundation::collections::BodyHandle;
use crate::foundation::math::Vec2;
use thiserror::Error;

/// A ray for ray casting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray2 {
    /// The origin point of the ray in world space
    pub origin: Vec2,
    /// The direction of the ray (normalized)
    pub direction: Vec2,
}

impl Ray2 {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The body that was hit
    pub body: BodyHandle,
    /// The distance from the ray origin to the hit point
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec2,
    /// The surface normal at the intersection point, facing the ray
    pub normal: Vec2,
}

/// Geometry invariant violations
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GeometryError {
    /// A bounding box has no area left after the skin inset
    #[error("bounding box is degenerate after skin inset ({width} x {height})")]
    DegenerateBounds {
        /// Width after inset
        width: f32,
        /// Height after inset
        height: f32,
    },
}

/// Axis-aligned bounding box in world coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner of the bounding box
    pub min: Vec2,
    /// Maximum corner of the bounding box
    pub max: Vec2,
}

impl Aabb2 {
    /// Create a new AABB from min and max points
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Create an AABB centered at a point with given half extents
    pub fn from_center_half_extents(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// Width along X
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height along Y
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Shrink every side inward by `margin`.
    ///
    /// Fails if the result has no positive width or height.
    pub fn shrunk(&self, margin: f32) -> Result<Self, GeometryError> {
        let inset = Vec2::new(margin, margin);
        let shrunk = Self::new(self.min + inset, self.max - inset);
        let (width, height) = (shrunk.width(), shrunk.height());
        if width > 0.0 && height > 0.0 {
            Ok(shrunk)
        } else {
            Err(GeometryError::DegenerateBounds { width, height })
        }
    }

    /// Test ray intersection with this AABB using the slab method.
    ///
    /// Returns the entry distance and the face normal of the entry point.
    /// Rays starting strictly inside the box report no hit.
    pub fn intersect_ray(&self, ray: &Ray2) -> Option<(f32, Vec2)> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut normal = Vec2::zeros();

        for axis in 0..2 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir.abs() <= f32::EPSILON {
                // Parallel to this slab: must already be inside it
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let (mut t0, mut t1) = ((lo - origin) * inv, (hi - origin) * inv);
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                normal = Vec2::zeros();
                normal[axis] = -dir.signum();
            }
            t_exit = t_exit.min(t1);
        }

        if t_enter > t_exit || t_enter < 0.0 || !t_enter.is_finite() {
            return None;
        }
        Some((t_enter, normal))
    }
}

/// A line segment, used for ramps and other sloped surfaces
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    /// First endpoint
    pub a: Vec2,
    /// Second endpoint
    pub b: Vec2,
}

impl Segment2 {
    /// Creates a new segment
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    /// Unit normal of the segment, oriented to point up (or right for vertical segments)
    pub fn up_normal(&self) -> Vec2 {
        let edge = self.b - self.a;
        let mut n = Vec2::new(-edge.y, edge.x);
        if n.y < 0.0 || (n.y == 0.0 && n.x < 0.0) {
            n = -n;
        }
        n.normalize()
    }

    /// Ray-segment intersection.
    ///
    /// Returns the distance along the ray and the segment normal turned to
    /// face the ray.
    pub fn intersect_ray(&self, ray: &Ray2) -> Option<(f32, Vec2)> {
        const EPSILON: f32 = 1.0e-6;

        let edge = self.b - self.a;
        let denom = ray.direction.perp(&edge);
        if denom.abs() < EPSILON {
            return None; // Parallel
        }

        let to_a = self.a - ray.origin;
        let t = to_a.perp(&edge) / denom;
        let s = to_a.perp(&ray.direction) / denom;
        if t < 0.0 || !(0.0..=1.0).contains(&s) {
            return None;
        }

        let mut normal = self.up_normal();
        if normal.dot(&ray.direction) > 0.0 {
            normal = -normal;
        }
        Some((t, normal))
    }
}
