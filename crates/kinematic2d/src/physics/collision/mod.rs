//! Collision geometry used by the ray casts
//!
//! # Module Organization
//!
//! - [`primitives`] - Rays, hits, axis-aligned boxes and ramp segments
//!
//! Bodies are always axis-aligned boxes; segments exist so a collision world
//! can present sloped ground to the rays.

pub mod primitives;

pub use primitives::{Aabb2, GeometryError, Ray2, RayHit, Segment2};
