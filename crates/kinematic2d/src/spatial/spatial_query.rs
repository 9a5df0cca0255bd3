//! Abstract query interface consumed by the movers
//!
//! The controller never owns collision geometry. It asks a [`RayCaster`] for
//! the nearest hit along a ray and moves bodies through a [`BodyStore`]. Any
//! world that implements both is a [`PhysicsWorld`]; [`ColliderWorld`] is the
//! reference implementation.
//!
//! [`ColliderWorld`]: crate::spatial::ColliderWorld

use crate::foundation::collections::BodyHandle;
use crate::foundation::math::Vec2;
use crate::physics::collision::{Aabb2, RayHit};
use crate::physics::collision_layers::LayerMask;

/// Read-only ray query against collision geometry
pub trait RayCaster {
    /// Cast a ray and return the nearest hit within `max_distance`.
    ///
    /// Only bodies whose layers intersect `mask` are considered. `direction`
    /// does not need to be normalized.
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit>;
}

/// Access to the position and extents of box-shaped bodies
pub trait BodyStore {
    /// Current center position of a body
    fn position(&self, body: BodyHandle) -> Option<Vec2>;

    /// Half extents of a box body; `None` for unknown or non-box bodies
    fn half_extents(&self, body: BodyHandle) -> Option<Vec2>;

    /// Translate a body by `delta`. Returns `false` if the body is unknown.
    fn translate(&mut self, body: BodyHandle, delta: Vec2) -> bool;

    /// World-space bounds of a box body
    fn bounds(&self, body: BodyHandle) -> Option<Aabb2> {
        let center = self.position(body)?;
        let half_extents = self.half_extents(body)?;
        Some(Aabb2::from_center_half_extents(center, half_extents))
    }
}

/// A world that can both answer ray queries and move bodies
pub trait PhysicsWorld: RayCaster + BodyStore {}

impl<T: RayCaster + BodyStore + ?Sized> PhysicsWorld for T {}
