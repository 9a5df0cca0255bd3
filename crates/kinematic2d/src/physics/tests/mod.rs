//! Scenario tests for movers and platforms against a collision world


use std::cell::Cell;

use crate::foundation::collections::BodyHandle;
use crate::foundation::math::Vec2;
use crate::physics::collision::RayHit;
use crate::physics::collision_layers::LayerMask;
use crate::spatial::{BodyStore, ColliderWorld, RayCaster};

/// Ground slab whose top surface is `y = 0`
pub(super) fn ground(world: &mut ColliderWorld) -> BodyHandle {
    world.insert_box(Vec2::new(0.0, -0.5), Vec2::new(20.0, 0.5), LayerMask::ENVIRONMENT)
}

/// Unit player box centered at `center`
pub(super) fn player(world: &mut ColliderWorld, center: Vec2) -> BodyHandle {
    world.insert_box(center, Vec2::new(0.5, 0.5), LayerMask::PLAYER)
}

/// World wrapper that counts ray casts
#[derive(Default)]
pub(super) struct RecordingWorld {
    pub world: ColliderWorld,
    pub casts: Cell<usize>,
}

impl RayCaster for RecordingWorld {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        self.casts.set(self.casts.get() + 1);
        self.world.cast_ray(origin, direction, max_distance, mask)
    }
}

impl BodyStore for RecordingWorld {
    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.world.position(body)
    }

    fn half_extents(&self, body: BodyHandle) -> Option<Vec2> {
        self.world.half_extents(body)
    }

    fn translate(&mut self, body: BodyHandle, delta: Vec2) -> bool {
        self.world.translate(body, delta)
    }
}

/// World whose passenger-mask casts always report `target` at skin distance,
/// so every passenger ray of a platform finds the same body
pub(super) struct EverywhereWorld {
    pub world: ColliderWorld,
    pub target: BodyHandle,
    pub distance: f32,
}

impl RayCaster for EverywhereWorld {
    fn cast_ray(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RayHit> {
        if !mask.accepts(LayerMask::PLAYER) || self.distance > max_distance {
            return None;
        }
        Some(RayHit {
            body: self.target,
            distance: self.distance,
            point: origin + direction.normalize() * self.distance,
            normal: -direction.normalize(),
        })
    }
}

impl BodyStore for EverywhereWorld {
    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.world.position(body)
    }

    fn half_extents(&self, body: BodyHandle) -> Option<Vec2> {
        self.world.half_extents(body)
    }

    fn translate(&mut self, body: BodyHandle, delta: Vec2) -> bool {
        self.world.translate(body, delta)
    }
}
