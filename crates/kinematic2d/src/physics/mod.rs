//! Physics module for raycast collision resolution
//!
//! Movement is resolved kinematically: no forces, no rigid-body response.
//! Bodies ask to move by a displacement and rays against a collision mask
//! decide how much of it they get.

pub mod collision;
pub mod collision_layers;
pub mod controller;
pub mod platform;
pub mod raycast;

#[cfg(test)]
mod tests;

pub use collision::{Aabb2, GeometryError, Ray2, RayHit, Segment2};
pub use collision_layers::LayerMask;
pub use controller::{Controller2D, ControllerError, KinematicMover};
pub use platform::{
    PassengerMovement, PassengerRegistry, PlatformError, PlatformTick, PlatformTransporter,
};
pub use raycast::{CollisionState, CollisionSweeper, RayOriginCalculator, RayOrigins, RaySpacing};
