//! Kinematic character controller
//!
//! [`KinematicMover`] resolves one requested displacement per tick for a
//! box-shaped body: it resets the collision record, refreshes the ray
//! origins, sweeps horizontally then vertically, and translates the body by
//! whatever is left of the request.
//!
//! # Example
//!
//! ```
//! use kinematic2d::prelude::*;
//!
//! let mut world = ColliderWorld::new();
//! world.insert_box(Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5), LayerMask::ENVIRONMENT);
//! let player = world.insert_box(Vec2::new(0.0, 0.6), Vec2::new(0.5, 0.5), LayerMask::PLAYER);
//!
//! let mut mover = KinematicMover::new(&world, player, RaycastConfig::default()).unwrap();
//! let collisions = mover.move_by(&mut world, Vec2::new(0.0, -1.0)).unwrap();
//! assert!(collisions.below);
//! ```

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::config::RaycastConfig;
use crate::foundation::collections::BodyHandle;
use crate::foundation::math::Vec2;
use crate::physics::collision::GeometryError;
use crate::physics::raycast::{CollisionState, CollisionSweeper, RayOriginCalculator};
use crate::spatial::{BodyStore, PhysicsWorld};

/// Errors raised while moving a body
#[derive(Error, Debug)]
pub enum ControllerError {
    /// The body is missing from the world or is not a box
    #[error("body {0:?} is not a box body in this world")]
    UnknownBody(BodyHandle),

    /// Bounding box invariant violated
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Invalid raycast configuration
    #[error("invalid controller configuration: {0}")]
    Config(#[from] ConfigError),
}

/// Raycast-driven mover for one box-shaped body
#[derive(Debug, Clone)]
pub struct KinematicMover {
    body: BodyHandle,
    rays: RayOriginCalculator,
    collisions: CollisionState,
}

/// Name used by platformer code for the single-body mover
pub type Controller2D = KinematicMover;

impl KinematicMover {
    /// Create a mover for `body`, which must be a box in `world`
    pub fn new<W: BodyStore + ?Sized>(
        world: &W,
        body: BodyHandle,
        config: RaycastConfig,
    ) -> Result<Self, ControllerError> {
        config.validate()?;
        let center = world.position(body).ok_or(ControllerError::UnknownBody(body))?;
        let half_extents = world.half_extents(body).ok_or(ControllerError::UnknownBody(body))?;
        let rays = RayOriginCalculator::new(config, center, half_extents)?;
        Ok(Self {
            body,
            rays,
            collisions: CollisionState::default(),
        })
    }

    /// Body this mover drives
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Collision record of the last step
    pub fn collisions(&self) -> &CollisionState {
        &self.collisions
    }

    /// Raycast configuration in use, with ray counts clamped
    pub fn config(&self) -> &RaycastConfig {
        self.rays.config()
    }

    /// Move the body by `velocity` (already scaled to one tick)
    pub fn move_by<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        velocity: Vec2,
    ) -> Result<CollisionState, ControllerError> {
        self.move_with_hint(world, velocity, false)
    }

    /// Move the body by `velocity`, optionally flagged as carried by a platform.
    ///
    /// A body standing on a platform always reports `below`, even if its own
    /// vertical rays did not fire this step.
    pub fn move_with_hint<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        velocity: Vec2,
        standing_on_platform: bool,
    ) -> Result<CollisionState, ControllerError> {
        let mut state = CollisionState::begin_step(&self.collisions, velocity);
        let center = world
            .position(self.body)
            .ok_or(ControllerError::UnknownBody(self.body))?;
        let half_extents = world
            .half_extents(self.body)
            .ok_or(ControllerError::UnknownBody(self.body))?;
        self.rays.update(center, half_extents)?;

        let mut velocity = velocity;
        {
            let sweeper = CollisionSweeper::new(&*world, &self.rays);
            if velocity.x != 0.0 {
                sweeper.sweep_horizontal(&mut velocity, &mut state);
            }
            if velocity.y != 0.0 {
                sweeper.sweep_vertical(&mut velocity, &mut state);
            }
        }

        if !world.translate(self.body, velocity) {
            return Err(ControllerError::UnknownBody(self.body));
        }

        if standing_on_platform {
            state.below = true;
        }

        self.collisions = state;
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::collision_layers::LayerMask;
    use crate::spatial::ColliderWorld;
    use approx::assert_relative_eq;

    fn world_with_player(center: Vec2) -> (ColliderWorld, BodyHandle) {
        let mut world = ColliderWorld::new();
        world.insert_box(Vec2::new(0.0, -0.5), Vec2::new(10.0, 0.5), LayerMask::ENVIRONMENT);
        let player = world.insert_box(center, Vec2::new(0.5, 0.5), LayerMask::PLAYER);
        (world, player)
    }

    #[test]
    fn test_free_move_translates_fully() {
        let (mut world, player) = world_with_player(Vec2::new(0.0, 3.0));
        let mut mover = KinematicMover::new(&world, player, RaycastConfig::default()).unwrap();

        let state = mover.move_by(&mut world, Vec2::new(0.3, -0.2)).unwrap();
        assert!(!state.any());
        assert_relative_eq!(world.position(player).unwrap(), Vec2::new(0.3, 2.8), epsilon = 1e-6);
        assert_eq!(state.velocity_old, Vec2::new(0.3, -0.2));
    }

    #[test]
    fn test_fall_lands_on_ground() {
        let (mut world, player) = world_with_player(Vec2::new(0.0, 0.6));
        let mut mover = KinematicMover::new(&world, player, RaycastConfig::default()).unwrap();

        let state = mover.move_by(&mut world, Vec2::new(0.0, -1.0)).unwrap();
        assert!(state.below);
        assert!(state.just_landed());
        assert_relative_eq!(world.position(player).unwrap().y, 0.5, epsilon = 1e-5);
        assert_eq!(mover.collisions(), &state);
    }

    #[test]
    fn test_standing_hint_forces_below() {
        let (mut world, player) = world_with_player(Vec2::new(0.0, 3.0));
        let mut mover = KinematicMover::new(&world, player, RaycastConfig::default()).unwrap();

        let state = mover.move_with_hint(&mut world, Vec2::new(0.1, 0.0), true).unwrap();
        assert!(state.below);
        assert!(!state.left && !state.right);
    }

    #[test]
    fn test_unknown_body_is_reported() {
        let (mut world, player) = world_with_player(Vec2::new(0.0, 3.0));
        let mut mover = KinematicMover::new(&world, player, RaycastConfig::default()).unwrap();
        world.remove(player);

        let err = mover.move_by(&mut world, Vec2::new(0.1, 0.0)).unwrap_err();
        assert!(matches!(err, ControllerError::UnknownBody(body) if body == player));
    }

    #[test]
    fn test_invalid_config_and_degenerate_body_rejected() {
        let (world, player) = world_with_player(Vec2::new(0.0, 3.0));
        let bad = RaycastConfig::default().with_skin_width(-1.0);
        assert!(matches!(
            KinematicMover::new(&world, player, bad),
            Err(ControllerError::Config(_))
        ));

        let mut world = world;
        let sliver = world.insert_box(Vec2::zeros(), Vec2::new(0.01, 0.5), LayerMask::PLAYER);
        assert!(matches!(
            KinematicMover::new(&world, sliver, RaycastConfig::default()),
            Err(ControllerError::Geometry(_))
        ));
    }
}
