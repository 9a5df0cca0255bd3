//! Passenger bookkeeping
//!
//! [`PassengerMovement`] is the per-tick plan for one carried body. The
//! [`PassengerRegistry`] owns the mover of every body a platform may carry;
//! bodies are registered when they spawn and unregistered when they leave the
//! world.

use crate::foundation::collections::{BodyHandle, BodySideMap};
use crate::foundation::math::Vec2;
use crate::physics::controller::KinematicMover;

/// How one passenger is pushed during a platform tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassengerMovement {
    /// Carried body
    pub body: BodyHandle,
    /// Push to apply through the passenger's own mover
    pub velocity: Vec2,
    /// Passenger rides on top of the platform
    pub standing_on_platform: bool,
    /// Push is applied before the platform itself moves
    pub move_before_platform: bool,
}

impl PassengerMovement {
    /// Create a passenger movement record
    pub fn new(
        body: BodyHandle,
        velocity: Vec2,
        standing_on_platform: bool,
        move_before_platform: bool,
    ) -> Self {
        Self {
            body,
            velocity,
            standing_on_platform,
            move_before_platform,
        }
    }
}

/// Movers of every body that platforms may carry, keyed by body
#[derive(Debug, Default, Clone)]
pub struct PassengerRegistry {
    movers: BodySideMap<KinematicMover>,
}

impl PassengerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mover under its body. Returns the mover it replaced, if any.
    pub fn register(&mut self, mover: KinematicMover) -> Option<KinematicMover> {
        let body = mover.body();
        log::debug!("Registering passenger {body:?}");
        self.movers.insert(body, mover)
    }

    /// Remove a body's mover
    pub fn unregister(&mut self, body: BodyHandle) -> Option<KinematicMover> {
        let removed = self.movers.remove(body);
        if removed.is_some() {
            log::debug!("Unregistered passenger {body:?}");
        }
        removed
    }

    /// Whether a body has a registered mover
    pub fn contains(&self, body: BodyHandle) -> bool {
        self.movers.contains_key(body)
    }

    /// Mover of a body
    pub fn get(&self, body: BodyHandle) -> Option<&KinematicMover> {
        self.movers.get(body)
    }

    /// Mutable mover of a body
    pub fn get_mut(&mut self, body: BodyHandle) -> Option<&mut KinematicMover> {
        self.movers.get_mut(body)
    }

    /// Number of registered movers
    pub fn len(&self) -> usize {
        self.movers.len()
    }

    /// Whether no movers are registered
    pub fn is_empty(&self) -> bool {
        self.movers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RaycastConfig;
    use crate::physics::collision_layers::LayerMask;
    use crate::spatial::ColliderWorld;

    #[test]
    fn test_register_and_unregister() {
        let mut world = ColliderWorld::new();
        let body = world.insert_box(Vec2::zeros(), Vec2::new(0.5, 0.5), LayerMask::PLAYER);
        let mover = KinematicMover::new(&world, body, RaycastConfig::default()).unwrap();

        let mut registry = PassengerRegistry::new();
        assert!(registry.register(mover).is_none());
        assert!(registry.contains(body));
        assert_eq!(registry.get(body).map(KinematicMover::body), Some(body));
        assert_eq!(registry.len(), 1);

        assert!(registry.unregister(body).is_some());
        assert!(!registry.contains(body));
        assert!(registry.unregister(body).is_none());
        assert!(registry.is_empty());
    }
}
