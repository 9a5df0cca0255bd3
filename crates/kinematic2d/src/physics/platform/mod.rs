//! Moving platforms
//!
//! A [`PlatformTransporter`] moves one box-shaped platform and carries the
//! bodies around it. Every tick it scans for passengers with rays against its
//! passenger mask, then pushes them through their own movers:
//!
//! 1. Vertical rays in the direction of vertical travel find bodies the
//!    platform lifts or pushes down. An upward platform also carries them
//!    sideways.
//! 2. Horizontal rays in the direction of horizontal travel find bodies the
//!    platform shoves aside.
//! 3. For downward or purely horizontal travel, short rays up from the top
//!    edge find bodies resting on the platform; they receive the full
//!    platform displacement.
//!
//! Passengers from the first two passes move before the platform, those from
//! the third move after it. A body found more than once is pushed once.

mod passengers;
mod waypoints;

pub use passengers::{PassengerMovement, PassengerRegistry};
pub use waypoints::{MotionState, WaypointPath};

use std::collections::HashSet;

use thiserror::Error;

use crate::core::config::PlatformConfig;
use crate::foundation::collections::BodyHandle;
use crate::foundation::math::utils::direction_sign;
use crate::foundation::math::{right, up, Vec2};
use crate::physics::collision::GeometryError;
use crate::physics::collision_layers::LayerMask;
use crate::physics::controller::ControllerError;
use crate::physics::raycast::RayOriginCalculator;
use crate::spatial::{BodyStore, PhysicsWorld, RayCaster};

/// Errors raised while moving a platform
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A detected passenger has no mover in the registry
    #[error("passenger {0:?} has no registered mover")]
    UnregisteredPassenger(BodyHandle),

    /// The platform body is missing from the world or is not a box
    #[error("platform {0:?} is not a box body in this world")]
    UnknownPlatform(BodyHandle),

    /// A passenger's own mover failed
    #[error("failed to move passenger {body:?}")]
    Passenger {
        /// Passenger body
        body: BodyHandle,
        /// Mover error
        #[source]
        source: ControllerError,
    },

    /// Platform bounds violate the skin inset
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Invalid platform configuration
    #[error("invalid platform configuration: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Outcome of one platform tick
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformTick {
    /// How far the platform moved
    pub displacement: Vec2,
    /// Passengers pushed this tick, in detection order
    pub passengers: Vec<PassengerMovement>,
}

/// Moves one platform and the passengers around it
#[derive(Debug, Clone)]
pub struct PlatformTransporter {
    body: BodyHandle,
    rays: RayOriginCalculator,
    passenger_mask: LayerMask,
    motion: MotionState,
}

impl PlatformTransporter {
    /// Create a transporter for `body`, which must be a box in `world`
    pub fn new<W: BodyStore + ?Sized>(
        world: &W,
        body: BodyHandle,
        config: &PlatformConfig,
    ) -> Result<Self, PlatformError> {
        config.validate()?;
        let center = world.position(body).ok_or(PlatformError::UnknownPlatform(body))?;
        let half_extents = world
            .half_extents(body)
            .ok_or(PlatformError::UnknownPlatform(body))?;
        let rays = RayOriginCalculator::new(config.raycast, center, half_extents)?;
        Ok(Self {
            body,
            rays,
            passenger_mask: config.passenger_mask,
            motion: MotionState::from_config(&config.motion, center),
        })
    }

    /// Platform body
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Advance the platform's motion by `delta_time` and carry its passengers
    pub fn update<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &mut PassengerRegistry,
        delta_time: f32,
    ) -> Result<PlatformTick, PlatformError> {
        let position = world
            .position(self.body)
            .ok_or(PlatformError::UnknownPlatform(self.body))?;
        let velocity = self.motion.displacement(position, delta_time);
        self.transport(world, registry, velocity)
    }

    /// Move the platform by `velocity` (already scaled to one tick) and carry
    /// its passengers.
    ///
    /// Every detected passenger must be registered; nothing moves otherwise.
    pub fn transport<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        registry: &mut PassengerRegistry,
        velocity: Vec2,
    ) -> Result<PlatformTick, PlatformError> {
        let center = world
            .position(self.body)
            .ok_or(PlatformError::UnknownPlatform(self.body))?;
        let half_extents = world
            .half_extents(self.body)
            .ok_or(PlatformError::UnknownPlatform(self.body))?;
        self.rays.update(center, half_extents)?;

        let passengers = self.calculate_passenger_movement(&*world, velocity);
        if let Some(missing) = passengers.iter().find(|p| !registry.contains(p.body)) {
            return Err(PlatformError::UnregisteredPassenger(missing.body));
        }

        Self::move_passengers(world, registry, &passengers, true)?;
        if !world.translate(self.body, velocity) {
            return Err(PlatformError::UnknownPlatform(self.body));
        }
        Self::move_passengers(world, registry, &passengers, false)?;

        Ok(PlatformTick {
            displacement: velocity,
            passengers,
        })
    }

    /// Work out how each passenger must be pushed for a platform move of
    /// `velocity`. Ray origins must be current.
    pub fn calculate_passenger_movement<C: RayCaster + ?Sized>(
        &self,
        caster: &C,
        velocity: Vec2,
    ) -> Vec<PassengerMovement> {
        let skin = self.rays.config().skin_width;
        let spacing = self.rays.spacing();
        let direction_x = direction_sign(velocity.x);
        let direction_y = direction_sign(velocity.y);

        let mut moved: HashSet<BodyHandle> = HashSet::new();
        let mut movements = Vec::new();
        let mut schedule = |movement: PassengerMovement| {
            if moved.insert(movement.body) {
                log::trace!(
                    "Platform {:?} schedules {:?} by {:?} (standing: {}, before: {})",
                    self.body,
                    movement.body,
                    movement.velocity,
                    movement.standing_on_platform,
                    movement.move_before_platform
                );
                movements.push(movement);
            }
        };

        // Lifting or pushing down
        if velocity.y != 0.0 {
            let ray_length = velocity.y.abs() + skin;
            for i in 0..spacing.vertical_count {
                let origin = self.rays.vertical_ray_origin(i, direction_y, 0.0);
                if let Some(hit) =
                    caster.cast_ray(origin, up() * direction_y, ray_length, self.passenger_mask)
                {
                    let push_y = velocity.y - (hit.distance - skin) * direction_y;
                    let push_x = if direction_y == 1.0 { velocity.x } else { 0.0 };
                    schedule(PassengerMovement::new(
                        hit.body,
                        Vec2::new(push_x, push_y),
                        direction_y == 1.0,
                        true,
                    ));
                }
            }
        }

        // Shoving sideways
        if velocity.x != 0.0 {
            let ray_length = velocity.x.abs() + skin;
            for i in 0..spacing.horizontal_count {
                let origin = self.rays.horizontal_ray_origin(i, direction_x);
                if let Some(hit) =
                    caster.cast_ray(origin, right() * direction_x, ray_length, self.passenger_mask)
                {
                    let push_x = velocity.x - (hit.distance - skin) * direction_x;
                    schedule(PassengerMovement::new(
                        hit.body,
                        Vec2::new(push_x, -skin),
                        false,
                        true,
                    ));
                }
            }
        }

        // Riding on top of a platform moving down or sideways
        if direction_y == -1.0 || (velocity.y == 0.0 && velocity.x != 0.0) {
            let ray_length = 2.0 * skin;
            for i in 0..spacing.vertical_count {
                let origin = self.rays.vertical_ray_origin(i, 1.0, 0.0);
                if let Some(hit) = caster.cast_ray(origin, up(), ray_length, self.passenger_mask) {
                    schedule(PassengerMovement::new(hit.body, velocity, true, false));
                }
            }
        }

        movements
    }

    fn move_passengers<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        registry: &mut PassengerRegistry,
        passengers: &[PassengerMovement],
        before_platform: bool,
    ) -> Result<(), PlatformError> {
        for passenger in passengers
            .iter()
            .filter(|p| p.move_before_platform == before_platform)
        {
            let mover = registry
                .get_mut(passenger.body)
                .ok_or(PlatformError::UnregisteredPassenger(passenger.body))?;
            mover
                .move_with_hint(world, passenger.velocity, passenger.standing_on_platform)
                .map_err(|source| PlatformError::Passenger {
                    body: passenger.body,
                    source,
                })?;
        }
        Ok(())
    }
}
