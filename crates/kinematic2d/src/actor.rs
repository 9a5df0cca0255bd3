//! Player motor
//!
//! Turns per-tick input into the velocity a [`KinematicMover`] is asked to
//! resolve. Jump height and the horizontal distance to the apex define the
//! jump arc; gravity and jump velocity are derived from them.

use crate::config::ConfigError;
use crate::core::config::PlayerConfig;
use crate::foundation::math::utils::smooth_damp;
use crate::foundation::math::Vec2;
use crate::physics::controller::{ControllerError, KinematicMover};
use crate::physics::raycast::CollisionState;
use crate::spatial::PhysicsWorld;

/// Input for one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlayerInput {
    /// Horizontal axis in `[-1, 1]`
    pub horizontal: f32,
    /// Jump pressed this tick
    pub jump: bool,
}

impl PlayerInput {
    /// Input with only a horizontal axis value
    pub fn horizontal(value: f32) -> Self {
        Self {
            horizontal: value,
            jump: false,
        }
    }

    /// Input with the jump button pressed
    pub fn jump() -> Self {
        Self {
            horizontal: 0.0,
            jump: true,
        }
    }
}

/// Velocity integrator for a player-controlled body
#[derive(Debug, Clone)]
pub struct PlayerMotor {
    config: PlayerConfig,
    gravity: f32,
    jump_velocity: f32,
    velocity: Vec2,
    velocity_x_smoothing: f32,
    facing_right: bool,
}

impl PlayerMotor {
    /// Create a motor and derive its jump kinematics.
    ///
    /// Fails if the speed, jump height or apex distance is not positive.
    pub fn new(config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let time_to_apex = config.distance_to_jump_max / config.move_speed;
        let jump_velocity = 2.0 * config.jump_height / time_to_apex;
        let gravity = -2.0 * config.jump_height / time_to_apex.powi(2);
        log::debug!("Player gravity {gravity:.3}, jump velocity {jump_velocity:.3}");

        Ok(Self {
            config,
            gravity,
            jump_velocity,
            velocity: Vec2::zeros(),
            velocity_x_smoothing: 0.0,
            facing_right: true,
        })
    }

    /// Downward acceleration in units per second squared (negative)
    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    /// Initial upward speed of a jump
    pub fn jump_velocity(&self) -> f32 {
        self.jump_velocity
    }

    /// Current velocity in units per second
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether the player last moved right
    pub fn facing_right(&self) -> bool {
        self.facing_right
    }

    /// Integrate one tick of input and move the body through `mover`
    pub fn update<W: PhysicsWorld + ?Sized>(
        &mut self,
        mover: &mut KinematicMover,
        world: &mut W,
        input: PlayerInput,
        delta_time: f32,
    ) -> Result<CollisionState, ControllerError> {
        let last = *mover.collisions();

        if last.above || last.below {
            self.velocity.y = 0.0;
        }
        if input.jump && last.below {
            self.velocity.y = self.jump_velocity;
        }

        let target_velocity_x = input.horizontal.clamp(-1.0, 1.0) * self.config.move_speed;
        let smoothing = if last.below {
            self.config.acceleration_time_grounded
        } else {
            self.config.acceleration_time_airborne
        };
        self.velocity.x = smooth_damp(
            self.velocity.x,
            target_velocity_x,
            &mut self.velocity_x_smoothing,
            smoothing,
            delta_time,
        );
        self.velocity.y += self.gravity * delta_time;

        if self.velocity.x > 0.0 {
            self.facing_right = true;
        } else if self.velocity.x < 0.0 {
            self.facing_right = false;
        }

        mover.move_by(world, self.velocity * delta_time)
    }
}
