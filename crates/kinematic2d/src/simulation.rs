//! Fixed-step simulation loop
//!
//! [`Simulation`] owns the collision world, the passenger registry, every
//! platform and the player. One call to [`Simulation::step`] is one tick:
//! platforms move first, each finishing its passengers before the next
//! platform starts, then the player motor runs.

use std::path::Path;

use thiserror::Error;

use crate::actor::{PlayerInput, PlayerMotor};
use crate::config::{Config, ConfigError};
use crate::core::config::{SimulationConfig, SolidConfig};
use crate::foundation::collections::BodyHandle;
use crate::foundation::math::Vec2;
use crate::physics::collision_layers::LayerMask;
use crate::physics::controller::{ControllerError, KinematicMover};
use crate::physics::platform::{PassengerRegistry, PlatformError, PlatformTick, PlatformTransporter};
use crate::physics::raycast::CollisionState;
use crate::spatial::{BodyStore, ColliderWorld};

/// Simulation errors
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A mover failed
    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),

    /// A platform failed
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// The player's mover is missing from the registry
    #[error("player {0:?} has no registered mover")]
    MissingPlayer(BodyHandle),
}

/// What happened during one tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick number, starting at 1
    pub tick: u64,
    /// Player center after the tick
    pub player_position: Vec2,
    /// Player collision snapshot
    pub collisions: CollisionState,
    /// Per-platform results, in platform order
    pub platforms: Vec<PlatformTick>,
}

/// Single-threaded tick loop for one level
#[derive(Debug)]
pub struct Simulation {
    config: SimulationConfig,
    world: ColliderWorld,
    registry: PassengerRegistry,
    platforms: Vec<PlatformTransporter>,
    player: BodyHandle,
    motor: PlayerMotor,
    tick: u64,
}

impl Simulation {
    /// Build the level described by `config`
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let mut world = ColliderWorld::new();
        for solid in &config.level.solids {
            match *solid {
                SolidConfig::Box {
                    center,
                    half_extents,
                } => world.insert_box(center, half_extents, LayerMask::ENVIRONMENT),
                SolidConfig::Ramp { from, to } => world.insert_ramp(from, to, LayerMask::ENVIRONMENT),
            };
        }

        let mut platforms = Vec::with_capacity(config.level.platforms.len());
        for spawn in &config.level.platforms {
            let body = world.insert_box(spawn.center, spawn.half_extents, LayerMask::PLATFORM);
            platforms.push(PlatformTransporter::new(&world, body, &spawn.platform)?);
        }

        let player = world.insert_box(
            config.level.player_spawn,
            config.level.player_half_extents,
            LayerMask::PLAYER,
        );
        let mut registry = PassengerRegistry::new();
        registry.register(KinematicMover::new(&world, player, config.controller)?);

        let motor = PlayerMotor::new(config.player)?;

        log::info!(
            "Simulation ready: {} bodies, {} platforms, {} Hz",
            world.len(),
            platforms.len(),
            config.tick_rate
        );

        Ok(Self {
            motor,
            config,
            world,
            registry,
            platforms,
            player,
            tick: 0,
        })
    }

    /// Load a level file (`.toml` or `.ron`) and build it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        Self::new(SimulationConfig::load_from_file(path)?)
    }

    /// Add a box passenger (a prop or another actor) that platforms can carry
    pub fn spawn_passenger(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
        layers: LayerMask,
    ) -> Result<BodyHandle, SimulationError> {
        let body = self.world.insert_box(center, half_extents, layers);
        match KinematicMover::new(&self.world, body, self.config.controller) {
            Ok(mover) => {
                self.registry.register(mover);
                Ok(body)
            }
            Err(err) => {
                self.world.remove(body);
                Err(err.into())
            }
        }
    }

    /// Remove a passenger from the world and the registry
    pub fn despawn(&mut self, body: BodyHandle) -> bool {
        self.registry.unregister(body);
        self.world.remove(body).is_some()
    }

    /// Run one tick
    pub fn step(&mut self, input: PlayerInput) -> Result<TickReport, SimulationError> {
        let delta_time = self.config.tick_duration();
        self.tick += 1;

        let mut platforms = Vec::with_capacity(self.platforms.len());
        for platform in &mut self.platforms {
            platforms.push(platform.update(&mut self.world, &mut self.registry, delta_time)?);
        }

        let mover = self
            .registry
            .get_mut(self.player)
            .ok_or(SimulationError::MissingPlayer(self.player))?;
        let collisions = self.motor.update(mover, &mut self.world, input, delta_time)?;
        let player_position = self
            .world
            .position(self.player)
            .ok_or(SimulationError::MissingPlayer(self.player))?;

        log::trace!("Tick {}: player at {player_position:?}", self.tick);

        Ok(TickReport {
            tick: self.tick,
            player_position,
            collisions,
            platforms,
        })
    }

    /// Collision world
    pub fn world(&self) -> &ColliderWorld {
        &self.world
    }

    /// Player body
    pub fn player(&self) -> BodyHandle {
        self.player
    }

    /// Player motor
    pub fn motor(&self) -> &PlayerMotor {
        &self.motor
    }

    /// Platforms in update order
    pub fn platforms(&self) -> &[PlatformTransporter] {
        &self.platforms
    }

    /// Passenger registry
    pub fn registry(&self) -> &PassengerRegistry {
        &self.registry
    }

    /// Ticks run so far
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Configuration the level was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
