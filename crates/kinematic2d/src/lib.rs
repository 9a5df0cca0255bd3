//! # kinematic2d
//!
//! A raycast-based kinematic character controller for 2D platformers.
//!
//! ## Features
//!
//! - **Axis Sweeps**: Horizontal then vertical ray rows clamp each move to the nearest hit
//! - **Slope Climbing**: Horizontal intent is re-projected onto climbable inclines
//! - **Moving Platforms**: Passengers are lifted, shoved and carried through their own movers
//! - **Collision Layers**: Bitmask filtering for solids and passengers
//! - **Config Files**: Levels and tunables load from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust
//! use kinematic2d::prelude::*;
//!
//! fn main() -> Result<(), SimulationError> {
//!     let mut sim = Simulation::new(SimulationConfig::default())?;
//!     for _ in 0..60 {
//!         let report = sim.step(PlayerInput::horizontal(1.0))?;
//!         if report.collisions.just_landed() {
//!             println!("landed at {:?}", report.player_position);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod core;

pub mod actor;
pub mod config;
pub mod foundation;
pub mod physics;
pub mod simulation;
pub mod spatial;

pub use simulation::{Simulation, SimulationError, TickReport};

/// Common imports for controller users
pub mod prelude {
    pub use crate::{
        actor::{PlayerInput, PlayerMotor},
        config::{Config, ConfigError},
        core::config::{
            LevelConfig, PlatformConfig, PlatformMotion, PlayerConfig, RaycastConfig,
            SimulationConfig, WaypointConfig,
        },
        foundation::{collections::BodyHandle, math::Vec2},
        physics::{
            CollisionState, Controller2D, ControllerError, KinematicMover, LayerMask,
            PassengerRegistry, PlatformError, PlatformTransporter,
        },
        spatial::{BodyStore, ColliderWorld, PhysicsWorld, RayCaster},
        Simulation, SimulationError, TickReport,
    };
}
