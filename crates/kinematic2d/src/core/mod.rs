//! Core configuration shared by every subsystem

pub mod config;

pub use config::{
    LevelConfig, PlatformConfig, PlatformMotion, PlatformSpawn, PlayerConfig, RaycastConfig,
    SimulationConfig, SolidConfig, WaypointConfig,
};
