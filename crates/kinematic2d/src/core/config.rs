//! # Controller Configuration
//!
//! All tunables for movers, platforms, the player motor and the demo level,
//! gathered in one place. Every structure is serializable so a level can be
//! described in a TOML or RON file and loaded through [`Config`].
//!
//! ## Configuration Categories
//!
//! - **Raycast Config**: masks, ray counts, skin width, climbable slope limit
//! - **Platform Config**: passenger mask and how the platform moves
//! - **Player Config**: run speed, jump shape and acceleration smoothing
//! - **Simulation Config**: tick rate plus the level layout

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec2;
use crate::physics::collision_layers::LayerMask;

/// Inward margin rays start from, in world units
pub const DEFAULT_SKIN_WIDTH: f32 = 0.015;

/// Rays cast per side when nothing else is configured
pub const DEFAULT_RAY_COUNT: usize = 4;

/// Minimum rays per side: one on each corner
pub const MIN_RAY_COUNT: usize = 2;

/// Steepest climbable slope in degrees
pub const DEFAULT_MAX_CLIMB_ANGLE: f32 = 80.0;

/// # Raycast Configuration
///
/// Parameters shared by every ray sweep: what the rays collide with, how many
/// there are per side and how far inside the body they start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaycastConfig {
    /// Layers that block movement
    pub collision_mask: LayerMask,
    /// Rays cast along the vertical extent for horizontal sweeps
    pub horizontal_ray_count: usize,
    /// Rays cast along the horizontal extent for vertical sweeps
    pub vertical_ray_count: usize,
    /// Inset from the body bounds where rays start
    pub skin_width: f32,
    /// Steepest slope, in degrees, that horizontal movement climbs
    pub max_climb_angle: f32,
}

impl RaycastConfig {
    /// Create a raycast configuration colliding with `collision_mask`
    pub fn new(collision_mask: LayerMask) -> Self {
        Self {
            collision_mask,
            horizontal_ray_count: DEFAULT_RAY_COUNT,
            vertical_ray_count: DEFAULT_RAY_COUNT,
            skin_width: DEFAULT_SKIN_WIDTH,
            max_climb_angle: DEFAULT_MAX_CLIMB_ANGLE,
        }
    }

    /// Set ray counts per side
    pub fn with_ray_counts(mut self, horizontal: usize, vertical: usize) -> Self {
        self.horizontal_ray_count = horizontal;
        self.vertical_ray_count = vertical;
        self
    }

    /// Set skin width
    pub fn with_skin_width(mut self, skin_width: f32) -> Self {
        self.skin_width = skin_width;
        self
    }

    /// Set the steepest climbable slope in degrees
    pub fn with_max_climb_angle(mut self, degrees: f32) -> Self {
        self.max_climb_angle = degrees;
        self
    }

    /// Copy of this configuration with ray counts clamped to [`MIN_RAY_COUNT`]
    pub fn sanitized(mut self) -> Self {
        if self.horizontal_ray_count < MIN_RAY_COUNT || self.vertical_ray_count < MIN_RAY_COUNT {
            log::debug!(
                "Clamping ray counts {}x{} to at least {}",
                self.horizontal_ray_count,
                self.vertical_ray_count,
                MIN_RAY_COUNT
            );
        }
        self.horizontal_ray_count = self.horizontal_ray_count.max(MIN_RAY_COUNT);
        self.vertical_ray_count = self.vertical_ray_count.max(MIN_RAY_COUNT);
        self
    }

    /// Validate the configuration
    ///
    /// Ray counts are not checked here; they are clamped instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.skin_width.is_finite() && self.skin_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "skin width must be positive, got {}",
                self.skin_width
            )));
        }
        if !(0.0..=90.0).contains(&self.max_climb_angle) {
            return Err(ConfigError::Invalid(format!(
                "max climb angle must be within [0, 90] degrees, got {}",
                self.max_climb_angle
            )));
        }
        Ok(())
    }
}

impl Default for RaycastConfig {
    fn default() -> Self {
        Self::new(LayerMask::SOLID)
    }
}

/// # Waypoint Path Configuration
///
/// Waypoints are local offsets from the platform's starting position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaypointConfig {
    /// Local waypoints, relative to the platform's start position
    pub local_waypoints: Vec<Vec2>,
    /// Travel speed in units per second
    pub speed: f32,
    /// Loop back to the first waypoint instead of reversing
    pub cyclic: bool,
    /// Seconds to pause at each waypoint
    pub wait_time: f32,
    /// Easing exponent minus one; `0` is linear
    pub ease_amount: f32,
}

impl Default for WaypointConfig {
    fn default() -> Self {
        Self {
            local_waypoints: Vec::new(),
            speed: 3.0,
            cyclic: false,
            wait_time: 0.0,
            ease_amount: 0.0,
        }
    }
}

/// How a platform moves each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlatformMotion {
    /// Constant velocity in units per second
    Constant(Vec2),
    /// Follow a waypoint path
    Waypoints(WaypointConfig),
}

impl Default for PlatformMotion {
    fn default() -> Self {
        Self::Constant(Vec2::zeros())
    }
}

/// # Platform Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Ray counts and skin width for passenger detection
    pub raycast: RaycastConfig,
    /// Layers that count as passengers
    pub passenger_mask: LayerMask,
    /// Platform motion
    pub motion: PlatformMotion,
}

impl PlatformConfig {
    /// Create a platform configuration with the given motion
    pub fn new(motion: PlatformMotion) -> Self {
        Self {
            motion,
            ..Self::default()
        }
    }

    /// Set the passenger mask
    pub fn with_passenger_mask(mut self, mask: LayerMask) -> Self {
        self.passenger_mask = mask;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.raycast.validate()?;
        if let PlatformMotion::Waypoints(path) = &self.motion {
            if !(path.speed.is_finite() && path.speed > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "waypoint speed must be positive, got {}",
                    path.speed
                )));
            }
            if path.wait_time < 0.0 || path.ease_amount < 0.0 {
                return Err(ConfigError::Invalid(
                    "waypoint wait time and ease amount cannot be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            raycast: RaycastConfig::new(LayerMask::empty()),
            passenger_mask: LayerMask::PASSENGERS,
            motion: PlatformMotion::default(),
        }
    }
}

/// # Player Configuration
///
/// Jump shape is given as height and horizontal distance to the apex; gravity
/// and jump velocity are derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Run speed in units per second
    pub move_speed: f32,
    /// Jump apex height
    pub jump_height: f32,
    /// Horizontal distance covered while rising to the apex at full speed
    pub distance_to_jump_max: f32,
    /// Horizontal smoothing time while airborne
    pub acceleration_time_airborne: f32,
    /// Horizontal smoothing time while grounded
    pub acceleration_time_grounded: f32,
}

impl PlayerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("jump_height", self.jump_height),
            ("distance_to_jump_max", self.distance_to_jump_max),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            jump_height: 4.0,
            distance_to_jump_max: 2.5,
            acceleration_time_airborne: 0.2,
            acceleration_time_grounded: 0.1,
        }
    }
}

/// Static level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SolidConfig {
    /// Axis-aligned box
    Box {
        /// Box center
        center: Vec2,
        /// Half width and half height
        half_extents: Vec2,
    },
    /// Sloped ground between two points
    Ramp {
        /// Start point
        from: Vec2,
        /// End point
        to: Vec2,
    },
}

/// A moving platform placed in the level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpawn {
    /// Starting center position
    pub center: Vec2,
    /// Half width and half height
    pub half_extents: Vec2,
    /// Platform behavior
    #[serde(default)]
    pub platform: PlatformConfig,
}

/// Level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Player spawn center
    pub player_spawn: Vec2,
    /// Player half width and half height
    pub player_half_extents: Vec2,
    /// Static geometry
    pub solids: Vec<SolidConfig>,
    /// Moving platforms
    pub platforms: Vec<PlatformSpawn>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            player_spawn: Vec2::new(0.0, 1.0),
            player_half_extents: Vec2::new(0.5, 0.5),
            solids: vec![SolidConfig::Box {
                center: Vec2::new(0.0, -0.5),
                half_extents: Vec2::new(20.0, 0.5),
            }],
            platforms: Vec::new(),
        }
    }
}

/// # Complete Simulation Configuration
///
/// Top-level configuration loaded by applications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed ticks per second
    pub tick_rate: f32,
    /// Player mover settings
    pub controller: RaycastConfig,
    /// Player motor settings
    pub player: PlayerConfig,
    /// Level layout
    pub level: LevelConfig,
}

impl SimulationConfig {
    /// Duration of one tick in seconds
    pub fn tick_duration(&self) -> f32 {
        1.0 / self.tick_rate
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60.0,
            controller: RaycastConfig::default(),
            player: PlayerConfig::default(),
            level: LevelConfig::default(),
        }
    }
}

impl Config for SimulationConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_rate.is_finite() && self.tick_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "tick rate must be positive, got {}",
                self.tick_rate
            )));
        }
        self.controller.validate()?;
        self.player.validate()?;
        for spawn in &self.level.platforms {
            spawn.platform.validate()?;
        }
        Ok(())
    }
}
