//! Platform motion
//!
//! A platform either moves with a constant velocity or travels a waypoint
//! path. Both produce a displacement per tick; the transporter does not care
//! which.

use crate::core::config::{PlatformMotion, WaypointConfig};
use crate::foundation::math::Vec2;

/// Waypoint path in world space with its travel progress
#[derive(Debug, Clone, PartialEq)]
pub struct WaypointPath {
    waypoints: Vec<Vec2>,
    speed: f32,
    cyclic: bool,
    wait_time: f32,
    ease_amount: f32,
    from_index: usize,
    percent_between: f32,
    wait_remaining: f32,
}

impl WaypointPath {
    /// Build a path from local waypoints relative to `origin`
    pub fn new(config: &WaypointConfig, origin: Vec2) -> Self {
        if config.local_waypoints.len() == 1 {
            log::warn!("Waypoint path has a single point; the platform will not move");
        }
        Self {
            waypoints: config.local_waypoints.iter().map(|p| p + origin).collect(),
            speed: config.speed,
            cyclic: config.cyclic,
            wait_time: config.wait_time,
            ease_amount: config.ease_amount,
            from_index: 0,
            percent_between: 0.0,
            wait_remaining: 0.0,
        }
    }

    /// World-space waypoints, in current travel order
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Advance by `delta_time` and return the displacement from `current`
    pub fn advance(&mut self, current: Vec2, delta_time: f32) -> Vec2 {
        let count = self.waypoints.len();
        if count < 2 {
            return Vec2::zeros();
        }
        if self.wait_remaining > 0.0 {
            self.wait_remaining -= delta_time;
            return Vec2::zeros();
        }

        self.from_index %= count;
        let to_index = (self.from_index + 1) % count;
        let from = self.waypoints[self.from_index];
        let to = self.waypoints[to_index];

        let distance = (to - from).norm();
        if distance <= f32::EPSILON {
            self.percent_between = 1.0;
        } else {
            self.percent_between += delta_time * self.speed / distance;
        }
        self.percent_between = self.percent_between.clamp(0.0, 1.0);

        let eased = ease(self.percent_between, self.ease_amount);
        let target = from.lerp(&to, eased);

        if self.percent_between >= 1.0 {
            self.percent_between = 0.0;
            self.from_index += 1;
            if !self.cyclic && self.from_index >= count - 1 {
                self.from_index = 0;
                self.waypoints.reverse();
            }
            self.wait_remaining = self.wait_time;
        }

        target - current
    }
}

/// Symmetric ease-in-out; `amount = 0` is linear
fn ease(x: f32, amount: f32) -> f32 {
    let a = amount + 1.0;
    let rising = x.powf(a);
    rising / (rising + (1.0 - x).powf(a))
}

/// Runtime state of a platform's motion
#[derive(Debug, Clone, PartialEq)]
pub enum MotionState {
    /// Constant velocity in units per second
    Constant(Vec2),
    /// Waypoint path
    Path(WaypointPath),
}

impl MotionState {
    /// Build runtime state for a platform starting at `origin`
    pub fn from_config(motion: &PlatformMotion, origin: Vec2) -> Self {
        match motion {
            PlatformMotion::Constant(velocity) => Self::Constant(*velocity),
            PlatformMotion::Waypoints(path) => Self::Path(WaypointPath::new(path, origin)),
        }
    }

    /// Displacement for the next tick
    pub fn displacement(&mut self, current: Vec2, delta_time: f32) -> Vec2 {
        match self {
            Self::Constant(velocity) => *velocity * delta_time,
            Self::Path(path) => path.advance(current, delta_time),
        }
    }
}
