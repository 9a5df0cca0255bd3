//! Math utilities and types
//!
//! Provides the 2D math types used by the controller. Everything is `f32`
//! and world units; +Y is up, +X is right.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// World up direction
pub fn up() -> Vec2 {
    Vec2::new(0.0, 1.0)
}

/// World right direction
pub fn right() -> Vec2 {
    Vec2::new(1.0, 0.0)
}

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Vec2};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }

    /// Direction of travel along an axis: `-1.0` for negative values, `1.0` otherwise.
    ///
    /// Zero maps to `1.0`. Unlike `f32::signum` this also holds for `-0.0`,
    /// which matters when a caller compares the result against `-1.0`.
    pub fn direction_sign(value: f32) -> f32 {
        if value < 0.0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Unsigned angle between two vectors in degrees, in `[0, 180]`.
    ///
    /// Returns `0.0` if either vector has zero length.
    pub fn angle_between_deg(a: Vec2, b: Vec2) -> f32 {
        let denom = (a.norm_squared() * b.norm_squared()).sqrt();
        if denom <= f32::EPSILON {
            return 0.0;
        }
        let cos = (a.dot(&b) / denom).clamp(-1.0, 1.0);
        rad_to_deg(cos.acos())
    }

    /// Gradually moves `current` toward `target` with a critically damped spring.
    ///
    /// `velocity` carries the spring state between calls and must be owned by
    /// the caller. `smooth_time` is roughly the time to reach the target.
    pub fn smooth_damp(
        current: f32,
        target: f32,
        velocity: &mut f32,
        smooth_time: f32,
        delta_time: f32,
    ) -> f32 {
        let smooth_time = smooth_time.max(1.0e-4);
        if delta_time <= 0.0 {
            return current;
        }

        let omega = 2.0 / smooth_time;
        let x = omega * delta_time;
        let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

        let change = current - target;
        let temp = (*velocity + omega * change) * delta_time;
        *velocity = (*velocity - omega * temp) * exp;
        let mut output = target + (change + temp) * exp;

        // Never overshoot the target
        if (target - current > 0.0) == (output > target) {
            output = target;
            *velocity = (output - target) / delta_time;
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::utils::*;
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direction_sign_treats_zero_as_positive() {
        assert_eq!(direction_sign(0.0), 1.0);
        assert_eq!(direction_sign(-0.0), 1.0);
        assert_eq!(direction_sign(3.5), 1.0);
        assert_eq!(direction_sign(-0.01), -1.0);
    }

    #[test]
    fn test_angle_between_up_and_normals() {
        assert_relative_eq!(angle_between_deg(up(), up()), 0.0, epsilon = 1e-4);
        assert_relative_eq!(angle_between_deg(right(), up()), 90.0, epsilon = 1e-4);

        let ramp_normal = Vec2::new(-1.0, 1.0).normalize();
        assert_relative_eq!(angle_between_deg(ramp_normal, up()), 45.0, epsilon = 1e-3);
    }

    #[test]
    fn test_angle_between_zero_vector() {
        assert_eq!(angle_between_deg(Vec2::zeros(), up()), 0.0);
    }

    #[test]
    fn test_degree_radian_roundtrip() {
        assert_relative_eq!(rad_to_deg(deg_to_rad(80.0)), 80.0, epsilon = 1e-4);
        assert_relative_eq!(deg_to_rad(180.0), constants::PI, epsilon = 1e-6);
    }

    #[test]
    fn test_smooth_damp_converges_without_overshoot() {
        let mut value = 0.0;
        let mut velocity = 0.0;
        for _ in 0..240 {
            value = smooth_damp(value, 6.0, &mut velocity, 0.1, 1.0 / 60.0);
            assert!(value <= 6.0);
        }
        assert_relative_eq!(value, 6.0, epsilon = 1e-3);
    }

    #[test]
    fn test_smooth_damp_zero_delta_is_noop() {
        let mut velocity = 2.0;
        assert_eq!(smooth_damp(1.0, 5.0, &mut velocity, 0.2, 0.0), 1.0);
        assert_eq!(velocity, 2.0);
    }
}
