//! Per-step collision record

use crate::foundation::math::Vec2;

/// What a mover touched during one movement step.
///
/// A fresh record is built at the start of every step and handed back to the
/// caller as an immutable snapshot once the step finishes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionState {
    /// Hit something while moving up
    pub above: bool,
    /// Hit something while moving down, or climbing a slope
    pub below: bool,
    /// Hit something while moving left
    pub left: bool,
    /// Hit something while moving right
    pub right: bool,
    /// Horizontal movement was redirected up a slope
    pub climbing_slope: bool,
    /// Angle of the slope being climbed, in degrees; `0` when flat
    pub slope_angle: f32,
    /// Slope angle of the previous step
    pub slope_angle_old: f32,
    /// Whether the previous step ended grounded
    pub below_old: bool,
    /// Velocity requested for this step, before any clamping
    pub velocity_old: Vec2,
}

impl CollisionState {
    /// Start a new step from the previous step's record
    pub fn begin_step(previous: &Self, requested: Vec2) -> Self {
        Self {
            slope_angle_old: previous.slope_angle,
            below_old: previous.below,
            velocity_old: requested,
            ..Self::default()
        }
    }

    /// Whether any directional flag is set
    pub fn any(&self) -> bool {
        self.above || self.below || self.left || self.right
    }

    /// First grounded step after at least one step in the air
    pub fn just_landed(&self) -> bool {
        self.below && !self.below_old
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_step_carries_slope_angle_and_grounding() {
        let previous = CollisionState {
            below: true,
            left: true,
            climbing_slope: true,
            slope_angle: 30.0,
            slope_angle_old: 10.0,
            ..CollisionState::default()
        };
        let next = CollisionState::begin_step(&previous, Vec2::new(1.0, -1.0));
        assert!(!next.any());
        assert!(!next.climbing_slope);
        assert_eq!(next.slope_angle, 0.0);
        assert_eq!(next.slope_angle_old, 30.0);
        assert!(next.below_old);
        assert_eq!(next.velocity_old, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_just_landed_only_on_grounding_edge() {
        let airborne = CollisionState::default();
        let mut landed = CollisionState::begin_step(&airborne, Vec2::new(0.0, -0.1));
        landed.below = true;
        assert!(landed.just_landed());

        let mut resting = CollisionState::begin_step(&landed, Vec2::new(0.0, -0.1));
        resting.below = true;
        assert!(!resting.just_landed());

        let lifted = CollisionState::begin_step(&resting, Vec2::new(0.0, 0.2));
        assert!(!lifted.just_landed());
    }
}
