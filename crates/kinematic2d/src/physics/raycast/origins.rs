//! Ray origin and spacing calculation
//!
//! Rays start on the corners of the body's bounds shrunk by the skin width, so
//! a body touching a surface never starts a ray on the far side of it.

use crate::core::config::{RaycastConfig, MIN_RAY_COUNT};
use crate::foundation::math::{right, up, Vec2};
use crate::physics::collision::{Aabb2, GeometryError};

/// Corner points rays are cast from, recomputed every movement step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayOrigins {
    /// Top-left corner of the inset bounds
    pub top_left: Vec2,
    /// Top-right corner of the inset bounds
    pub top_right: Vec2,
    /// Bottom-left corner of the inset bounds
    pub bottom_left: Vec2,
    /// Bottom-right corner of the inset bounds
    pub bottom_right: Vec2,
}

impl RayOrigins {
    /// Corners of an already inset bounding box
    pub fn compute(inset: &Aabb2) -> Self {
        Self {
            top_left: Vec2::new(inset.min.x, inset.max.y),
            top_right: inset.max,
            bottom_left: inset.min,
            bottom_right: Vec2::new(inset.max.x, inset.min.y),
        }
    }
}

/// Distance between neighbouring rays on each side
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySpacing {
    /// Rays along the vertical extent, used for horizontal sweeps
    pub horizontal_count: usize,
    /// Rays along the horizontal extent, used for vertical sweeps
    pub vertical_count: usize,
    /// Gap between horizontal rays (along Y)
    pub horizontal: f32,
    /// Gap between vertical rays (along X)
    pub vertical: f32,
}

impl RaySpacing {
    /// Spread `horizontal_count` rays over the height and `vertical_count`
    /// rays over the width of `inset`. Counts below two are clamped.
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(inset: &Aabb2, horizontal_count: usize, vertical_count: usize) -> Self {
        let horizontal_count = horizontal_count.max(MIN_RAY_COUNT);
        let vertical_count = vertical_count.max(MIN_RAY_COUNT);
        Self {
            horizontal_count,
            vertical_count,
            horizontal: inset.height() / (horizontal_count - 1) as f32,
            vertical: inset.width() / (vertical_count - 1) as f32,
        }
    }
}

/// Keeps the ray origins and spacing of one box-shaped body up to date.
///
/// Shared by [`KinematicMover`] and [`PlatformTransporter`]; both call
/// [`update`](Self::update) with the body's current center and half extents
/// before casting.
///
/// [`KinematicMover`]: crate::physics::KinematicMover
/// [`PlatformTransporter`]: crate::physics::PlatformTransporter
#[derive(Debug, Clone)]
pub struct RayOriginCalculator {
    config: RaycastConfig,
    origins: RayOrigins,
    spacing: RaySpacing,
    half_extents: Vec2,
}

impl RayOriginCalculator {
    /// Create a calculator for a box body centered at `center`
    pub fn new(
        config: RaycastConfig,
        center: Vec2,
        half_extents: Vec2,
    ) -> Result<Self, GeometryError> {
        let config = config.sanitized();
        let inset =
            Aabb2::from_center_half_extents(center, half_extents).shrunk(config.skin_width)?;
        let spacing =
            RaySpacing::compute(&inset, config.horizontal_ray_count, config.vertical_ray_count);
        Ok(Self {
            config,
            origins: RayOrigins::compute(&inset),
            spacing,
            half_extents,
        })
    }

    /// Recompute origins for the body's current center.
    ///
    /// Spacing is recomputed only when the half extents changed since the
    /// last call; translation alone never triggers it.
    pub fn update(
        &mut self,
        center: Vec2,
        half_extents: Vec2,
    ) -> Result<&RayOrigins, GeometryError> {
        let inset =
            Aabb2::from_center_half_extents(center, half_extents).shrunk(self.config.skin_width)?;
        if half_extents != self.half_extents {
            self.spacing = RaySpacing::compute(
                &inset,
                self.config.horizontal_ray_count,
                self.config.vertical_ray_count,
            );
            self.half_extents = half_extents;
            log::debug!(
                "Recomputed ray spacing for {:.3}x{:.3} half extents: {:.4} / {:.4}",
                half_extents.x,
                half_extents.y,
                self.spacing.horizontal,
                self.spacing.vertical
            );
        }
        self.origins = RayOrigins::compute(&inset);
        Ok(&self.origins)
    }

    /// Half extents the current spacing was computed for
    pub fn half_extents(&self) -> Vec2 {
        self.half_extents
    }

    /// Origin of horizontal ray `index`, counted up from the bottom edge
    pub fn horizontal_ray_origin(&self, index: usize, direction_x: f32) -> Vec2 {
        let corner = if direction_x == -1.0 {
            self.origins.bottom_left
        } else {
            self.origins.bottom_right
        };
        corner + up() * (self.spacing.horizontal * index as f32)
    }

    /// Origin of vertical ray `index`, counted right from the left edge and
    /// shifted by `offset_x`
    pub fn vertical_ray_origin(&self, index: usize, direction_y: f32, offset_x: f32) -> Vec2 {
        let corner = if direction_y == -1.0 {
            self.origins.bottom_left
        } else {
            self.origins.top_left
        };
        corner + right() * (self.spacing.vertical * index as f32 + offset_x)
    }

    /// Current origins
    pub fn origins(&self) -> &RayOrigins {
        &self.origins
    }

    /// Current spacing
    pub fn spacing(&self) -> &RaySpacing {
        &self.spacing
    }

    /// Configuration with ray counts clamped
    pub fn config(&self) -> &RaycastConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_calc(config: RaycastConfig) -> RayOriginCalculator {
        RayOriginCalculator::new(config, Vec2::zeros(), Vec2::new(0.5, 0.5)).unwrap()
    }

    #[test]
    fn test_origins_are_inset_corners() {
        let calc = unit_calc(RaycastConfig::default());
        let origins = calc.origins();
        assert_relative_eq!(origins.bottom_left, Vec2::new(-0.485, -0.485), epsilon = 1e-6);
        assert_relative_eq!(origins.top_right, Vec2::new(0.485, 0.485), epsilon = 1e-6);
        assert_relative_eq!(origins.top_left, Vec2::new(-0.485, 0.485), epsilon = 1e-6);
        assert_relative_eq!(origins.bottom_right, Vec2::new(0.485, -0.485), epsilon = 1e-6);
    }

    #[test]
    fn test_spacing_divides_extent() {
        let inset = Aabb2::new(Vec2::zeros(), Vec2::new(2.0, 3.0));
        let spacing = RaySpacing::compute(&inset, 4, 5);
        assert_relative_eq!(spacing.horizontal, 1.0);
        assert_relative_eq!(spacing.vertical, 0.5);
    }

    #[test]
    fn test_two_rays_sit_on_the_corners() {
        let inset = Aabb2::new(Vec2::zeros(), Vec2::new(2.0, 3.0));
        let spacing = RaySpacing::compute(&inset, 2, 2);
        assert_relative_eq!(spacing.horizontal, 3.0);
        assert_relative_eq!(spacing.vertical, 2.0);
    }

    #[test]
    fn test_low_ray_counts_are_clamped() {
        let config = RaycastConfig::default().with_ray_counts(0, 1);
        let calc = unit_calc(config);
        assert_eq!(calc.spacing().horizontal_count, 2);
        assert_eq!(calc.spacing().vertical_count, 2);
        assert_relative_eq!(calc.spacing().horizontal, 0.97, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_box_fails_fast() {
        let sliver = Vec2::new(0.5, 0.01);
        assert!(RayOriginCalculator::new(RaycastConfig::default(), Vec2::zeros(), sliver).is_err());
    }

    #[test]
    fn test_update_tracks_movement_and_resize() {
        let mut calc = unit_calc(RaycastConfig::default());
        let origins = *calc.update(Vec2::new(3.0, 0.0), Vec2::new(0.5, 0.5)).unwrap();
        assert_relative_eq!(origins.bottom_left, Vec2::new(2.515, -0.485), epsilon = 1e-6);
        assert_relative_eq!(calc.spacing().horizontal, 0.97 / 3.0, epsilon = 1e-6);

        calc.update(Vec2::zeros(), Vec2::new(0.5, 2.0)).unwrap();
        assert_relative_eq!(calc.spacing().horizontal, 3.97 / 3.0, epsilon = 1e-6);
        assert_eq!(calc.half_extents(), Vec2::new(0.5, 2.0));
    }

    #[test]
    fn test_translation_keeps_spacing_bit_identical() {
        let mut calc = unit_calc(RaycastConfig::default());
        let spacing = *calc.spacing();
        let mut center = Vec2::zeros();
        for _ in 0..100 {
            // Steps that do not round-trip exactly through the inset bounds
            center += Vec2::new(0.1337, -0.0421);
            calc.update(center, Vec2::new(0.5, 0.5)).unwrap();
            assert_eq!(*calc.spacing(), spacing);
        }
    }

    #[test]
    fn test_ray_origin_helpers() {
        let calc = unit_calc(RaycastConfig::default().with_ray_counts(2, 2));
        assert_relative_eq!(
            calc.horizontal_ray_origin(1, -1.0),
            Vec2::new(-0.485, 0.485),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            calc.horizontal_ray_origin(0, 1.0),
            Vec2::new(0.485, -0.485),
            epsilon = 1e-6
        );
        assert_relative_eq!(
            calc.vertical_ray_origin(1, 1.0, 0.25),
            Vec2::new(0.735, 0.485),
            epsilon = 1e-6
        );
    }
}
