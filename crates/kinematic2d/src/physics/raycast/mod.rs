//! Raycast collision primitives
//!
//! Building blocks shared by [`KinematicMover`](crate::physics::KinematicMover)
//! and [`PlatformTransporter`](crate::physics::PlatformTransporter):
//!
//! - [`origins`]: ray origins and spacing from a skin-inset bounding box
//! - [`sweeper`]: horizontal and vertical sweeps that clamp a velocity
//! - [`slope`]: re-projection of horizontal movement onto a climbable incline
//! - [`state`]: the per-step collision record

pub mod origins;
pub mod slope;
pub mod state;
pub mod sweeper;

pub use origins::{RayOriginCalculator, RayOrigins, RaySpacing};
pub use state::CollisionState;
pub use sweeper::CollisionSweeper;
