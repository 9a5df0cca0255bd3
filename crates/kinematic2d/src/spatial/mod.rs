//! Spatial queries and the reference collision world
//!
//! Provides the ray-cast and body-access seams the movers are written
//! against, plus a simple world that implements them.

pub mod spatial_query;
mod world;

pub use spatial_query::{BodyStore, PhysicsWorld, RayCaster};
pub use world::{Body, ColliderShape, ColliderWorld};
