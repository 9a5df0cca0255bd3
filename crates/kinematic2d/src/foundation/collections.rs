//! Specialized collection types

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Stable handle to a body stored in a collision world.
    ///
    /// Handles stay valid until the body is removed and are never reused for
    /// a different body.
    pub struct BodyHandle;
}

/// Handle-based map of bodies using slot map for stable references
pub type BodyMap<T> = SlotMap<BodyHandle, T>;

/// Side table keyed by body handle
pub type BodySideMap<T> = SecondaryMap<BodyHandle, T>;
