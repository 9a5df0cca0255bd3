//! Collision layer system for filtering ray casts
//!
//! Every body in a collision world sits on one or more layers. Ray casts carry
//! a mask and only report bodies whose layers intersect it. A mover's
//! collision mask and a platform's passenger mask are both [`LayerMask`]s.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Collision layer definitions using bitflags for efficient filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct LayerMask: u32 {
        /// Player character layer
        const PLAYER = 1 << 0;

        /// Enemy character layer
        const ENEMY = 1 << 1;

        /// Static environment geometry (ground, walls, ramps)
        const ENVIRONMENT = 1 << 2;

        /// Moving platforms
        const PLATFORM = 1 << 3;

        /// Pushable props that can ride platforms
        const PROP = 1 << 4;
    }
}

impl LayerMask {
    /// What a player-like actor collides with by default: solid ground and platforms
    pub const SOLID: Self = Self::ENVIRONMENT.union(Self::PLATFORM);

    /// Bodies a platform carries by default
    pub const PASSENGERS: Self = Self::PLAYER.union(Self::ENEMY).union(Self::PROP);

    /// Check if a ray with this mask can hit a body on `layers`
    pub fn accepts(self, layers: Self) -> bool {
        self.intersects(layers)
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::SOLID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_serializes_as_flag_string() {
        let mask = LayerMask::PLAYER | LayerMask::PROP;
        let text = ron::to_string(&mask).unwrap();
        assert_eq!(text, "\"PLAYER | PROP\"");
        let parsed: LayerMask = ron::from_str("\"ENVIRONMENT | PLATFORM\"").unwrap();
        assert_eq!(parsed, LayerMask::SOLID);
    }

    #[test]
    fn test_default_mask_hits_ground_and_platforms_only() {
        let mask = LayerMask::default();
        assert!(mask.accepts(LayerMask::ENVIRONMENT));
        assert!(mask.accepts(LayerMask::PLATFORM));
        assert!(!mask.accepts(LayerMask::PLAYER));
        assert!(!LayerMask::empty().accepts(LayerMask::all()));
    }
}
