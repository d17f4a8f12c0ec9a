use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier the engine assigns to a collectible placed in the level.
pub type CollectibleId = u32;

/// Per-tick contact flags on the player body.
///
/// Both flags are geometric: `blocked_down` is always the bottom edge of the
/// body, regardless of which way gravity currently points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFlags {
    pub blocked_down: bool,
    pub blocked_up: bool,
}

impl ContactFlags {
    pub const AIRBORNE: Self = Self {
        blocked_down: false,
        blocked_up: false,
    };
    pub const FLOOR: Self = Self {
        blocked_down: true,
        blocked_up: false,
    };
    pub const CEILING: Self = Self {
        blocked_down: false,
        blocked_up: true,
    };

    /// Touching any horizontal surface.
    pub fn any(&self) -> bool {
        self.blocked_down || self.blocked_up
    }
}

/// Read-only view of the player body as the physics engine left it after
/// its step for this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    /// Sprite center in world pixels, y growing downward.
    pub position: Vec2,
    pub velocity: Vec2,
    /// Sprite display size in pixels.
    pub display_size: Vec2,
    pub contacts: ContactFlags,
}

impl BodySnapshot {
    pub fn new(position: Vec2, contacts: ContactFlags) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            display_size: Vec2::splat(24.0),
            contacts,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

impl Default for BodySnapshot {
    fn default() -> Self {
        Self::new(Vec2::ZERO, ContactFlags::AIRBORNE)
    }
}
