use serde::{Deserialize, Serialize};

/// Player flags the core owns. Position and velocity belong to the physics
/// engine and arrive each tick in a [`BodySnapshot`](flipside_core::body::BodySnapshot).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Armed while airborne; cleared by the landing trigger.
    pub(crate) is_falling: bool,
    /// Sprite faces right when set.
    pub(crate) flip_x: bool,
    /// Sprite mirrored vertically; tracks gravity orientation.
    pub(crate) flip_y: bool,
}

impl PlayerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_falling(&self) -> bool {
        self.is_falling
    }

    pub fn flip_x(&self) -> bool {
        self.flip_x
    }

    pub fn flip_y(&self) -> bool {
        self.flip_y
    }
}
