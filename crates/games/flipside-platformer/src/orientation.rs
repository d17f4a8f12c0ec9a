use serde::{Deserialize, Serialize};

use flipside_core::signal::{MotionCommand, Outbox, Signal};

use crate::player::PlayerState;

/// Which way world gravity points.
///
/// Invariant: outside the tick that toggles it, `inverted` equals the
/// player's `flip_y`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrientationState {
    inverted: bool,
}

impl OrientationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gravity points toward the geometric top.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Signed world gravity for a magnitude under the current orientation.
    pub fn gravity_y(&self, magnitude: f32) -> f32 {
        if self.inverted { -magnitude } else { magnitude }
    }

    /// Flip gravity, the player's vertical mirror, and the orientation flag
    /// together.
    pub fn toggle(&mut self, player: &mut PlayerState, magnitude: f32, out: &mut Outbox) {
        self.inverted = !self.inverted;
        player.flip_y = !player.flip_y;
        out.command(MotionCommand::SetWorldGravityY(self.gravity_y(magnitude)));
        out.signal(Signal::Flip {
            x: player.flip_x,
            y: player.flip_y,
        });
        tracing::debug!(inverted = self.inverted, "Gravity toggled");
    }
}
