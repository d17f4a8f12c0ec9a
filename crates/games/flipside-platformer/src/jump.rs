use serde::{Deserialize, Serialize};

use flipside_core::body::BodySnapshot;
use flipside_core::signal::{MotionCommand, Outbox, Signal, Sound};

use crate::config::PhysicsTuning;
use crate::movement::foot_position;
use crate::player::PlayerState;

/// Which surface a jump pushed off from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpOutcome {
    FromFloor,
    FromCeiling,
    None,
}

/// Edge-triggered jump. A jump always pushes away from the surface the
/// player is standing on, which under inverted gravity is the ceiling.
#[derive(Debug, Clone)]
pub struct JumpController {
    jump_velocity: f32,
    burst_count: u32,
}

impl JumpController {
    pub fn new(tuning: &PhysicsTuning) -> Self {
        Self {
            jump_velocity: tuning.jump_velocity,
            burst_count: tuning.jump_burst_count,
        }
    }

    /// `jump_pressed` must be the press edge for this tick, not the held state.
    pub fn tick(
        &self,
        jump_pressed: bool,
        body: &BodySnapshot,
        player: &PlayerState,
        out: &mut Outbox,
    ) -> JumpOutcome {
        if !jump_pressed {
            return JumpOutcome::None;
        }

        let (outcome, velocity, anchor) = if body.contacts.blocked_down {
            (
                JumpOutcome::FromFloor,
                self.jump_velocity,
                body.display_size / 2.0,
            )
        } else if body.contacts.blocked_up {
            (
                JumpOutcome::FromCeiling,
                -self.jump_velocity,
                foot_position(body.display_size, player.flip_y()),
            )
        } else {
            return JumpOutcome::None;
        };

        out.command(MotionCommand::SetVelocityY(velocity));
        out.sound(Sound::Jump);
        out.signal(Signal::Burst {
            anchor,
            count: self.burst_count,
        });
        outcome
    }
}
