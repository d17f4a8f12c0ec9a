use glam::Vec2;
use serde::{Deserialize, Serialize};

use flipside_core::body::BodySnapshot;
use flipside_core::signal::{Animation, MotionCommand, Outbox, Signal, TrailRequest};

use crate::config::PhysicsTuning;
use crate::orientation::OrientationState;
use crate::player::PlayerState;

/// Horizontal foot offset from the sprite's half-width.
const FOOT_INSET_X: f32 = 15.0;
/// Vertical foot offset from half-height when standing on the floor.
const FOOT_INSET_FLOOR: f32 = 5.0;
/// Vertical foot offset from half-height when standing on the ceiling.
const FOOT_INSET_CEILING: f32 = 25.0;

/// Held horizontal input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInput {
    pub left: bool,
    pub right: bool,
}

/// The horizontal branch chosen for a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HorizontalCommand {
    AccelerateLeft { acceleration: f32, reversal: bool },
    AccelerateRight { acceleration: f32, reversal: bool },
    Decelerate { drag: f32 },
}

/// Per-tick horizontal movement, animation choice, and walking trail.
#[derive(Debug, Clone)]
pub struct MovementController {
    acceleration: f32,
    reversal_multiplier: f32,
    reversal_threshold: f32,
    drag: f32,
    particle_velocity: f32,
}

impl MovementController {
    pub fn new(tuning: &PhysicsTuning) -> Self {
        Self {
            acceleration: tuning.acceleration,
            reversal_multiplier: tuning.reversal_multiplier,
            reversal_threshold: tuning.reversal_threshold,
            drag: tuning.drag,
            particle_velocity: tuning.particle_velocity,
        }
    }

    /// Pick the horizontal branch. Left wins when both directions are held.
    ///
    /// A reversal is velocity moving against the held direction faster than
    /// the threshold, mirrored for both sides.
    pub fn decide(&self, input: MoveInput, velocity_x: f32) -> HorizontalCommand {
        if input.left {
            let reversal = velocity_x > self.reversal_threshold;
            HorizontalCommand::AccelerateLeft {
                acceleration: -self.magnitude(reversal),
                reversal,
            }
        } else if input.right {
            let reversal = velocity_x < -self.reversal_threshold;
            HorizontalCommand::AccelerateRight {
                acceleration: self.magnitude(reversal),
                reversal,
            }
        } else {
            HorizontalCommand::Decelerate { drag: self.drag }
        }
    }

    fn magnitude(&self, reversal: bool) -> f32 {
        if reversal {
            self.acceleration * self.reversal_multiplier
        } else {
            self.acceleration
        }
    }

    /// Run the movement step for one tick and emit its commands.
    pub fn tick(
        &self,
        input: MoveInput,
        body: &BodySnapshot,
        orientation: &OrientationState,
        player: &mut PlayerState,
        out: &mut Outbox,
    ) -> HorizontalCommand {
        let command = self.decide(input, body.velocity.x);
        match command {
            HorizontalCommand::AccelerateLeft { acceleration, .. } => {
                self.walk(acceleration, false, body, orientation, player, out);
            },
            HorizontalCommand::AccelerateRight { acceleration, .. } => {
                self.walk(acceleration, true, body, orientation, player, out);
            },
            HorizontalCommand::Decelerate { drag } => {
                out.command(MotionCommand::SetAccelerationX(0.0));
                out.command(MotionCommand::SetDragX(drag));
                out.signal(Signal::Animation {
                    animation: Animation::Idle,
                    ignore_if_playing: false,
                });
                out.signal(Signal::Trail(TrailRequest::Stop));
            },
        }

        if !body.contacts.any() {
            out.signal(Signal::Animation {
                animation: Animation::Jump,
                ignore_if_playing: false,
            });
            player.is_falling = true;
        }

        command
    }

    fn walk(
        &self,
        acceleration: f32,
        face_right: bool,
        body: &BodySnapshot,
        orientation: &OrientationState,
        player: &mut PlayerState,
        out: &mut Outbox,
    ) {
        out.command(MotionCommand::SetAccelerationX(acceleration));

        player.flip_x = face_right;
        player.flip_y = orientation.is_inverted();
        out.signal(Signal::Flip {
            x: player.flip_x,
            y: player.flip_y,
        });
        out.signal(Signal::Animation {
            animation: Animation::Walk,
            ignore_if_playing: true,
        });

        out.signal(Signal::Trail(TrailRequest::Follow {
            anchor: foot_position(body.display_size, player.flip_y),
            particle_speed: Vec2::new(self.particle_velocity, 0.0),
        }));
        // Dust only while touching a surface, whichever one is "down".
        if body.contacts.any() {
            out.signal(Signal::Trail(TrailRequest::Start));
        }
    }
}

/// Offset from the sprite origin where its feet are. When the sprite is
/// mirrored vertically the feet sit near the top.
pub fn foot_position(display_size: Vec2, flip_y: bool) -> Vec2 {
    let half = display_size / 2.0;
    let inset = if flip_y {
        FOOT_INSET_CEILING
    } else {
        FOOT_INSET_FLOOR
    };
    Vec2::new(half.x - FOOT_INSET_X, half.y - inset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipside_core::body::ContactFlags;
    use flipside_core::test_helpers::body;

    use crate::config::{ACCELERATION, DRAG, REVERSAL_MULTIPLIER};

    fn controller() -> MovementController {
        MovementController::new(&PhysicsTuning::default())
    }

    const LEFT: MoveInput = MoveInput {
        left: true,
        right: false,
    };
    const RIGHT: MoveInput = MoveInput {
        left: false,
        right: true,
    };

    #[test]
    fn right_from_rest_uses_base_acceleration() {
        let cmd = controller().decide(RIGHT, 0.0);
        assert_eq!(
            cmd,
            HorizontalCommand::AccelerateRight {
                acceleration: ACCELERATION,
                reversal: false,
            }
        );
    }

    #[test]
    fn right_while_sliding_left_snaps_back() {
        let cmd = controller().decide(RIGHT, -5.1);
        assert_eq!(
            cmd,
            HorizontalCommand::AccelerateRight {
                acceleration: ACCELERATION * REVERSAL_MULTIPLIER,
                reversal: true,
            }
        );
        assert!(matches!(
            controller().decide(RIGHT, -5.0),
            HorizontalCommand::AccelerateRight {
                reversal: false,
                ..
            }
        ));
    }

    #[test]
    fn right_while_moving_right_uses_base_acceleration() {
        let cmd = controller().decide(RIGHT, 120.0);
        assert_eq!(
            cmd,
            HorizontalCommand::AccelerateRight {
                acceleration: ACCELERATION,
                reversal: false,
            }
        );
    }

    #[test]
    fn left_reverses_only_past_threshold() {
        let c = controller();
        assert_eq!(
            c.decide(LEFT, 5.0),
            HorizontalCommand::AccelerateLeft {
                acceleration: -ACCELERATION,
                reversal: false,
            }
        );
        assert_eq!(
            c.decide(LEFT, 5.1),
            HorizontalCommand::AccelerateLeft {
                acceleration: -ACCELERATION * REVERSAL_MULTIPLIER,
                reversal: true,
            }
        );
    }

    #[test]
    fn left_wins_when_both_held() {
        let both = MoveInput {
            left: true,
            right: true,
        };
        assert!(matches!(
            controller().decide(both, 0.0),
            HorizontalCommand::AccelerateLeft { .. }
        ));
    }

    #[test]
    fn walking_right_on_floor() {
        let mut player = PlayerState::new();
        let mut out = Outbox::new();
        controller().tick(
            RIGHT,
            &body(ContactFlags::FLOOR, 0.0),
            &OrientationState::new(),
            &mut player,
            &mut out,
        );

        assert_eq!(out.acceleration_x(), Some(ACCELERATION));
        assert_eq!(out.animation(), Some(Animation::Walk));
        assert_eq!(out.flip(), Some((true, false)));
        assert!(player.flip_x());
        assert!(out.trail_requests().any(|t| *t == TrailRequest::Start));
        assert!(!player.is_falling());
    }

    #[test]
    fn walking_facing_follows_orientation() {
        let mut orientation = OrientationState::new();
        let mut player = PlayerState::new();
        let mut out = Outbox::new();
        orientation.toggle(&mut player, 1500.0, &mut out);
        out.clear();

        controller().tick(
            LEFT,
            &body(ContactFlags::CEILING, 0.0),
            &orientation,
            &mut player,
            &mut out,
        );
        assert_eq!(out.flip(), Some((false, true)));
        assert!(out.trail_requests().any(|t| *t == TrailRequest::Start));
    }

    #[test]
    fn no_input_applies_drag_and_idles() {
        let mut player = PlayerState::new();
        let mut out = Outbox::new();
        let cmd = controller().tick(
            MoveInput::default(),
            &body(ContactFlags::FLOOR, 80.0),
            &OrientationState::new(),
            &mut player,
            &mut out,
        );

        assert_eq!(cmd, HorizontalCommand::Decelerate { drag: DRAG });
        assert_eq!(out.acceleration_x(), Some(0.0));
        assert_eq!(out.drag_x(), Some(DRAG));
        assert_eq!(out.animation(), Some(Animation::Idle));
        assert_eq!(out.trail_requests().last(), Some(&TrailRequest::Stop));
    }

    #[test]
    fn airborne_forces_jump_animation_and_arms_falling() {
        let mut player = PlayerState::new();
        let mut out = Outbox::new();
        controller().tick(
            RIGHT,
            &body(ContactFlags::AIRBORNE, 50.0),
            &OrientationState::new(),
            &mut player,
            &mut out,
        );

        assert_eq!(out.animation(), Some(Animation::Jump));
        assert!(player.is_falling());
        // Trail follows but never starts mid-air
        assert!(!out.trail_requests().any(|t| *t == TrailRequest::Start));
    }

    #[test]
    fn foot_position_moves_to_top_when_flipped() {
        let size = Vec2::new(60.0, 60.0);
        assert_eq!(foot_position(size, false), Vec2::new(15.0, 25.0));
        assert_eq!(foot_position(size, true), Vec2::new(15.0, 5.0));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reversal_iff_velocity_opposes_held_direction(
                vx in -500.0f32..500.0,
                left in any::<bool>(),
            ) {
                let input = MoveInput { left, right: !left };
                match controller().decide(input, vx) {
                    HorizontalCommand::AccelerateLeft { acceleration, reversal } => {
                        prop_assert_eq!(reversal, vx > 5.0);
                        prop_assert!(acceleration < 0.0);
                    },
                    HorizontalCommand::AccelerateRight { acceleration, reversal } => {
                        prop_assert_eq!(reversal, vx < -5.0);
                        prop_assert!(acceleration > 0.0);
                    },
                    HorizontalCommand::Decelerate { .. } => prop_assert!(false, "input was held"),
                }
            }

            #[test]
            fn every_tick_picks_exactly_one_acceleration(
                vx in -500.0f32..500.0,
                left in any::<bool>(),
                right in any::<bool>(),
                down in any::<bool>(),
                up in any::<bool>(),
            ) {
                let contacts = ContactFlags { blocked_down: down, blocked_up: up };
                let mut player = PlayerState::new();
                let mut out = Outbox::new();
                controller().tick(
                    MoveInput { left, right },
                    &body(contacts, vx),
                    &OrientationState::new(),
                    &mut player,
                    &mut out,
                );
                let accels = out
                    .motion
                    .iter()
                    .filter(|c| matches!(c, MotionCommand::SetAccelerationX(_)))
                    .count();
                prop_assert_eq!(accels, 1);
                prop_assert_eq!(player.is_falling(), !down && !up);
            }
        }
    }
}
