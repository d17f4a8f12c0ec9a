use serde::Serialize;

use flipside_core::body::CollectibleId;
use flipside_core::input::Key;
use flipside_core::scene::{Frame, Scene, SceneData, SceneId, SceneTransition};
use flipside_core::signal::{MotionCommand, Outbox, Signal, Sound, TrailRequest};

use crate::config::PlatformerConfig;
use crate::jump::JumpController;
use crate::landing::detect_landing;
use crate::lifecycle::{LifecyclePhase, LifecycleStateMachine};
use crate::movement::{MoveInput, MovementController};
use crate::orientation::OrientationState;
use crate::player::PlayerState;
use crate::progress::{CollectibleField, ProgressTracker};

pub const HINT_TEXT: &str = "Press 'G' to\n flip gravity";

/// State owned by one play session. Rebuilt from scratch on every start.
#[derive(Debug, Clone)]
pub struct Session {
    pub player: PlayerState,
    pub orientation: OrientationState,
    pub collectibles: CollectibleField,
    pub progress: ProgressTracker,
    pub lifecycle: LifecycleStateMachine,
    pub debug_draw: bool,
}

impl Session {
    pub fn new(config: &PlatformerConfig, collectibles: &[CollectibleId]) -> Self {
        Self {
            player: PlayerState::new(),
            orientation: OrientationState::new(),
            collectibles: CollectibleField::new(collectibles.iter().copied()),
            progress: ProgressTracker::new(config.collect_target),
            lifecycle: LifecycleStateMachine::new(&config.level),
            debug_draw: false,
        }
    }
}

/// Observable gameplay state.
#[derive(Debug, Clone, Serialize)]
pub struct GameplayStatus {
    pub collected: u32,
    pub target: u32,
    pub remaining: usize,
    pub inverted: bool,
    pub flip_y: bool,
    pub is_falling: bool,
    pub phase: LifecyclePhase,
    pub debug_draw: bool,
}

/// The level being played.
pub struct GameplayScene {
    config: PlatformerConfig,
    movement: MovementController,
    jump: JumpController,
    session: Session,
}

impl GameplayScene {
    pub fn new(config: PlatformerConfig, collectibles: &[CollectibleId]) -> Self {
        Self {
            movement: MovementController::new(&config.physics),
            jump: JumpController::new(&config.physics),
            session: Session::new(&config, collectibles),
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> GameplayStatus {
        let s = &self.session;
        GameplayStatus {
            collected: s.progress.collected(),
            target: s.progress.target(),
            remaining: s.collectibles.remaining(),
            inverted: s.orientation.is_inverted(),
            flip_y: s.player.flip_y(),
            is_falling: s.player.is_falling(),
            phase: s.lifecycle.phase(),
            debug_draw: s.debug_draw,
        }
    }

    fn progress_text(&self) -> Signal {
        Signal::ProgressText {
            collected: self.session.progress.collected(),
            target: self.session.progress.target(),
        }
    }

    fn collect(&mut self, overlaps: &[CollectibleId], out: &mut Outbox) {
        for &id in overlaps {
            let Some(token) = self.session.collectibles.take(id) else {
                continue;
            };
            self.session.progress.on_collect(token);
            out.sound(Sound::Collect);
            out.signal(self.progress_text());
        }
    }
}

impl Scene for GameplayScene {
    fn id(&self) -> SceneId {
        SceneId::Gameplay
    }

    fn init(&mut self, _data: SceneData) {}

    fn on_enter(&mut self, out: &mut Outbox) {
        let gravity = self
            .session
            .orientation
            .gravity_y(self.config.physics.gravity);
        out.command(MotionCommand::SetWorldGravityY(gravity));
        out.signal(Signal::DebugDraw(self.session.debug_draw));
        out.signal(Signal::Trail(TrailRequest::Stop));
        out.signal(Signal::EnsureMusic {
            sound: Sound::BackgroundMusic,
            volume: self.config.audio.music_volume,
        });
        out.signal(self.progress_text());
        out.signal(Signal::HintText(HINT_TEXT.to_string()));
    }

    fn tick(&mut self, frame: &Frame<'_>, out: &mut Outbox) -> Option<SceneTransition> {
        if self.session.lifecycle.is_terminal() {
            return None;
        }

        // Overlaps were resolved during this frame's physics step.
        self.collect(frame.overlaps, out);

        let input = frame.input;
        if input.is_key_just_pressed(Key::ToggleDebug) {
            self.session.debug_draw = !self.session.debug_draw;
            out.signal(Signal::DebugDraw(self.session.debug_draw));
        }
        if input.is_key_just_pressed(Key::ToggleGravity) {
            let Session {
                orientation,
                player,
                ..
            } = &mut self.session;
            orientation.toggle(player, self.config.physics.gravity, out);
        }

        let move_input = MoveInput {
            left: input.is_key_down(Key::Left),
            right: input.is_key_down(Key::Right),
        };
        self.movement.tick(
            move_input,
            frame.body,
            &self.session.orientation,
            &mut self.session.player,
            out,
        );
        self.jump.tick(
            input.is_key_just_pressed(Key::Jump),
            frame.body,
            &self.session.player,
            out,
        );

        if let Some(outcome) = self
            .session
            .lifecycle
            .check(frame.body.position.y, &self.session.progress)
        {
            return Some(SceneTransition {
                to: SceneId::GameOver,
                data: SceneData::Outcome {
                    died: outcome.died(),
                },
            });
        }

        detect_landing(frame.body.contacts, &mut self.session.player, out);
        None
    }

    fn serialize_state(&self) -> serde_json::Value {
        serde_json::to_value(self.status()).unwrap_or_default()
    }
}
