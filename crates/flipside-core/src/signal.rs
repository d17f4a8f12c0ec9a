use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::scene::{SceneData, SceneId};

/// Commands for the physics engine. The core never writes body state
/// directly; every change to the player body or world goes through here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MotionCommand {
    SetAccelerationX(f32),
    SetDragX(f32),
    /// Instantaneous vertical velocity.
    SetVelocityY(f32),
    SetWorldGravityY(f32),
}

/// Sound effects and music tracks the core can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sound {
    Collect,
    Jump,
    Land,
    BackgroundMusic,
    GameOverMusic,
}

impl Sound {
    /// Asset key the presentation layer loads for this sound.
    pub fn asset_key(&self) -> &'static str {
        match self {
            Sound::Collect => "partCollect",
            Sound::Jump => "jumpAudio",
            Sound::Land => "landAudio",
            Sound::BackgroundMusic => "bgm",
            Sound::GameOverMusic => "gameOver",
        }
    }
}

/// Player sprite animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Animation {
    Idle,
    Walk,
    Jump,
}

impl Animation {
    pub fn name(&self) -> &'static str {
        match self {
            Animation::Idle => "idle",
            Animation::Walk => "walk",
            Animation::Jump => "jump",
        }
    }
}

/// Requests for the ground-hugging walking trail emitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrailRequest {
    /// Attach to the player at `anchor` (offset from the sprite origin).
    Follow { anchor: Vec2, particle_speed: Vec2 },
    Start,
    Stop,
}

/// Everything the presentation layer may be asked to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    Animation {
        animation: Animation,
        ignore_if_playing: bool,
    },
    Flip {
        x: bool,
        y: bool,
    },
    Trail(TrailRequest),
    /// One-shot particle burst following the player at `anchor`.
    Burst {
        anchor: Vec2,
        count: u32,
    },
    PlaySound {
        sound: Sound,
        looped: bool,
        volume: f32,
    },
    /// Start a looping track unless it is already playing.
    EnsureMusic {
        sound: Sound,
        volume: f32,
    },
    StopAllSounds,
    ProgressText {
        collected: u32,
        target: u32,
    },
    HintText(String),
    Message(String),
    DebugDraw(bool),
    SceneChange {
        to: SceneId,
        data: SceneData,
    },
}

impl Signal {
    /// On-screen text this signal asks the HUD to show, if any.
    pub fn hud_text(&self) -> Option<String> {
        match self {
            Signal::ProgressText { collected, target } => {
                Some(format!("Parts Collected: {collected} / {target}"))
            },
            Signal::HintText(text) | Signal::Message(text) => Some(text.clone()),
            _ => None,
        }
    }
}

/// Output of one tick: engine commands and presentation signals, in the
/// order they were issued.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    pub motion: Vec<MotionCommand>,
    pub signals: Vec<Signal>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn command(&mut self, command: MotionCommand) {
        self.motion.push(command);
    }

    pub fn signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    /// Play a one-shot sound effect at full volume.
    pub fn sound(&mut self, sound: Sound) {
        self.signals.push(Signal::PlaySound {
            sound,
            looped: false,
            volume: 1.0,
        });
    }

    pub fn clear(&mut self) {
        self.motion.clear();
        self.signals.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.motion.is_empty() && self.signals.is_empty()
    }

    /// Last horizontal acceleration issued, if any.
    pub fn acceleration_x(&self) -> Option<f32> {
        self.motion.iter().rev().find_map(|c| match c {
            MotionCommand::SetAccelerationX(a) => Some(*a),
            _ => None,
        })
    }

    pub fn drag_x(&self) -> Option<f32> {
        self.motion.iter().rev().find_map(|c| match c {
            MotionCommand::SetDragX(d) => Some(*d),
            _ => None,
        })
    }

    pub fn velocity_y(&self) -> Option<f32> {
        self.motion.iter().rev().find_map(|c| match c {
            MotionCommand::SetVelocityY(v) => Some(*v),
            _ => None,
        })
    }

    pub fn gravity_y(&self) -> Option<f32> {
        self.motion.iter().rev().find_map(|c| match c {
            MotionCommand::SetWorldGravityY(g) => Some(*g),
            _ => None,
        })
    }

    /// Animation that ends up playing after this tick.
    pub fn animation(&self) -> Option<Animation> {
        self.signals.iter().rev().find_map(|s| match s {
            Signal::Animation { animation, .. } => Some(*animation),
            _ => None,
        })
    }

    pub fn flip(&self) -> Option<(bool, bool)> {
        self.signals.iter().rev().find_map(|s| match s {
            Signal::Flip { x, y } => Some((*x, *y)),
            _ => None,
        })
    }

    /// Number of one-shot or looped plays requested for `sound`.
    pub fn sound_count(&self, sound: Sound) -> usize {
        self.signals
            .iter()
            .filter(|sig| matches!(sig, Signal::PlaySound { sound: kind, .. } if *kind == sound))
            .count()
    }

    pub fn trail_requests(&self) -> impl Iterator<Item = &TrailRequest> {
        self.signals.iter().filter_map(|s| match s {
            Signal::Trail(t) => Some(t),
            _ => None,
        })
    }

    pub fn bursts(&self) -> impl Iterator<Item = (Vec2, u32)> + '_ {
        self.signals.iter().filter_map(|s| match s {
            Signal::Burst { anchor, count } => Some((*anchor, *count)),
            _ => None,
        })
    }
}
