use serde::Serialize;

use flipside_core::input::InputState;
use flipside_core::scene::{Frame, SceneData, SceneId};
use flipside_core::signal::{Outbox, Signal};
use flipside_platformer::FlipsideGame;
use flipside_platformer::config::PlatformerConfig;

use crate::tape::Tape;

/// Result of replaying a tape.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub frames: u32,
    pub transitions: u32,
    pub final_scene: SceneId,
    /// Outcome of the most recent finished session, if any.
    pub last_outcome: Option<&'static str>,
    pub state: serde_json::Value,
}

/// Run every tape frame through a fresh game and summarize where it ended.
pub fn replay(config: PlatformerConfig, tape: &Tape) -> Summary {
    let spawn = config.level.spawn();
    let mut out = Outbox::new();
    let mut game = FlipsideGame::new(config, &mut out);
    log_outbox(0, &out);

    let mut input = InputState::new();
    let mut frames = 0u32;
    let mut last_outcome = None;

    for entry in &tape.frame {
        let body = entry.body(spawn);
        for _ in 0..entry.repeat {
            frames += 1;
            input.sample(entry.held_keys());
            let frame = Frame {
                input: &input,
                body: &body,
                overlaps: &entry.overlaps,
            };
            out.clear();
            if let Some(transition) = game.tick(&frame, &mut out) {
                if let SceneData::Outcome { died } = transition.data {
                    last_outcome = Some(if died { "died" } else { "won" });
                }
            }
            log_outbox(frames, &out);
            input.end_frame();
        }
    }

    Summary {
        frames,
        transitions: game.transitions(),
        final_scene: game.active_scene(),
        last_outcome,
        state: game.state(),
    }
}

fn log_outbox(frame: u32, out: &Outbox) {
    for command in &out.motion {
        tracing::debug!(frame, ?command, "Motion");
    }
    for signal in &out.signals {
        match signal {
            Signal::SceneChange { to, data } => {
                tracing::info!(frame, to = %to, ?data, "Scene change");
            },
            Signal::PlaySound { sound, looped, .. } => {
                tracing::debug!(frame, sound = sound.asset_key(), looped, "Sound");
            },
            Signal::EnsureMusic { sound, .. } => {
                tracing::debug!(frame, sound = sound.asset_key(), "Music");
            },
            Signal::Animation { animation, .. } => {
                tracing::trace!(frame, animation = animation.name(), "Animation");
            },
            _ => match signal.hud_text() {
                Some(text) => tracing::debug!(frame, text = %text, "HUD"),
                None => tracing::trace!(frame, ?signal, "Signal"),
            },
        }
    }
}
