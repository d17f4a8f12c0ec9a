use serde::Serialize;

use flipside_core::input::Key;
use flipside_core::scene::{Frame, Scene, SceneData, SceneId, SceneTransition};
use flipside_core::signal::{Outbox, Signal, Sound};

pub const DIED_MESSAGE: &str = "You Died! \nPress the enter key to try again!";
pub const WON_MESSAGE: &str =
    "You Win! \nGravity has been restored to the world! \nPress enter to play again!";

/// End screen: shows the outcome and waits for Confirm to restart.
pub struct GameOverScene {
    died: bool,
    music_volume: f32,
}

#[derive(Debug, Clone, Serialize)]
struct GameOverStatus<'a> {
    died: bool,
    message: &'a str,
}

impl GameOverScene {
    pub fn new(music_volume: f32) -> Self {
        Self {
            died: false,
            music_volume,
        }
    }

    pub fn died(&self) -> bool {
        self.died
    }

    pub fn message(&self) -> &'static str {
        if self.died { DIED_MESSAGE } else { WON_MESSAGE }
    }
}

impl Scene for GameOverScene {
    fn id(&self) -> SceneId {
        SceneId::GameOver
    }

    fn init(&mut self, data: SceneData) {
        self.died = matches!(data, SceneData::Outcome { died: true });
    }

    fn on_enter(&mut self, out: &mut Outbox) {
        out.signal(Signal::StopAllSounds);
        out.signal(Signal::PlaySound {
            sound: Sound::GameOverMusic,
            looped: true,
            volume: self.music_volume,
        });
        out.signal(Signal::Message(self.message().to_string()));
    }

    fn tick(&mut self, frame: &Frame<'_>, out: &mut Outbox) -> Option<SceneTransition> {
        if !frame.input.is_key_just_pressed(Key::Confirm) {
            return None;
        }
        out.signal(Signal::StopAllSounds);
        Some(SceneTransition {
            to: SceneId::Gameplay,
            data: SceneData::None,
        })
    }

    fn serialize_state(&self) -> serde_json::Value {
        serde_json::to_value(GameOverStatus {
            died: self.died,
            message: self.message(),
        })
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use flipside_core::body::ContactFlags;
    use flipside_core::input::InputState;
    use flipside_core::test_helpers::{body, input_after, pressed, tick_scene};

    use super::*;

    fn entered(died: bool) -> (GameOverScene, Outbox) {
        let mut scene = GameOverScene::new(0.3);
        scene.init(SceneData::Outcome { died });
        let mut out = Outbox::new();
        scene.on_enter(&mut out);
        (scene, out)
    }

    #[test]
    fn death_shows_retry_message() {
        let (scene, out) = entered(true);
        assert!(scene.died());
        assert!(out.signals.contains(&Signal::Message(DIED_MESSAGE.to_string())));
    }

    #[test]
    fn win_shows_victory_message() {
        let (scene, out) = entered(false);
        assert!(!scene.died());
        assert!(out.signals.contains(&Signal::Message(WON_MESSAGE.to_string())));
    }

    #[test]
    fn enter_replaces_music() {
        let (_, out) = entered(true);
        assert_eq!(out.signals[0], Signal::StopAllSounds);
        assert_eq!(out.sound_count(Sound::GameOverMusic), 1);
    }

    #[test]
    fn confirm_edge_restarts_gameplay() {
        let (mut scene, _) = entered(true);
        let b = body(ContactFlags::AIRBORNE, 0.0);

        let (t, _) = tick_scene(&mut scene, &InputState::new(), &b, &[]);
        assert_eq!(t, None);

        let (t, out) = tick_scene(&mut scene, &pressed(&[Key::Confirm]), &b, &[]);
        assert_eq!(
            t,
            Some(SceneTransition {
                to: SceneId::Gameplay,
                data: SceneData::None,
            })
        );
        assert!(out.signals.contains(&Signal::StopAllSounds));
    }

    #[test]
    fn held_confirm_does_not_restart() {
        let (mut scene, _) = entered(false);
        let b = body(ContactFlags::AIRBORNE, 0.0);
        let held = input_after(&[Key::Confirm], &[Key::Confirm]);
        assert_eq!(tick_scene(&mut scene, &held, &b, &[]).0, None);
    }

    #[test]
    fn missing_outcome_defaults_to_win_screen() {
        let mut scene = GameOverScene::new(0.3);
        scene.init(SceneData::None);
        assert_eq!(scene.serialize_state()["message"], WON_MESSAGE);
    }
}
