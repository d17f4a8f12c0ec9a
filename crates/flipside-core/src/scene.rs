use std::fmt;

use serde::{Deserialize, Serialize};

use crate::body::{BodySnapshot, CollectibleId};
use crate::input::InputState;
use crate::signal::Outbox;

/// Scenes the game can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SceneId {
    Gameplay,
    GameOver,
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneId::Gameplay => write!(f, "gameplay"),
            SceneId::GameOver => write!(f, "game_over"),
        }
    }
}

/// Data handed to a scene when it starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneData {
    #[default]
    None,
    Outcome {
        died: bool,
    },
}

/// Request to leave the current scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneTransition {
    pub to: SceneId,
    pub data: SceneData,
}

/// Everything a scene may read during one tick.
pub struct Frame<'a> {
    pub input: &'a InputState,
    pub body: &'a BodySnapshot,
    /// Collectibles the engine reported overlapping the player this frame.
    pub overlaps: &'a [CollectibleId],
}

/// Capability interface every scene implements.
///
/// The [`SceneDirector`](crate::director::SceneDirector) drives the lifecycle:
/// a fresh scene is built, given its start data with `init`, entered, ticked
/// until it returns a transition, then exited and dropped.
pub trait Scene {
    fn id(&self) -> SceneId;

    /// Receive start data. Called once, before `on_enter`.
    fn init(&mut self, data: SceneData);

    fn on_enter(&mut self, out: &mut Outbox);

    /// Advance one frame. Returning a transition ends this scene; it is not
    /// ticked again.
    fn tick(&mut self, frame: &Frame<'_>, out: &mut Outbox) -> Option<SceneTransition>;

    fn on_exit(&mut self, _out: &mut Outbox) {}

    /// Observable scene state for tooling and tests.
    fn serialize_state(&self) -> serde_json::Value;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_ids_display_snake_case() {
        assert_eq!(SceneId::Gameplay.to_string(), "gameplay");
        assert_eq!(SceneId::GameOver.to_string(), "game_over");
    }

    #[test]
    fn scene_data_defaults_to_none() {
        assert_eq!(SceneData::default(), SceneData::None);
    }
}
