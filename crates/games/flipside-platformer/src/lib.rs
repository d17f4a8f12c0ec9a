pub mod config;
pub mod game_over;
pub mod gameplay;
pub mod jump;
pub mod landing;
pub mod lifecycle;
pub mod movement;
pub mod orientation;
pub mod player;
pub mod progress;

use flipside_core::body::CollectibleId;
use flipside_core::director::{SceneDirector, SceneFactory};
use flipside_core::scene::{Frame, Scene, SceneData, SceneId, SceneTransition};
use flipside_core::signal::Outbox;

use config::PlatformerConfig;
use game_over::GameOverScene;
use gameplay::GameplayScene;

/// Builds fresh Flipside scenes from the loaded config and level manifest.
pub struct FlipsideScenes {
    config: PlatformerConfig,
    collectibles: Vec<CollectibleId>,
}

impl SceneFactory for FlipsideScenes {
    fn build(&self, id: SceneId) -> Box<dyn Scene> {
        match id {
            SceneId::Gameplay => Box::new(GameplayScene::new(
                self.config.clone(),
                &self.collectibles,
            )),
            SceneId::GameOver => Box::new(GameOverScene::new(self.config.audio.music_volume)),
        }
    }
}

/// The whole game: a gameplay scene and a game-over scene behind a director.
pub struct FlipsideGame {
    director: SceneDirector<FlipsideScenes>,
}

impl FlipsideGame {
    /// Start in the gameplay scene with collectibles numbered `0..n` as the
    /// level config declares.
    pub fn new(config: PlatformerConfig, out: &mut Outbox) -> Self {
        let collectibles = (0..config.level.collectibles).collect();
        Self::with_collectibles(config, collectibles, out)
    }

    /// Start with the collectible ids the engine placed in the level. The
    /// win target follows the number of distinct ids.
    pub fn with_collectibles(
        mut config: PlatformerConfig,
        mut collectibles: Vec<CollectibleId>,
        out: &mut Outbox,
    ) -> Self {
        collectibles.sort_unstable();
        collectibles.dedup();
        config.reconcile_target(u32::try_from(collectibles.len()).unwrap_or(u32::MAX));
        let scenes = FlipsideScenes {
            config,
            collectibles,
        };
        Self {
            director: SceneDirector::start(scenes, SceneId::Gameplay, SceneData::None, out),
        }
    }

    pub fn tick(&mut self, frame: &Frame<'_>, out: &mut Outbox) -> Option<SceneTransition> {
        self.director.tick(frame, out)
    }

    pub fn active_scene(&self) -> SceneId {
        self.director.active_id()
    }

    pub fn state(&self) -> serde_json::Value {
        self.director.active().serialize_state()
    }

    /// Collectibles needed to win this game.
    pub fn collect_target(&self) -> u32 {
        self.director.factory().config.collect_target
    }

    pub fn transitions(&self) -> u32 {
        self.director.transitions()
    }
}
