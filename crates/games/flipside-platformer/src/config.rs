use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Base horizontal acceleration (px/s^2).
pub const ACCELERATION: f32 = 400.0;
/// Acceleration multiplier applied when reversing direction.
pub const REVERSAL_MULTIPLIER: f32 = 5.0;
/// Velocity (px/s) past which a held direction counts as a reversal.
pub const REVERSAL_THRESHOLD: f32 = 5.0;
/// Horizontal drag once input is released. Lower than ACCELERATION feels icy.
pub const DRAG: f32 = 1100.0;
/// World gravity magnitude (px/s^2). Positive points down.
pub const GRAVITY: f32 = 1500.0;
/// Jump velocity off the floor. Negative is toward the top of the screen.
pub const JUMP_VELOCITY: f32 = -600.0;
/// Horizontal speed of walking-trail particles.
pub const PARTICLE_VELOCITY: f32 = 50.0;
/// Particles emitted by a jump burst.
pub const JUMP_BURST_COUNT: u32 = 10;
/// Collectibles needed to win.
pub const COLLECT_TARGET: u32 = 10;
/// Positions above this y (px) count as leaving the map through the top.
pub const TOP_MARGIN: f32 = 20.0;

/// Movement and jump tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub acceleration: f32,
    pub reversal_multiplier: f32,
    pub reversal_threshold: f32,
    pub drag: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub particle_velocity: f32,
    pub jump_burst_count: u32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            acceleration: ACCELERATION,
            reversal_multiplier: REVERSAL_MULTIPLIER,
            reversal_threshold: REVERSAL_THRESHOLD,
            drag: DRAG,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            particle_velocity: PARTICLE_VELOCITY,
            jump_burst_count: JUMP_BURST_COUNT,
        }
    }
}

/// Level geometry the core needs for bounds checks. The tilemap itself is
/// loaded by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Tile edge in pixels.
    pub tile_size: f32,
    pub width_tiles: u32,
    pub height_tiles: u32,
    pub top_margin: f32,
    pub spawn_x: f32,
    pub spawn_y: f32,
    /// Collectibles the engine places in the level.
    pub collectibles: u32,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            tile_size: 18.0,
            width_tiles: 100,
            height_tiles: 40,
            top_margin: TOP_MARGIN,
            spawn_x: 30.0,
            spawn_y: 630.0,
            collectibles: COLLECT_TARGET,
        }
    }
}

impl LevelConfig {
    /// Map height in pixels; the death boundary below the level.
    pub fn height_px(&self) -> f32 {
        self.height_tiles as f32 * self.tile_size
    }

    pub fn width_px(&self) -> f32 {
        self.width_tiles as f32 * self.tile_size
    }

    /// Where the player body starts, in world pixels.
    pub fn spawn(&self) -> Vec2 {
        Vec2::new(self.spawn_x, self.spawn_y)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub music_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            music_volume: 0.3,
        }
    }
}

/// Top-level platformer configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformerConfig {
    pub physics: PhysicsTuning,
    pub level: LevelConfig,
    pub audio: AudioConfig,
    pub collect_target: u32,
}

impl Default for PlatformerConfig {
    fn default() -> Self {
        Self {
            physics: PhysicsTuning::default(),
            level: LevelConfig::default(),
            audio: AudioConfig::default(),
            collect_target: COLLECT_TARGET,
        }
    }
}

impl PlatformerConfig {
    /// Load config from a TOML file. Falls back to defaults if the file is missing
    /// or unparseable.
    pub fn load() -> Self {
        let path = std::env::var("FLIPSIDE_CONFIG")
            .unwrap_or_else(|_| "config/flipside.toml".to_string());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(content) => Self::from_toml(&content).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse {path}: {e}, using defaults");
                PlatformerConfig::default()
            }),
            Err(_) => PlatformerConfig::default(),
        };
        config.reconcile_target(config.level.collectibles);
        config
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Force `collect_target` to the number of collectibles actually in the
    /// level. The win check is `collected == collect_target`, so any other
    /// target is either unreachable or skipped over. Returns whether the
    /// target changed.
    pub fn reconcile_target(&mut self, available: u32) -> bool {
        if self.collect_target == available {
            return false;
        }
        tracing::warn!(
            collect_target = self.collect_target,
            available,
            "Collect target does not match collectibles in the level, using {available}"
        );
        self.collect_target = available;
        true
    }
}
