use std::path::Path;

use glam::Vec2;
use serde::Deserialize;

use flipside_core::body::{BodySnapshot, CollectibleId, ContactFlags};
use flipside_core::input::Key;

/// A scripted run: what the engine would report for each frame.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tape {
    pub frame: Vec<TapeFrame>,
}

/// One tape entry. `repeat` replays the same entry for that many frames.
/// A missing `x` or `y` falls back to the level spawn point. Keys can be
/// given as logical names in `held` or as DOM key codes in `codes`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TapeFrame {
    pub held: Vec<Key>,
    pub codes: Vec<String>,
    pub blocked_down: bool,
    pub blocked_up: bool,
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub overlaps: Vec<CollectibleId>,
    pub repeat: u32,
}

impl Default for TapeFrame {
    fn default() -> Self {
        Self {
            held: Vec::new(),
            codes: Vec::new(),
            blocked_down: true,
            blocked_up: false,
            x: None,
            y: None,
            velocity_x: 0.0,
            velocity_y: 0.0,
            overlaps: Vec::new(),
            repeat: 1,
        }
    }
}

impl TapeFrame {
    /// Every key held during this entry.
    pub fn held_keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.held
            .iter()
            .copied()
            .chain(self.codes.iter().filter_map(|code| Key::from_code(code)))
    }

    pub fn body(&self, spawn: Vec2) -> BodySnapshot {
        let contacts = ContactFlags {
            blocked_down: self.blocked_down,
            blocked_up: self.blocked_up,
        };
        let position = Vec2::new(self.x.unwrap_or(spawn.x), self.y.unwrap_or(spawn.y));
        BodySnapshot::new(position, contacts)
            .with_velocity(Vec2::new(self.velocity_x, self.velocity_y))
    }
}

#[derive(Debug)]
pub enum TapeError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    UnknownKeyCode(String),
}

impl std::fmt::Display for TapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read tape: {e}"),
            Self::Parse(e) => write!(f, "invalid tape: {e}"),
            Self::UnknownKeyCode(code) => write!(f, "invalid tape: unknown key code {code:?}"),
        }
    }
}

impl std::error::Error for TapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::UnknownKeyCode(_) => None,
        }
    }
}

impl From<std::io::Error> for TapeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for TapeError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl Tape {
    pub fn load(path: &Path) -> Result<Self, TapeError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(s: &str) -> Result<Self, TapeError> {
        let tape: Tape = toml::from_str(s)?;
        let unknown = tape
            .frame
            .iter()
            .flat_map(|f| &f.codes)
            .find(|code| Key::from_code(code).is_none());
        match unknown {
            Some(code) => Err(TapeError::UnknownKeyCode(code.clone())),
            None => Ok(tape),
        }
    }

    /// Total frames after expanding repeats.
    pub fn frame_count(&self) -> u32 {
        self.frame.iter().map(|f| f.repeat).sum()
    }
}
