use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Logical keys the gameplay core cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Jump,
    ToggleGravity,
    ToggleDebug,
    Confirm,
}

impl Key {
    /// Map a DOM-style key code to a logical key.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Jump),
            "KeyG" => Some(Key::ToggleGravity),
            "KeyD" => Some(Key::ToggleDebug),
            "Enter" => Some(Key::Confirm),
            _ => None,
        }
    }
}

/// Keyboard state for one tick, with edges derived from the previous tick.
///
/// The input layer either reports discrete down/up events as they arrive or
/// hands over the full held set once per tick via [`InputState::sample`].
/// Both paths latch edges until [`InputState::end_frame`].
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_down: HashSet<Key>,
    /// Keys pressed this frame (cleared each frame).
    keys_just_pressed: HashSet<Key>,
    /// Keys released this frame (cleared each frame).
    keys_just_released: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a key down event. Repeats while held do not produce a new edge.
    pub fn on_key_down(&mut self, key: Key) {
        if self.keys_down.insert(key) {
            self.keys_just_pressed.insert(key);
        }
    }

    /// Register a key release.
    pub fn on_key_up(&mut self, key: Key) {
        if self.keys_down.remove(&key) {
            self.keys_just_released.insert(key);
        }
    }

    /// Replace the held set with this tick's polled state, deriving edges by
    /// comparing against the previous tick.
    pub fn sample(&mut self, held: impl IntoIterator<Item = Key>) {
        let now: HashSet<Key> = held.into_iter().collect();
        self.keys_just_pressed = now.difference(&self.keys_down).copied().collect();
        self.keys_just_released = self.keys_down.difference(&now).copied().collect();
        self.keys_down = now;
    }

    /// Check if a key is currently held.
    pub fn is_key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Check if a key went down this frame.
    pub fn is_key_just_pressed(&self, key: Key) -> bool {
        self.keys_just_pressed.contains(&key)
    }

    /// Check if a key went up this frame.
    pub fn is_key_just_released(&self, key: Key) -> bool {
        self.keys_just_released.contains(&key)
    }

    /// Clear per-frame edges. Call at the end of each frame.
    pub fn end_frame(&mut self) {
        self.keys_just_pressed.clear();
        self.keys_just_released.clear();
    }
}
