use serde::{Deserialize, Serialize};

use crate::config::LevelConfig;
use crate::progress::ProgressTracker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecyclePhase {
    Playing,
    Dead,
    Won,
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Died,
    Won,
}

impl Outcome {
    pub fn died(&self) -> bool {
        matches!(self, Outcome::Died)
    }
}

/// Playing until the player leaves the map or collects everything.
///
/// Death is checked before the win, so a tick satisfying both ends in
/// [`LifecyclePhase::Dead`].
#[derive(Debug, Clone)]
pub struct LifecycleStateMachine {
    phase: LifecyclePhase,
    level_height: f32,
    top_margin: f32,
}

impl LifecycleStateMachine {
    pub fn new(level: &LevelConfig) -> Self {
        Self {
            phase: LifecyclePhase::Playing,
            level_height: level.height_px(),
            top_margin: level.top_margin,
        }
    }

    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    pub fn is_terminal(&self) -> bool {
        self.phase != LifecyclePhase::Playing
    }

    /// Whether `y` lies outside the playable band.
    pub fn out_of_bounds(&self, y: f32) -> bool {
        y > self.level_height || y < self.top_margin
    }

    /// Evaluate this tick's terminal conditions. Returns the outcome on the
    /// tick the machine leaves `Playing`, and `None` otherwise.
    pub fn check(&mut self, y: f32, progress: &ProgressTracker) -> Option<Outcome> {
        if self.is_terminal() {
            return None;
        }

        let outcome = if self.out_of_bounds(y) {
            self.phase = LifecyclePhase::Dead;
            Outcome::Died
        } else if progress.is_complete() {
            self.phase = LifecyclePhase::Won;
            Outcome::Won
        } else {
            return None;
        };

        tracing::debug!(?outcome, y, collected = progress.collected(), "Session ended");
        Some(outcome)
    }
}
