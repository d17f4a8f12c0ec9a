use std::collections::BTreeSet;

use flipside_core::body::CollectibleId;

/// Proof that a collectible was removed from the world. Only
/// [`CollectibleField::take`] creates one, and [`ProgressTracker::on_collect`]
/// consumes it, so each collectible counts at most once.
#[derive(Debug, PartialEq, Eq)]
#[must_use]
pub struct Collected {
    id: CollectibleId,
}

impl Collected {
    pub fn id(&self) -> CollectibleId {
        self.id
    }
}

/// Collectibles still present in the level.
#[derive(Debug, Clone, Default)]
pub struct CollectibleField {
    remaining: BTreeSet<CollectibleId>,
}

impl CollectibleField {
    pub fn new(ids: impl IntoIterator<Item = CollectibleId>) -> Self {
        Self {
            remaining: ids.into_iter().collect(),
        }
    }

    /// Remove a collectible on overlap. Returns `None` if it was already
    /// taken or never existed.
    pub fn take(&mut self, id: CollectibleId) -> Option<Collected> {
        self.remaining.remove(&id).then_some(Collected { id })
    }

    pub fn contains(&self, id: CollectibleId) -> bool {
        self.remaining.contains(&id)
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

/// Counts collected items against a fixed target.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    collected: u32,
    target: u32,
}

impl ProgressTracker {
    pub fn new(target: u32) -> Self {
        Self {
            collected: 0,
            target,
        }
    }

    /// Count a collectible that has just been removed from the world.
    /// Returns the new count.
    pub fn on_collect(&mut self, token: Collected) -> u32 {
        self.collected += 1;
        tracing::debug!(
            id = token.id,
            collected = self.collected,
            target = self.target,
            "Collectible picked up"
        );
        self.collected
    }

    pub fn collected(&self) -> u32 {
        self.collected
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_complete(&self) -> bool {
        self.collected == self.target
    }
}
