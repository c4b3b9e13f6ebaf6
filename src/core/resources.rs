//! Core domain: shared resources.

use bevy::prelude::*;
use std::collections::HashSet;

/// Tracks whether something (dialogue, cutscene, menu) has taken the
/// player's controls. Locked while any source is active.
#[derive(Resource, Debug, Default)]
pub struct ControlLock {
    pub sources: HashSet<String>,
}

impl ControlLock {
    pub fn is_locked(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn lock(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unlock(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }
}
