//! Working set of open scene documents.

use super::Stage;
use std::collections::HashMap;

/// In-memory working set keyed by document identity.
///
/// Authoring environments keep documents alive between runs; reauthoring
/// against an identity that is still resident must recycle and clear the
/// existing document rather than append to it, so reruns produce identical
/// topology.
#[derive(Debug, Default)]
pub struct StageCache {
    stages: HashMap<String, Stage>,
}

impl StageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, identity: &str) -> Option<&Stage> {
        self.stages.get(identity)
    }

    /// Opens the document at `identity`, clearing it if it already exists
    /// in the working set, or creates a fresh one.
    pub fn open_or_create(&mut self, identity: &str) -> &mut Stage {
        if self.stages.contains_key(identity) {
            log::info!("Recycling existing document in memory: {identity}");
        }
        let stage = self
            .stages
            .entry(identity.to_string())
            .or_insert_with(|| Stage::new(identity));
        stage.clear();
        stage
    }

    /// Inserts a document under its own identity, replacing any resident
    /// document with that identity.
    pub fn insert(&mut self, stage: Stage) -> &mut Stage {
        use std::collections::hash_map::Entry;

        match self.stages.entry(stage.identity().to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(stage);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(stage),
        }
    }

    pub fn remove(&mut self, identity: &str) -> Option<Stage> {
        self.stages.remove(identity)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
