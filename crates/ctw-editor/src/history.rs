//! Undo/redo over whole-graph snapshots.
//!
//! Every mutating action records the graph before and after it. Undo
//! restores `before`, redo restores `after`. Entries past the cursor form
//! the redo branch, which the next recorded action discards.

use crate::engine::{GraphMutation, MapEngine};
use ctw_core::MapGraph;

#[derive(Debug, Clone)]
struct Snapshot {
    before: MapGraph,
    after: MapGraph,
    description: String,
}

pub struct History {
    entries: Vec<Snapshot>,
    /// Number of entries currently applied. `entries[..cursor]` can be
    /// undone, `entries[cursor..]` redone.
    cursor: usize,
    /// Maximum undo depth.
    max_depth: usize,
}

impl History {
    pub fn new(max_depth: usize) -> Self {
        Self {
            entries: Vec::with_capacity(max_depth.min(64)),
            cursor: 0,
            max_depth,
        }
    }

    /// Apply `mutations` as one undoable step.
    ///
    /// Nothing is recorded when the batch leaves the graph unchanged.
    /// Returns whether the graph changed.
    pub fn execute(
        &mut self,
        engine: &mut MapEngine,
        mutations: Vec<GraphMutation>,
        description: &str,
    ) -> bool {
        let before = engine.graph.clone();
        engine.apply_batch(mutations);
        if engine.graph == before {
            return false;
        }

        self.entries.truncate(self.cursor);
        self.entries.push(Snapshot {
            before,
            after: engine.graph.clone(),
            description: description.to_string(),
        });
        if self.entries.len() > self.max_depth {
            self.entries.remove(0);
        }
        self.cursor = self.entries.len();
        log::debug!("history: {description} ({} entries)", self.cursor);
        true
    }

    /// Step back one entry. Returns its description.
    pub fn undo(&mut self, engine: &mut MapEngine) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        let entry = &self.entries[self.cursor];
        engine.restore(entry.before.clone());
        log::debug!("undo: {}", entry.description);
        Some(entry.description.clone())
    }

    /// Re-apply the next undone entry. Returns its description.
    pub fn redo(&mut self, engine: &mut MapEngine) -> Option<String> {
        let entry = self.entries.get(self.cursor)?;
        engine.restore(entry.after.clone());
        log::debug!("redo: {}", entry.description);
        let description = entry.description.clone();
        self.cursor += 1;
        Some(description)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len()
    }

    /// Number of entries that can be undone.
    pub fn undo_depth(&self) -> usize {
        self.cursor
    }
}
