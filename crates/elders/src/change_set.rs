//! The change set: persons selected for the not-living update.

use std::collections::HashSet;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::Result;
use crate::graph::FamilyGraph;
use crate::liveness::{Thresholds, selection_reason};
use crate::types::PersonId;

/// Ordered, deduplicated list of person ids to mark not living.
#[derive(Debug, Clone, Default)]
pub struct ChangeSet {
    ids: Vec<PersonId>,
    seen: HashSet<PersonId>,
}

impl ChangeSet {
    /// Create an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk every person id-ascending and collect those the inclusion rule selects.
    ///
    /// Generation counts are computed on demand and stay memoized on the graph.
    ///
    /// # Errors
    ///
    /// Propagates cyclic-lineage errors from the generation counter.
    pub fn from_graph(graph: &mut FamilyGraph, thresholds: &Thresholds) -> Result<Self> {
        let ids: Vec<PersonId> = graph.persons().map(|p| p.id).collect();
        let mut change_set = Self::new();

        for id in ids {
            let count = graph.generation_count(id)?;
            let Some(person) = graph.person(id) else {
                continue;
            };
            if let Some(reason) = selection_reason(person, count, thresholds) {
                debug!(person = %id, count, reason = reason.as_str(), "Selected");
                change_set.push(id);
            }
        }

        Ok(change_set)
    }

    /// Append an id unless it is already present. Returns `true` if added.
    pub fn push(&mut self, id: PersonId) -> bool {
        if self.seen.insert(id) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    /// Whether `id` is in the set.
    #[must_use]
    pub fn contains(&self, id: PersonId) -> bool {
        self.seen.contains(&id)
    }

    /// The ids in discovery order.
    #[must_use]
    pub fn ids(&self) -> &[PersonId] {
        &self.ids
    }

    /// Number of ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl PartialEq for ChangeSet {
    fn eq(&self, other: &Self) -> bool {
        self.ids == other.ids
    }
}

impl Eq for ChangeSet {}

impl Serialize for ChangeSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.ids.serialize(serializer)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a PersonId;
    type IntoIter = std::slice::Iter<'a, PersonId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
