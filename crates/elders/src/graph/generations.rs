//! Generation counting.
//!
//! The generation count of a person is the length of their longest descendant
//! chain: `0` with no children, otherwise `1 + max(count(child))` over every
//! child of every family where they are a parent.
//!
//! ## Algorithm
//!
//! Post-order depth-first traversal over an explicit stack. Each frame holds
//! the person, the flattened list of their children, a cursor into that list,
//! and the best count seen so far. A finished frame stores its count on the
//! `Person` before its parent frame reads it, so every person is evaluated at
//! most once per run no matter how many ancestors reach them.
//!
//! Persons on the stack are tracked in an in-progress set. Meeting one of them
//! again means the person is their own descendant, which is reported as
//! [`Error::CyclicLineage`] with the offending chain.

use std::collections::HashSet;

use tracing::{debug, info};

use super::FamilyGraph;
use crate::error::{Error, Result};
use crate::types::PersonId;

/// One person being evaluated.
#[derive(Debug)]
struct Frame {
    person: PersonId,
    children: Vec<PersonId>,
    next: usize,
    best: u32,
}

impl FamilyGraph {
    /// Generation count of one person, computing and memoizing it if needed.
    ///
    /// Requires [`resolve_links`](Self::resolve_links) to have run, so that
    /// no count is ever memoized from an unlinked graph.
    ///
    /// # Errors
    ///
    /// - [`Error::LinksNotResolved`] if the graph has not been linked yet
    /// - [`Error::PersonNotFound`] if `id` (or a child reached from it) is unknown
    /// - [`Error::CyclicLineage`] if a person is reachable from themselves
    pub fn generation_count(&mut self, id: PersonId) -> Result<u32> {
        if !self.links_resolved {
            return Err(Error::LinksNotResolved);
        }
        if let Some(count) = self.memoized(id)? {
            return Ok(count);
        }

        let mut in_progress: HashSet<PersonId> = HashSet::new();
        in_progress.insert(id);
        let mut stack = vec![self.frame_for(id)?];

        while let Some(frame) = stack.last_mut() {
            if let Some(&child) = frame.children.get(frame.next) {
                frame.next += 1;

                if let Some(count) = self.memoized(child)? {
                    frame.best = frame.best.max(count + 1);
                } else if in_progress.contains(&child) {
                    let path = cycle_path(&stack, child);
                    debug!(person = %child, depth = stack.len(), "Cycle found during generation count");
                    return Err(Error::CyclicLineage { path });
                } else {
                    in_progress.insert(child);
                    stack.push(self.frame_for(child)?);
                }
                continue;
            }

            let Some(finished) = stack.pop() else {
                break;
            };
            let count = finished.best;
            self.memoize(finished.person, count);
            in_progress.remove(&finished.person);

            match stack.last_mut() {
                Some(parent) => parent.best = parent.best.max(count + 1),
                None => return Ok(count),
            }
        }

        // The loop only exits through the root frame's return above.
        self.memoized(id)?.ok_or(Error::PersonNotFound(id))
    }

    /// Compute the generation count of every person, id-ascending.
    ///
    /// # Errors
    ///
    /// Fails on an unlinked graph and stops at the first cyclic lineage.
    pub fn compute_generations(&mut self) -> Result<()> {
        let ids: Vec<PersonId> = self.persons.keys().copied().collect();
        for id in ids {
            self.generation_count(id)?;
        }

        info!(
            persons = self.persons.len(),
            evaluations = self.evaluations,
            deepest = self
                .persons
                .values()
                .filter_map(|p| p.generation_count)
                .max()
                .unwrap_or(0),
            "Generation counts computed"
        );
        Ok(())
    }

    /// Number of persons whose count has actually been evaluated (not reused).
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    fn memoized(&self, id: PersonId) -> Result<Option<u32>> {
        self.persons
            .get(&id)
            .map(|p| p.generation_count)
            .ok_or(Error::PersonNotFound(id))
    }

    fn memoize(&mut self, id: PersonId, count: u32) {
        if let Some(person) = self.persons.get_mut(&id) {
            person.generation_count = Some(count);
            self.evaluations += 1;
        }
    }

    fn frame_for(&self, id: PersonId) -> Result<Frame> {
        let person = self.persons.get(&id).ok_or(Error::PersonNotFound(id))?;
        let children = person
            .parent_in
            .iter()
            .filter_map(|family| self.families.get(family))
            .flat_map(|family| family.children.iter().copied())
            .collect();

        Ok(Frame {
            person: id,
            children,
            next: 0,
            best: 0,
        })
    }
}

/// The chain from the first occurrence of `repeated` on the stack back to it.
fn cycle_path(stack: &[Frame], repeated: PersonId) -> Vec<PersonId> {
    let start = stack
        .iter()
        .position(|frame| frame.person == repeated)
        .unwrap_or(0);

    stack[start..]
        .iter()
        .map(|frame| frame.person)
        .chain(std::iter::once(repeated))
        .collect()
}
