//! The pure classification pass.
//!
//! [`classify`] takes the rows read from storage and returns everything the
//! caller needs to report on or apply the run. Nothing here touches storage.

use serde::Serialize;
use tracing::info;

use crate::change_set::ChangeSet;
use crate::error::Result;
use crate::graph::{FamilyGraph, UnknownMemberPolicy};
use crate::liveness::{Reason, Thresholds, selection_reason};
use crate::types::{PersonId, SourceRows};

/// Per-person outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonSummary {
    /// `PersonID`
    pub id: PersonId,
    /// `"Surname, Given"`
    pub name: String,
    /// Living flag as read, before this run's changes
    pub living: bool,
    /// Birth year from the primary name
    pub birth_year: Option<i32>,
    /// Death year from the primary name
    pub death_year: Option<i32>,
    /// Longest chain of descendants below this person
    pub generation_count: u32,
    /// Set when the person is in the change set
    pub reason: Option<Reason>,
}

/// Result of classifying a whole database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Every person, id-ascending
    pub people: Vec<PersonSummary>,
    /// Ids to mark not living
    pub change_set: ChangeSet,
    /// Family references dropped by the unknown-member policy
    pub skipped_members: usize,
}

impl Classification {
    /// Summaries of the persons in the change set, in change-set order.
    pub fn selected(&self) -> impl Iterator<Item = &PersonSummary> {
        self.people.iter().filter(|p| p.reason.is_some())
    }
}

/// Load, link, count, and classify in one call.
///
/// # Errors
///
/// - [`crate::Error::UnknownPerson`] under [`UnknownMemberPolicy::Error`]
/// - [`crate::Error::CyclicLineage`] if any person is their own descendant
pub fn classify(
    rows: &SourceRows,
    thresholds: &Thresholds,
    policy: UnknownMemberPolicy,
) -> Result<Classification> {
    let mut graph = FamilyGraph::from_rows(rows);
    let skipped_members = graph.resolve_links(policy)?;
    let mut classification = classify_graph(&mut graph, thresholds)?;
    classification.skipped_members = skipped_members;
    Ok(classification)
}

/// Classify an already-linked graph.
///
/// # Errors
///
/// - [`crate::Error::LinksNotResolved`] if `resolve_links` has not run
/// - [`crate::Error::CyclicLineage`] if any person is their own descendant
pub fn classify_graph(graph: &mut FamilyGraph, thresholds: &Thresholds) -> Result<Classification> {
    graph.compute_generations()?;
    let change_set = ChangeSet::from_graph(graph, thresholds)?;

    let people = graph
        .persons()
        .map(|person| {
            let generation_count = person.generation_count.unwrap_or(0);
            PersonSummary {
                id: person.id,
                name: graph.display_name(person.id),
                living: person.living,
                birth_year: person.birth_year,
                death_year: person.death_year,
                generation_count,
                reason: selection_reason(person, generation_count, thresholds),
            }
        })
        .collect::<Vec<_>>();

    info!(
        people = people.len(),
        changes = change_set.len(),
        max_generations = thresholds.max_generations,
        max_age = thresholds.max_age,
        "Classification complete"
    );

    Ok(Classification {
        people,
        change_set,
        skipped_members: 0,
    })
}
