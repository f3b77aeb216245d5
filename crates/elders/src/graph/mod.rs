//! The in-memory family graph.
//!
//! `FamilyGraph` owns every person, name, and family for one run. It is built
//! from flat storage rows by [`FamilyGraph::from_rows`], linked by
//! [`FamilyGraph::resolve_links`], and then queried for generation counts
//! (see `generations`) and cyclic lineages (see `cycles`).
//!
//! ## Design
//!
//! - Maps are `BTreeMap`s keyed by id, so every walk over persons or families
//!   is id-ascending and runs are reproducible.
//! - Loading never fails. Dangling references are handled once, during link
//!   resolution, according to an explicit [`UnknownMemberPolicy`].

mod cycles;
mod generations;

pub use cycles::{Cycle, find_cycles};

use std::collections::BTreeMap;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{Error, MemberRole, Result};
use crate::types::{Family, FamilyId, NameInfo, Person, PersonId, SourceRows};

/// What to do when a family references a person id that was never loaded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownMemberPolicy {
    /// Ignore the reference. Unknown children are dropped from the family.
    #[default]
    Skip,
    /// Fail the run with [`Error::UnknownPerson`].
    Error,
}

impl UnknownMemberPolicy {
    /// Decide the fate of one dangling reference.
    fn admit(self, family: FamilyId, person: PersonId, role: MemberRole) -> Result<()> {
        match self {
            Self::Skip => {
                debug!(%family, %person, %role, "Skipping unknown family member");
                Ok(())
            }
            Self::Error => Err(Error::UnknownPerson {
                family,
                person,
                role,
            }),
        }
    }
}

/// Persons, names, and families for a single run.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    persons: BTreeMap<PersonId, Person>,
    names: BTreeMap<PersonId, NameInfo>,
    families: BTreeMap<FamilyId, Family>,
    links_resolved: bool,
    evaluations: usize,
}

impl FamilyGraph {
    /// Build the graph from storage rows.
    ///
    /// Duplicate ids overwrite earlier rows. Vital years are copied from each
    /// person's primary name onto the person. Child rows pointing at an
    /// unknown family have nowhere to go and are dropped.
    #[must_use]
    pub fn from_rows(rows: &SourceRows) -> Self {
        let mut persons: BTreeMap<PersonId, Person> = rows
            .persons
            .iter()
            .map(|row| (row.id, Person::new(row.id, row.living)))
            .collect();

        let names: BTreeMap<PersonId, NameInfo> = rows
            .names
            .iter()
            .map(|row| (row.id, NameInfo::from(row)))
            .collect();

        for (id, name) in &names {
            if let Some(person) = persons.get_mut(id) {
                person.birth_year = name.birth_year;
                person.death_year = name.death_year;
            }
        }

        let mut families: BTreeMap<FamilyId, Family> = rows
            .families
            .iter()
            .map(|row| {
                (
                    row.id,
                    Family {
                        id: row.id,
                        father: row.father,
                        mother: row.mother,
                        children: Vec::new(),
                    },
                )
            })
            .collect();

        let mut orphan_rows = 0usize;
        for row in &rows.children {
            if let Some(family) = families.get_mut(&row.family) {
                family.children.push(row.child);
            } else {
                debug!(family = %row.family, child = %row.child, "Child row for unknown family");
                orphan_rows += 1;
            }
        }
        if orphan_rows > 0 {
            warn!(
                count = orphan_rows,
                "Ignored child rows that reference unknown families"
            );
        }

        info!(
            persons = persons.len(),
            names = names.len(),
            families = families.len(),
            "Loaded family graph"
        );

        Self {
            persons,
            names,
            families,
            links_resolved: false,
            evaluations: 0,
        }
    }

    /// Wire every person to the families they belong to.
    ///
    /// Each child gets `child_of`, each known parent gets the family appended
    /// to `parent_in`. Unknown ids are handled by `policy`. Returns the number
    /// of references that were skipped. Calling this again is a no-op.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownPerson`] under [`UnknownMemberPolicy::Error`]. The graph
    /// is left untouched in that case.
    pub fn resolve_links(&mut self, policy: UnknownMemberPolicy) -> Result<usize> {
        if self.links_resolved {
            return Ok(0);
        }
        if policy == UnknownMemberPolicy::Error {
            self.check_members()?;
        }

        let mut skipped = 0usize;

        for family in self.families.values_mut() {
            let family_id = family.id;

            let mut unknown_children = Vec::new();
            for &child in &family.children {
                if let Some(person) = self.persons.get_mut(&child) {
                    if let Some(previous) = person.child_of.replace(family_id)
                        && previous != family_id
                    {
                        debug!(
                            person = %child,
                            %previous,
                            family = %family_id,
                            "Person is a child of several families, keeping the last"
                        );
                    }
                } else {
                    policy.admit(family_id, child, MemberRole::Child)?;
                    unknown_children.push(child);
                }
            }
            if !unknown_children.is_empty() {
                family
                    .children
                    .retain(|child| !unknown_children.contains(child));
                skipped += unknown_children.len();
            }

            let parents = [
                (family.father, MemberRole::Father),
                (family.mother, MemberRole::Mother),
            ];
            for (parent, role) in parents {
                let Some(parent) = parent else {
                    continue;
                };
                if let Some(person) = self.persons.get_mut(&parent) {
                    if !person.parent_in.contains(&family_id) {
                        person.parent_in.push(family_id);
                    }
                } else {
                    policy.admit(family_id, parent, role)?;
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            warn!(count = skipped, "Skipped family members with unknown ids");
        }

        self.links_resolved = true;
        Ok(skipped)
    }

    /// Fail on the first family member that was never loaded, family id order.
    fn check_members(&self) -> Result<()> {
        for family in self.families.values() {
            let members = family
                .children
                .iter()
                .map(|&child| (child, MemberRole::Child))
                .chain(family.father.map(|father| (father, MemberRole::Father)))
                .chain(family.mother.map(|mother| (mother, MemberRole::Mother)));
            for (person, role) in members {
                if !self.persons.contains_key(&person) {
                    return UnknownMemberPolicy::Error.admit(family.id, person, role);
                }
            }
        }
        Ok(())
    }

    /// Get a person by id.
    #[must_use]
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    /// Get a person's primary name, if one was loaded.
    #[must_use]
    pub fn name(&self, id: PersonId) -> Option<&NameInfo> {
        self.names.get(&id)
    }

    /// `"Surname, Given"`, or a placeholder when the person has no name row.
    #[must_use]
    pub fn display_name(&self, id: PersonId) -> String {
        self.names
            .get(&id)
            .map_or_else(|| NameInfo::UNNAMED.to_string(), ToString::to_string)
    }

    /// Get a family by id.
    #[must_use]
    pub fn family(&self, id: FamilyId) -> Option<&Family> {
        self.families.get(&id)
    }

    /// All persons, id-ascending.
    pub fn persons(&self) -> impl Iterator<Item = &Person> {
        self.persons.values()
    }

    /// All families, id-ascending.
    pub fn families(&self) -> impl Iterator<Item = &Family> {
        self.families.values()
    }

    /// Number of loaded persons.
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.persons.len()
    }

    /// Number of loaded families.
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Whether [`resolve_links`](Self::resolve_links) has completed.
    #[must_use]
    pub fn links_resolved(&self) -> bool {
        self.links_resolved
    }
}
