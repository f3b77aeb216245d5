//! Storage access.
//!
//! The classification core only needs the four row sets and a way to apply the
//! change set. `GenealogyStore` is that seam; `RootsMagicStore` implements it
//! over a RootsMagic `SQLite` file.

mod rootsmagic;

pub use rootsmagic::RootsMagicStore;

use tracing::info;

use crate::error::Result;
use crate::types::{ChildRow, FamilyRow, NameRow, PersonId, PersonRow, SourceRows};

/// Source of family-graph rows and sink for the not-living update.
pub trait GenealogyStore {
    /// Every person with their living flag.
    fn read_persons(&self) -> Result<Vec<PersonRow>>;

    /// One primary legal name per person, with vital years.
    fn read_primary_names(&self) -> Result<Vec<NameRow>>;

    /// Every family with its parent ids.
    fn read_families(&self) -> Result<Vec<FamilyRow>>;

    /// Every family/child link.
    fn read_children(&self) -> Result<Vec<ChildRow>>;

    /// Mark the given persons not living.
    ///
    /// All-or-nothing: on error no person is updated. Returns the number of
    /// rows changed.
    fn apply_not_living(&mut self, ids: &[PersonId]) -> Result<usize>;

    /// Read all four row sets.
    fn read_all(&self) -> Result<SourceRows> {
        let rows = SourceRows {
            persons: self.read_persons()?,
            names: self.read_primary_names()?,
            families: self.read_families()?,
            children: self.read_children()?,
        };
        info!(
            persons = rows.persons.len(),
            names = rows.names.len(),
            families = rows.families.len(),
            children = rows.children.len(),
            "Read source rows"
        );
        Ok(rows)
    }
}
