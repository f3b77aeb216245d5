//! Domain types for elders.
//!
//! These types represent the core domain model:
//! - **Rows**: `PersonRow`, `NameRow`, `FamilyRow`, `ChildRow` (as read from storage)
//! - **Entities**: `Person`, `Family`, `NameInfo` (the in-memory family graph)
//!
//! ## Design Decisions
//!
//! | Decision | Choice | Rationale |
//! |----------|--------|-----------|
//! | Ids | Newtypes over i64 | SQLite keys; keeps person and family ids apart |
//! | Vital years | `Option<i32>` | RootsMagic stores 0 for unknown; mapped to `None` at the store |
//! | generation_count | `Option<u32>` | `None` (not computed) must differ from `Some(0)` |
//! | child_of | Single family | A person is attached to the last family listing them |

use std::fmt;

use serde::Serialize;

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

/// A strongly-typed person ID (`PersonTable.PersonID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for PersonId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strongly-typed family ID (`FamilyTable.FamilyID`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FamilyId(pub i64);

impl FamilyId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for FamilyId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for FamilyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Rows
// ============================================================================

/// One `PersonTable` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonRow {
    /// `PersonID`
    pub id: PersonId,
    /// `Living`; a `NULL` reads as `false`
    pub living: bool,
}

/// One primary-name row from `NameTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRow {
    /// `OwnerID`, the person this name belongs to
    pub id: PersonId,
    /// `Surname`
    pub surname: String,
    /// `Given`
    pub given: String,
    /// `BirthYear`, `None` when stored as `0` or `NULL`
    pub birth_year: Option<i32>,
    /// `DeathYear`, `None` when stored as `0` or `NULL`
    pub death_year: Option<i32>,
}

/// One `FamilyTable` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilyRow {
    /// `FamilyID`
    pub id: FamilyId,
    /// `FatherID`, `None` when stored as `0`
    pub father: Option<PersonId>,
    /// `MotherID`, `None` when stored as `0`
    pub mother: Option<PersonId>,
}

/// One `ChildTable` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRow {
    /// `FamilyID`
    pub family: FamilyId,
    /// `ChildID`
    pub child: PersonId,
}

/// Everything the graph loader needs, as read from storage in one pass.
#[derive(Debug, Clone, Default)]
pub struct SourceRows {
    /// Every person
    pub persons: Vec<PersonRow>,
    /// Primary names only
    pub names: Vec<NameRow>,
    /// Every family
    pub families: Vec<FamilyRow>,
    /// Child links, in read order
    pub children: Vec<ChildRow>,
}

// ============================================================================
// Entities
// ============================================================================

/// A person in the family graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Unique id
    pub id: PersonId,
    /// The flag this tool exists to flip
    pub living: bool,
    /// Birth year copied from the primary name
    pub birth_year: Option<i32>,
    /// Death year copied from the primary name
    pub death_year: Option<i32>,
    /// Memoized generation count; `None` until computed
    pub generation_count: Option<u32>,
    /// Families where this person is the father or mother
    pub parent_in: Vec<FamilyId>,
    /// The family this person is a child of, if any
    pub child_of: Option<FamilyId>,
}

impl Person {
    /// Create an unlinked person with no vital years.
    #[must_use]
    pub fn new(id: PersonId, living: bool) -> Self {
        Self {
            id,
            living,
            birth_year: None,
            death_year: None,
            generation_count: None,
            parent_in: Vec::new(),
            child_of: None,
        }
    }

    /// Returns `true` if this person has no recorded parent family.
    #[must_use]
    pub fn is_root_ancestor(&self) -> bool {
        self.child_of.is_none()
    }
}

/// A parental unit: up to two parents and their children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Family {
    /// Unique id
    pub id: FamilyId,
    /// Father, if recorded
    pub father: Option<PersonId>,
    /// Mother, if recorded
    pub mother: Option<PersonId>,
    /// Children in the order their rows were read
    pub children: Vec<PersonId>,
}

impl Family {
    /// Iterate over the parents that are present.
    pub fn parents(&self) -> impl Iterator<Item = PersonId> + '_ {
        self.father.into_iter().chain(self.mother)
    }
}

/// Display name and vital years for a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameInfo {
    /// Family name
    pub surname: String,
    /// Given names
    pub given: String,
    /// Year of birth, if known
    pub birth_year: Option<i32>,
    /// Year of death, if known
    pub death_year: Option<i32>,
}

impl NameInfo {
    /// Placeholder shown for persons without a primary name.
    pub const UNNAMED: &'static str = "<unnamed>";
}

impl From<&NameRow> for NameInfo {
    fn from(row: &NameRow) -> Self {
        Self {
            surname: row.surname.clone(),
            given: row.given.clone(),
            birth_year: row.birth_year,
            death_year: row.death_year,
        }
    }
}

impl fmt::Display for NameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.surname, self.given)
    }
}
