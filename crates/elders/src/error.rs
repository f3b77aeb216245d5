//! Error types for elders operations.
//!
//! Every failure is terminal for the run. The change set is computed entirely
//! in memory before anything is written, so an error never leaves the database
//! half-updated: either the classification failed (nothing written) or the
//! write transaction rolled back (nothing written).
//!
//! ## Error Categorization
//!
//! - Data problems (the database content is inconsistent): `UnknownPerson`,
//!   `CyclicLineage`, `PersonNotFound`
//! - Infrastructure problems: `Database`, `Io`
//! - Operator problems (bad arguments or config): `Config`, `Yaml`
//! - API misuse: `LinksNotResolved`

use std::fmt;

use thiserror::Error;

use crate::types::{FamilyId, PersonId};

/// Result type for elders operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for elders operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration or arguments
    #[error("configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("invalid config file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON report could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A person id was requested that is not in the graph
    #[error("person not found: {0}")]
    PersonNotFound(PersonId),

    /// Generation counts were requested before the family links were wired
    #[error("family links not resolved; call resolve_links before counting generations")]
    LinksNotResolved,

    /// A family references a person that does not exist
    #[error("family {family} references unknown {role} {person}")]
    UnknownPerson {
        /// Family holding the dangling reference
        family: FamilyId,
        /// The id that did not resolve
        person: PersonId,
        /// Which slot of the family the id was in
        role: MemberRole,
    },

    /// A person turned out to be their own descendant
    #[error("cyclic lineage: {}", format_path(.path))]
    CyclicLineage {
        /// Ids along the cycle, starting and ending with the repeated person
        path: Vec<PersonId>,
    },
}

/// The slot a person occupies in a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    /// `FatherID`
    Father,
    /// `MotherID`
    Mother,
    /// A `ChildTable` row
    Child,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Father => write!(f, "father"),
            Self::Mother => write!(f, "mother"),
            Self::Child => write!(f, "child"),
        }
    }
}

fn format_path(path: &[PersonId]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

impl Error {
    /// Returns `true` if the error comes from inconsistent source data
    /// rather than from infrastructure or operator input.
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::PersonNotFound(_) | Self::UnknownPerson { .. } | Self::CyclicLineage { .. }
        )
    }
}
