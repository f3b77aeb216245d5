//! Liveness classification.
//!
//! A person is selected for the not-living update when they are still marked
//! living and either have more generations of descendants than allowed or
//! their vital years say they are too old to be alive.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::FamilyGraph;
use crate::types::{Person, PersonId};

/// Limits applied by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Anyone with more generations of descendants than this is not living
    pub max_generations: u32,
    /// Anyone born more than this many years before `current_year` is not living
    pub max_age: i32,
    /// The year ages are measured against
    pub current_year: i32,
}

/// Why a person was selected.
///
/// When several apply, the first in declaration order is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// Generation count exceeds `max_generations`
    Generations,
    /// A death year is recorded
    Deceased,
    /// Birth year is more than `max_age` years ago
    Age,
}

impl Reason {
    /// Short label for reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generations => "too many generations",
            Self::Deceased => "death recorded",
            Self::Age => "too old",
        }
    }
}

/// Decide from vital years alone whether a person cannot be living.
///
/// A recorded death year wins regardless of age. Otherwise a birth year more
/// than `max_age` years before `current_year` counts. With neither year known
/// the answer is `false`.
#[must_use]
pub fn is_too_old(
    birth_year: Option<i32>,
    death_year: Option<i32>,
    max_age: i32,
    current_year: i32,
) -> bool {
    if death_year.is_some() {
        return true;
    }
    // Widened so corrupt years far outside any calendar cannot overflow.
    birth_year.is_some_and(|born| {
        let age = i64::from(current_year) - i64::from(born);
        age > i64::from(max_age)
    })
}

/// Apply the inclusion rule to a person whose generation count is known.
///
/// Returns `None` for persons already marked not living.
#[must_use]
pub fn selection_reason(
    person: &Person,
    generation_count: u32,
    thresholds: &Thresholds,
) -> Option<Reason> {
    if !person.living {
        return None;
    }
    if generation_count > thresholds.max_generations {
        return Some(Reason::Generations);
    }
    if person.death_year.is_some() {
        return Some(Reason::Deceased);
    }
    is_too_old(
        person.birth_year,
        None,
        thresholds.max_age,
        thresholds.current_year,
    )
    .then_some(Reason::Age)
}

impl FamilyGraph {
    /// [`is_too_old`] for a person in the graph.
    ///
    /// # Errors
    ///
    /// [`Error::PersonNotFound`] if the id is unknown.
    pub fn is_too_old(&self, id: PersonId, max_age: i32, current_year: i32) -> Result<bool> {
        let person = self.person(id).ok_or(Error::PersonNotFound(id))?;
        Ok(is_too_old(
            person.birth_year,
            person.death_year,
            max_age,
            current_year,
        ))
    }
}
