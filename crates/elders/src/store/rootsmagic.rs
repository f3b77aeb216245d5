//! RootsMagic `SQLite` storage.
//!
//! Reads `PersonTable`, `NameTable`, `FamilyTable`, and `ChildTable` from a
//! RootsMagic 7/8 database (`.rmgc` / `.rmtree`) and writes the `Living` flag
//! back to `PersonTable`.
//!
//! RootsMagic encodes "unknown" as `0` for years and parent ids; those are
//! mapped to `None` here so the core never sees the sentinel.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, Row};
use tracing::{debug, info};

use super::GenealogyStore;
use crate::error::{Error, Result};
use crate::types::{ChildRow, FamilyId, FamilyRow, NameRow, PersonId, PersonRow};

/// File extensions RootsMagic uses for its databases.
const EXTENSIONS: [&str; 2] = ["rmgc", "rmtree"];

const PERSONS_SQL: &str = "SELECT PersonID, Living FROM PersonTable ORDER BY PersonID";

/// Primary legal name only: `NameType = 0` is the birth name.
const NAMES_SQL: &str = "SELECT OwnerID, Surname, Given, BirthYear, DeathYear
     FROM NameTable
     WHERE NameType = 0 AND IsPrimary > 0
     ORDER BY OwnerID";

const FAMILIES_SQL: &str = "SELECT FamilyID, FatherID, MotherID FROM FamilyTable ORDER BY FamilyID";

const CHILDREN_SQL: &str = "SELECT FamilyID, ChildID FROM ChildTable";

const SET_NOT_LIVING_SQL: &str = "UPDATE PersonTable SET Living = 0 WHERE PersonID = ?1";

/// A RootsMagic database file.
pub struct RootsMagicStore {
    conn: Connection,
    path: PathBuf,
}

impl RootsMagicStore {
    /// Open an existing RootsMagic database.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the file name does not end in `.rmgc` or `.rmtree`
    /// or the file does not exist; [`Error::Database`] if `SQLite` cannot open it.
    pub fn open(path: &Path) -> Result<Self> {
        Self::check_extension(path)?;
        if !path.is_file() {
            return Err(Error::Config(format!("file not found: {}", path.display())));
        }

        let conn = Connection::open(path)?;

        // RootsMagic declares its text columns with a proprietary collation.
        // Any query touching them fails unless a collation of that name exists.
        conn.create_collation("RMNOCASE", rmnocase)?;

        debug!(path = %path.display(), "Opened RootsMagic database");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    /// Path of the open database.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn check_extension(path: &Path) -> Result<()> {
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));

        if matches {
            Ok(())
        } else {
            Err(Error::Config(format!(
                "given file does not match RootsMagic name types (.rmgc, .rmtree): {}",
                path.display()
            )))
        }
    }

    fn query<T>(&self, sql: &str, map: fn(&Row<'_>) -> rusqlite::Result<T>) -> Result<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map([], map)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

impl GenealogyStore for RootsMagicStore {
    fn read_persons(&self) -> Result<Vec<PersonRow>> {
        self.query(PERSONS_SQL, row_to_person)
    }

    fn read_primary_names(&self) -> Result<Vec<NameRow>> {
        self.query(NAMES_SQL, row_to_name)
    }

    fn read_families(&self) -> Result<Vec<FamilyRow>> {
        self.query(FAMILIES_SQL, row_to_family)
    }

    fn read_children(&self) -> Result<Vec<ChildRow>> {
        self.query(CHILDREN_SQL, row_to_child)
    }

    fn apply_not_living(&mut self, ids: &[PersonId]) -> Result<usize> {
        let tx = self.conn.transaction()?;

        let mut changed = 0usize;
        {
            let mut stmt = tx.prepare(SET_NOT_LIVING_SQL)?;
            for id in ids {
                changed += stmt.execute([id.as_i64()])?;
            }
        }

        tx.commit()?;
        info!(requested = ids.len(), changed, "Applied not-living update");
        Ok(changed)
    }
}

/// Case-insensitive comparison standing in for RootsMagic's `RMNOCASE`.
fn rmnocase(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// `0` and `NULL` both mean "no such person".
fn optional_person(value: Option<i64>) -> Option<PersonId> {
    value.filter(|&id| id != 0).map(PersonId)
}

/// `0` and `NULL` both mean "year unknown".
fn optional_year(value: Option<i64>) -> Option<i32> {
    value
        .filter(|&year| year != 0)
        .and_then(|year| i32::try_from(year).ok())
}

fn row_to_person(row: &Row<'_>) -> rusqlite::Result<PersonRow> {
    let living: Option<i64> = row.get(1)?;
    Ok(PersonRow {
        id: PersonId(row.get(0)?),
        living: living.unwrap_or(0) != 0,
    })
}

fn row_to_name(row: &Row<'_>) -> rusqlite::Result<NameRow> {
    let surname: Option<String> = row.get(1)?;
    let given: Option<String> = row.get(2)?;
    Ok(NameRow {
        id: PersonId(row.get(0)?),
        surname: surname.unwrap_or_default(),
        given: given.unwrap_or_default(),
        birth_year: optional_year(row.get(3)?),
        death_year: optional_year(row.get(4)?),
    })
}

fn row_to_family(row: &Row<'_>) -> rusqlite::Result<FamilyRow> {
    Ok(FamilyRow {
        id: FamilyId(row.get(0)?),
        father: optional_person(row.get(1)?),
        mother: optional_person(row.get(2)?),
    })
}

fn row_to_child(row: &Row<'_>) -> rusqlite::Result<ChildRow> {
    Ok(ChildRow {
        family: FamilyId(row.get(0)?),
        child: PersonId(row.get(1)?),
    })
}
