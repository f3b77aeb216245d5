//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use rusqlite::{Connection, params};
use tempfile::TempDir;

/// The slice of the RootsMagic 8 schema that elders reads and writes.
pub const ROOTSMAGIC_SCHEMA: &str = r"
CREATE TABLE PersonTable (
    PersonID INTEGER PRIMARY KEY,
    Sex INTEGER,
    Living INTEGER
);

CREATE TABLE NameTable (
    NameID INTEGER PRIMARY KEY,
    OwnerID INTEGER,
    Surname TEXT COLLATE RMNOCASE,
    Given TEXT COLLATE RMNOCASE,
    NameType INTEGER,
    IsPrimary INTEGER,
    BirthYear INTEGER,
    DeathYear INTEGER
);

CREATE INDEX idxSurname ON NameTable (Surname);

CREATE TABLE FamilyTable (
    FamilyID INTEGER PRIMARY KEY,
    FatherID INTEGER,
    MotherID INTEGER
);

CREATE TABLE ChildTable (
    RecID INTEGER PRIMARY KEY,
    ChildID INTEGER,
    FamilyID INTEGER,
    ChildOrder INTEGER
);
";

/// A RootsMagic-shaped database in a temporary directory.
pub struct TestTree {
    pub dir: TempDir,
    pub path: PathBuf,
    conn: Connection,
}

impl TestTree {
    /// Create an empty tree file named `family.rmtree`.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("family.rmtree");
        let conn = Connection::open(&path).expect("failed to create database");
        conn.create_collation("RMNOCASE", |a: &str, b: &str| {
            a.to_lowercase().cmp(&b.to_lowercase())
        })
        .expect("failed to register collation");
        conn.execute_batch(ROOTSMAGIC_SCHEMA)
            .expect("failed to create schema");
        Self { dir, path, conn }
    }

    /// Add a person with a primary name. Years of `0` mean unknown.
    pub fn person(&self, id: i64, living: bool, given: &str, birth: i64, death: i64) -> &Self {
        self.conn
            .execute(
                "INSERT INTO PersonTable (PersonID, Sex, Living) VALUES (?1, 0, ?2)",
                params![id, i64::from(living)],
            )
            .expect("insert person");
        self.conn
            .execute(
                "INSERT INTO NameTable (OwnerID, Surname, Given, NameType, IsPrimary, BirthYear, DeathYear)
                 VALUES (?1, 'Test', ?2, 0, 1, ?3, ?4)",
                params![id, given, birth, death],
            )
            .expect("insert name");
        self
    }

    /// Add an alternate (non-primary) name that must be ignored.
    pub fn alternate_name(&self, id: i64, given: &str) -> &Self {
        self.conn
            .execute(
                "INSERT INTO NameTable (OwnerID, Surname, Given, NameType, IsPrimary, BirthYear, DeathYear)
                 VALUES (?1, 'Alias', ?2, 1, 0, 1700, 1750)",
                params![id, given],
            )
            .expect("insert alternate name");
        self
    }

    /// Add a family. A parent id of `0` means no parent, as RootsMagic stores it.
    pub fn family(&self, id: i64, father: i64, mother: i64, children: &[i64]) -> &Self {
        self.conn
            .execute(
                "INSERT INTO FamilyTable (FamilyID, FatherID, MotherID) VALUES (?1, ?2, ?3)",
                params![id, father, mother],
            )
            .expect("insert family");
        for (order, child) in children.iter().enumerate() {
            self.conn
                .execute(
                    "INSERT INTO ChildTable (ChildID, FamilyID, ChildOrder) VALUES (?1, ?2, ?3)",
                    params![child, id, order as i64],
                )
                .expect("insert child");
        }
        self
    }

    /// Make any update touching `id` fail.
    pub fn lock_person(&self, id: i64) -> &Self {
        self.conn
            .execute_batch(&format!(
                "CREATE TRIGGER lock_{id} BEFORE UPDATE ON PersonTable
                 WHEN NEW.PersonID = {id}
                 BEGIN SELECT RAISE(ABORT, 'person {id} is locked'); END;"
            ))
            .expect("create trigger");
        self
    }

    /// Read the stored living flag.
    pub fn is_living(&self, id: i64) -> bool {
        let living: i64 = self
            .conn
            .query_row(
                "SELECT Living FROM PersonTable WHERE PersonID = ?1",
                [id],
                |row| row.get(0),
            )
            .expect("query living");
        living != 0
    }
}

/// The standard test lineage.
///
/// ```text
/// 1 Great-great (b. 1790)
///  └─ 2 Great (b. 1820) ── 3 Grand (b. 1850) ── 4 Parent (b. 1950) ── 5 Child (b. 1980)
/// 6 Widow (d. 1990)
/// 7 Cousin (b. 1985, already not living)
/// ```
pub fn standard_tree() -> TestTree {
    let tree = TestTree::new();
    tree.person(1, true, "Great-great", 1790, 0)
        .person(2, true, "Great", 1820, 0)
        .person(3, true, "Grand", 1850, 0)
        .person(4, true, "Parent", 1950, 0)
        .person(5, true, "Child", 1980, 0)
        .person(6, true, "Widow", 0, 1990)
        .person(7, false, "Cousin", 1985, 0)
        .family(10, 1, 0, &[2])
        .family(20, 2, 0, &[3])
        .family(30, 3, 6, &[4])
        .family(40, 4, 0, &[5]);
    tree
}

/// Run the elders binary with `args`.
pub fn run_elders(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_elders"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run elders")
}

/// Path as a `&str` for command arguments.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}
