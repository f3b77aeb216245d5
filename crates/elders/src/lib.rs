//! # Elders: mark long-dead ancestors as not living
//!
//! Genealogy programs hide living people when sharing a tree. Imported data
//! often leaves the "living" flag set on people who died centuries ago. Elders
//! finds them by two signals:
//!
//! - **Lineage depth**: anyone with more generations of descendants than a
//!   configured limit cannot plausibly be alive.
//! - **Vital years**: anyone with a recorded death, or born more than a
//!   configured number of years ago.
//!
//! ## Quick Start
//!
//! ```no_run
//! use elders::{Config, GenealogyStore, RootsMagicStore, classify};
//! use std::path::Path;
//!
//! let mut store = RootsMagicStore::open(Path::new("family.rmtree"))?;
//! let config = Config::load(None)?;
//!
//! let rows = store.read_all()?;
//! let result = classify(&rows, &config.thresholds(), config.unknown_members)?;
//! println!("{} people to change", result.change_set.len());
//!
//! store.apply_not_living(result.change_set.ids())?;
//! # Ok::<(), elders::Error>(())
//! ```
//!
//! ## Pipeline
//!
//! Store rows → [`FamilyGraph::from_rows`] → [`FamilyGraph::resolve_links`] →
//! [`FamilyGraph::generation_count`] → [`liveness`] rule → [`ChangeSet`].

pub mod change_set;
pub mod config;
pub mod error;
pub mod graph;
pub mod liveness;
pub mod report;
pub mod store;
pub mod sweep;
pub mod types;

pub use change_set::ChangeSet;
pub use config::{Config, Overrides};
pub use error::{Error, MemberRole, Result};
pub use graph::{Cycle, FamilyGraph, UnknownMemberPolicy, find_cycles};
pub use liveness::{Reason, Thresholds, is_too_old};
pub use report::{ReportFormat, ReportOptions, render};
pub use store::{GenealogyStore, RootsMagicStore};
pub use sweep::{Classification, PersonSummary, classify, classify_graph};
pub use types::{
    ChildRow, Family, FamilyId, FamilyRow, NameInfo, NameRow, Person, PersonId, PersonRow,
    SourceRows,
};
