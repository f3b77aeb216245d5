//! `elders sweep` command implementation.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use clap::Args;
use colored::Colorize;
use elders::{
    Config, GenealogyStore, Overrides, ReportFormat, ReportOptions, RootsMagicStore, classify,
    render,
};

use super::types::{FormatArg, UnknownMembersArg};

/// Arguments for the `sweep` command
#[derive(Args, Debug, Clone)]
pub struct SweepArgs {
    /// RootsMagic database file (.rmtree or .rmgc)
    pub database: PathBuf,

    /// Mark anyone with more generations of descendants than this
    #[arg(short = 'g', long)]
    pub max_generations: Option<u32>,

    /// Mark anyone born more than this many years ago
    #[arg(short = 'a', long, value_parser = clap::value_parser!(i32).range(0..))]
    pub max_age: Option<i32>,

    /// Year to measure ages against (defaults to the current year)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Report changes without writing them
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// List every person with their generation count
    #[arg(long)]
    pub all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: FormatArg,

    /// What to do with family members missing from PersonTable
    #[arg(long, value_enum)]
    pub unknown_members: Option<UnknownMembersArg>,
}

impl SweepArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            max_generations: self.max_generations,
            max_age: self.max_age,
            current_year: self.year,
            unknown_members: self.unknown_members.map(Into::into),
        }
    }
}

/// Run the sweep command.
pub fn run(args: &SweepArgs, config_path: Option<&Path>) -> Result<(), elders::Error> {
    let config = Config::load(config_path)?.with_overrides(args.overrides());
    config.validate()?;
    let thresholds = config.thresholds();

    let mut store = RootsMagicStore::open(&args.database)?;
    let rows = store.read_all()?;
    let classification = classify(&rows, &thresholds, config.unknown_members)?;

    let format = ReportFormat::from(args.format);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let options = ReportOptions {
        format,
        all: args.all,
        color: format == ReportFormat::Text && out.is_terminal(),
    };
    render(&classification, &options, &mut out)?;

    // SQL output is for applying by hand, so it never writes.
    if args.dry_run || format == ReportFormat::Sql {
        tracing::info!("Dry run, database not modified");
        return Ok(());
    }

    if classification.change_set.is_empty() {
        tracing::debug!("Nothing to change");
        return Ok(());
    }

    let changed = store.apply_not_living(classification.change_set.ids())?;

    if format == ReportFormat::Text {
        writeln!(
            out,
            "{} {} in {}",
            "Updated".green().bold(),
            changed,
            store.path().display()
        )?;
    }

    Ok(())
}
