//! Rendering a classification for the operator.

use std::io::Write;

use colored::Colorize;

use crate::error::Result;
use crate::sweep::{Classification, PersonSummary};

/// Output format for a sweep report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Human-readable listing
    #[default]
    Text,
    /// `UPDATE` statements that perform the change by hand
    Sql,
    /// The full classification as JSON
    Json,
}

/// Options for [`render`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Output format
    pub format: ReportFormat,
    /// List every person, not only those being changed (text only)
    pub all: bool,
    /// Use ANSI colors (text only)
    pub color: bool,
}

/// Write `classification` to `out` in the requested format.
///
/// # Errors
///
/// I/O errors from `out`, or JSON serialization errors.
pub fn render(
    classification: &Classification,
    options: &ReportOptions,
    out: &mut impl Write,
) -> Result<()> {
    match options.format {
        ReportFormat::Text => render_text(classification, options, out),
        ReportFormat::Sql => render_sql(classification, out),
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, classification)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn render_text(
    classification: &Classification,
    options: &ReportOptions,
    out: &mut impl Write,
) -> Result<()> {
    writeln!(out, "people count {}", classification.people.len())?;

    for person in &classification.people {
        let selected = person.reason.is_some();
        if !selected && !options.all {
            continue;
        }
        writeln!(out, "{}", person_line(person, options.color))?;
        if let Some(reason) = person.reason {
            let marker = format!("   to be changed ({})", reason.as_str());
            if options.color {
                writeln!(out, "{}", marker.yellow())?;
            } else {
                writeln!(out, "{marker}")?;
            }
        }
    }

    if classification.skipped_members > 0 {
        writeln!(
            out,
            "skipped {} unknown family members",
            classification.skipped_members
        )?;
    }

    let changes = classification.change_set.len();
    if options.color {
        writeln!(out, "changes {}", changes.to_string().bold())?;
    } else {
        writeln!(out, "changes {changes}")?;
    }
    Ok(())
}

fn person_line(person: &PersonSummary, color: bool) -> String {
    if color {
        format!(
            "id {} {} = {}",
            person.id.to_string().dimmed(),
            person.name.white().bold(),
            person.generation_count.to_string().cyan()
        )
    } else {
        format!("id {} {} = {}", person.id, person.name, person.generation_count)
    }
}

fn render_sql(classification: &Classification, out: &mut impl Write) -> Result<()> {
    writeln!(out, "BEGIN TRANSACTION;")?;
    for id in &classification.change_set {
        writeln!(out, "UPDATE PersonTable SET Living = 0 WHERE PersonID = {id};")?;
    }
    writeln!(out, "COMMIT;")?;
    Ok(())
}
