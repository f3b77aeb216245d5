//! CLI value enums and their conversions to library types.

use clap::ValueEnum;

use elders::{ReportFormat, UnknownMemberPolicy};

/// Report format for CLI arguments
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatArg {
    /// Human-readable listing
    #[default]
    Text,
    /// UPDATE statements (implies --dry-run)
    Sql,
    /// Full classification as JSON
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Sql => Self::Sql,
            FormatArg::Json => Self::Json,
        }
    }
}

/// Handling of family members whose ids are not in `PersonTable`
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnknownMembersArg {
    /// Ignore them
    Skip,
    /// Stop with an error
    Error,
}

impl From<UnknownMembersArg> for UnknownMemberPolicy {
    fn from(arg: UnknownMembersArg) -> Self {
        match arg {
            UnknownMembersArg::Skip => Self::Skip,
            UnknownMembersArg::Error => Self::Error,
        }
    }
}
