//! CLI command implementations.

mod types;

pub mod cycles;
pub mod sweep;
