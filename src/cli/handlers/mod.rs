//! Subcommand handlers.

pub mod remind;
pub mod serve;
