//! CLI subcommands.

pub mod list;
