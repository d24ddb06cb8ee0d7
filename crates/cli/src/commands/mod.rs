//! CLI subcommand implementations.

pub mod optimize;
