//! The `billswift` command line: configuration, logging setup, subcommand
//! bodies and the plain-text invoice layout.

pub mod commands;
pub mod config;
pub mod logging;
pub mod preview;
