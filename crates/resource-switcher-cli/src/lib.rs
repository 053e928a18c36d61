//! Resource switcher CLI library.
//!
//! Input file discovery and output formatting shared by the
//! `resource-switcher` binary's subcommands.

pub mod output;
pub mod paths;
