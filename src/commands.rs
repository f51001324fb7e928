//! Command implementations invoked by the CLI.

pub mod run;
