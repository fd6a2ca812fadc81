//! CLI module for suitewait - command-line interface.
//!
//! Every invocation performs one wait; there are no subcommands.

pub mod commands;

pub use commands::Cli;
