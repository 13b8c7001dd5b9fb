//! CLI infrastructure for the `menace` binary
//!
//! Commands for training learners, evaluating saved matchbox agents, and
//! playing against them from a terminal.

pub mod commands;
pub mod config;
pub mod output;
