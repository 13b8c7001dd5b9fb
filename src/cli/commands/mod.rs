//! Subcommands of the `menace` binary

pub mod evaluate;
pub mod play;
pub mod train;
