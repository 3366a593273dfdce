pub mod args;
pub mod commands;

pub use args::{Cli, Commands, GridArgs, InputArgs};
pub use commands::run;
