//! Library side of the `pwv` command-line tool.

pub mod logging;
pub mod types;
pub mod workflow;
