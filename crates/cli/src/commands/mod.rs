//! CLI subcommands

pub mod panels;
pub mod test;

pub use panels::panels;
pub use test::{TestArgs, test};
