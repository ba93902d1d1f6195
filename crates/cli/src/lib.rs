//! # Meridian CLI
//!
//! Command-line interface for Meridian Studio.
//!
//! ## Commands
//!
//! - `test` - Run declarative test scripts against sample documents
//! - `panels` - List the canonical detail panels and their field sets
//!

pub mod commands;
pub mod harness;
pub mod script;

pub use harness::{EPSILON, ScriptReport, StepReport, TestRunner};
pub use script::{FieldCheck, SampleDocument, TestScript, TestStep};

// Re-export internal crates for use in main.rs
pub use meridian_core;
pub use meridian_panel;
pub use meridian_style;

use clap::{Parser, Subcommand};

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Meridian Studio - Interactive Symbology Editor
#[derive(Parser, Debug)]
#[command(name = "meridian")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run declarative test scripts
    Test(commands::TestArgs),

    /// List the canonical detail panels and their fields
    Panels,
}

/// Parse arguments and run the selected command
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Test(args) => commands::test(args),
        Command::Panels => commands::panels(),
    }
}

// ============================================================================
// Tests
// ============================================================================
