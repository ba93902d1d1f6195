//! Meridian Studio
//!
//! Interactive Symbology Editor for Geospatial Styling
//!
//! This is the main entry point for the command-line tooling: the
//! declarative test runner and the panel inspector.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() -> anyhow::Result<()> {
    // Initialize logging; RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    meridian_cli::run()
}
