//! fleetdash - Terminal dashboard for a fleet of monitored machines
//!
//! This is the binary entry point. All logic lives in the library.

use clap::Parser;
use fleetdash::Args;
use fleetdash_core::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    fleetdash::run(args).await
}
