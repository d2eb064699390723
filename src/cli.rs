//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// fleetdash - Terminal dashboard for a fleet of monitored machines
#[derive(Parser, Debug, Default)]
#[command(name = "fleetdash")]
#[command(about = "Terminal dashboard for a fleet of monitored machines", long_about = None)]
pub struct Args {
    /// Location to start from: an absolute URL, or a bare query such as
    /// `?c=miners&m=rig-01&mt=xmrig` applied to the configured location
    #[arg(long, value_name = "URL")]
    pub location: Option<String>,

    /// Root of the monitoring API
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Seconds between roster refreshes
    #[arg(long, value_name = "SECS")]
    pub refresh_secs: Option<u64>,

    /// Settings file to use instead of the default one
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Hide the live location row
    #[arg(long)]
    pub hide_url: bool,
}
