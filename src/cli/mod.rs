//! CLI interface for goldfeed
//!
//! Provides subcommands for:
//! - `price`: Fetch the live price once
//! - `compare`: Query every source and compare their quotes
//! - `watch`: Poll the live price continuously
//! - `config`: Show the effective configuration

mod compare;
mod price;
mod watch;

pub use compare::CompareArgs;
pub use price::PriceArgs;
pub use watch::WatchArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "goldfeed")]
#[command(about = "Live gold price from multiple public quote providers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the live price once
    Price(PriceArgs),
    /// Query every source and compare their quotes
    Compare(CompareArgs),
    /// Poll the live price continuously
    Watch(WatchArgs),
    /// Show the effective configuration
    Config,
}
