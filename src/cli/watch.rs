//! Watch command implementation

use crate::config::Config;
use crate::service::{PricePoller, PriceService};
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Poll interval in seconds (overrides config)
    #[arg(short, long)]
    pub interval: Option<u64>,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let interval = self
            .interval
            .map(Duration::from_secs)
            .unwrap_or_else(|| config.feed.poll_interval());
        let service = Arc::new(PriceService::from_config(&config.feed)?);
        let mut updates = PricePoller::new(service, interval)?.subscribe();

        loop {
            tokio::select! {
                update = updates.recv() => match update {
                    Some(display) => println!("{display}"),
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupted, stopping watch");
                    break;
                }
            }
        }

        Ok(())
    }
}
