//! Price command implementation

use crate::config::Config;
use crate::service::{LivePrice, PriceService};
use clap::Args;

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Ignore any cached quote and query the sources
    #[arg(long)]
    pub bypass_cache: bool,
}

impl PriceArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = PriceService::from_config(&config.feed)?;

        match service.get_live_price(self.bypass_cache).await {
            LivePrice::Unavailable => {
                println!("XAU/USD unavailable: no source returned a plausible price");
            }
            result => {
                if let Some(q) = result.quote() {
                    println!(
                        "XAU/USD {:.2} {:+.2} ({:+.2}%) via {} [{}]",
                        q.price,
                        q.change,
                        q.change_percent,
                        q.source,
                        result.kind()
                    );
                }
            }
        }

        Ok(())
    }
}
