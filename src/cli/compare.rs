//! Compare command implementation

use crate::config::Config;
use crate::feed::PriceQuote;
use crate::service::PriceService;
use clap::Args;

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Print quotes as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl CompareArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let service = PriceService::from_config(&config.feed)?;
        let configured = service.source_names().len();
        let quotes = service.get_all_prices().await;

        tracing::info!(
            responded = quotes.len(),
            configured,
            "Cross-source comparison complete"
        );

        if self.json {
            println!("{}", serde_json::to_string_pretty(&quotes)?);
            return Ok(());
        }

        if quotes.is_empty() {
            println!("No source returned a plausible price");
            return Ok(());
        }

        print!("{}", render_table(&quotes));
        Ok(())
    }
}

/// Table of quotes, each re-based against the first (highest priority) one
fn render_table(quotes: &[PriceQuote]) -> String {
    let mut out = format!(
        "{:<28} {:>10} {:>9} {:>8} {:>10}\n",
        "SOURCE", "PRICE", "CHANGE", "CHG%", "VS FIRST"
    );

    let reference = quotes[0].price;
    for q in quotes {
        let diff = q.versus(reference);
        out.push_str(&format!(
            "{:<28} {:>10.2} {:>+9.2} {:>+7.2}% {:>+10.2}\n",
            q.source, q.price, q.change, q.change_percent, diff.change
        ));
    }

    if let Some((lo, hi)) = spread(quotes) {
        out.push_str(&format!(
            "spread {:.2} ({:.2} .. {:.2}) across {} sources\n",
            hi - lo,
            lo,
            hi,
            quotes.len()
        ));
    }

    out
}

/// Lowest and highest price among `quotes`
fn spread(quotes: &[PriceQuote]) -> Option<(f64, f64)> {
    let first = quotes.first()?.price;
    Some(quotes.iter().fold((first, first), |(lo, hi), q| {
        (lo.min(q.price), hi.max(q.price))
    }))
}
