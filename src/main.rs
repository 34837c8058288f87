use clap::Parser;
use goldfeed::cli::{Cli, Commands};
use goldfeed::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).unwrap_or_default()
    });

    // Initialize telemetry
    goldfeed::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Price(args) => {
            args.execute(&config).await?;
        }
        Commands::Compare(args) => {
            args.execute(&config).await?;
        }
        Commands::Watch(args) => {
            tracing::info!("Starting live price watch");
            args.execute(&config).await?;
        }
        Commands::Config => {
            let feed = &config.feed;
            println!("Current configuration:");
            println!("  Sources: {:?}", feed.sources);
            println!("  Timeout: {} ms", feed.timeout_ms);
            println!("  Cache TTL: {} s", feed.cache_ttl_secs);
            println!("  Min plausible price: ${:.2}", feed.min_plausible_price);
            println!("  Serve stale on outage: {}", feed.serve_stale_on_outage);
            println!("  Poll interval: {} s", feed.poll_interval_secs);
            println!("  CORS proxy: {:?}", feed.cors_proxy);
            println!(
                "  Logging: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            );
        }
    }

    Ok(())
}
