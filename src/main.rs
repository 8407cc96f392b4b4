use std::path::PathBuf;

use chrono::Utc;
use clap::Parser;
use serde_json::json;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_scout::recommend::{HeuristicScorer, ScoringStrategy};
use market_scout::{analyze, Aggregator, Config};

/// Search marketplaces for comparable listings and analyze their prices.
#[derive(Parser)]
#[command(name = "market-scout", version)]
struct Cli {
    /// Search keywords, e.g. "Nike Tech Fleece"
    query: String,

    /// Also derive a suggested price from the results
    #[arg(long)]
    estimate: bool,

    /// Write the full JSON report to this path
    #[arg(long)]
    out: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market_scout=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    info!("Searching marketplaces for \"{}\"", cli.query);
    let aggregator = Aggregator::new(&config)?;
    let results = aggregator.search(&cli.query).await;

    for (platform, listings) in &results {
        println!("{platform}: {} listings", listings.len());
        for listing in listings {
            println!("  ${} - {}", listing.price, listing.title);
            println!("    {}", listing.listing_url);
        }
    }

    let snapshot = analyze(&results);
    match &snapshot {
        Some(snapshot) => {
            let summary = &snapshot.summary;
            println!();
            println!(
                "{} priced listings | mean ${:.2} | median ${:.2} | range ${:.2}-${:.2}",
                summary.count, summary.mean, summary.median, summary.min, summary.max
            );
            for stats in &snapshot.platform_stats {
                println!(
                    "  {}: avg ${:.2} over {} listings",
                    stats.platform, stats.average, stats.count
                );
            }
            if !snapshot.potential_deals.is_empty() {
                println!("Potential deals:");
                for deal in &snapshot.potential_deals {
                    println!("  ${:.2} - {}", deal.numeric_price, deal.listing.title);
                }
            }
        }
        None => println!("No priced listings found for \"{}\"", cli.query),
    }

    let recommendation = if cli.estimate {
        let rec = HeuristicScorer.score(snapshot.as_ref());
        match rec.suggested_price {
            Some(price) => println!(
                "Suggested price: ${price:.2} (confidence {:.0}%)\n  {}",
                rec.confidence * 100.0,
                rec.reasoning
            ),
            None => println!("No price suggestion: {}", rec.reasoning),
        }
        Some(rec)
    } else {
        None
    };

    if let Some(path) = cli.out {
        let report = json!({
            "query": cli.query,
            "fetchedAt": Utc::now(),
            "results": results,
            "analytics": snapshot,
            "recommendation": recommendation,
        });
        tokio::fs::write(&path, serde_json::to_string_pretty(&report)?).await?;
        info!("Saved report to {}", path.display());
    }

    Ok(())
}
