//! Status command.

use console::style;

use farewatch::config::Settings;
use farewatch::models::{SubscriberFilter, WATERMARK_KEY};

use crate::cli::helpers::open_store;

/// Show the scraper watermark and database counts.
pub async fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    if !settings.database_exists() {
        println!(
            "{} No database found. Run 'farewatch init' first.",
            style("!").yellow()
        );
        return Ok(());
    }

    let store = open_store(settings).await?;
    let watermark = store.checkpoints.get(WATERMARK_KEY).await?;
    let listings = store.listings.count().await?;
    let subscribers = store.subscribers.find(SubscriberFilter::all()).await?;
    let daily = subscribers
        .iter()
        .filter(|s| SubscriberFilter::daily().accepts(s))
        .count();

    println!("\n{}", style("farewatch status").bold());
    println!("{}", "-".repeat(40));
    println!("Database:     {}", settings.database_url());
    println!(
        "Last run:     {}",
        watermark
            .map(|w| w.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "Never".to_string())
    );
    println!("Listings:     {}", listings);
    println!("Subscribers:  {} ({} daily)", subscribers.len(), daily);
    println!(
        "Sources:      {}",
        settings
            .sources
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Schedule:     daily at {} UTC", settings.run_at);

    Ok(())
}
