//! Stored listings command.

use anyhow::anyhow;
use console::style;

use farewatch::config::Settings;
use farewatch::dictionary::EntityDictionary;
use farewatch::models::SourceId;
use farewatch::repository::ListingQuery;

use crate::cli::helpers::{open_store, resolve_selection, truncate};

/// Show recent listings matching the given filters.
pub async fn cmd_listings(
    settings: &Settings,
    destinations: &[String],
    airlines: &[String],
    source: Option<&str>,
    limit: usize,
) -> anyhow::Result<()> {
    let dictionary = EntityDictionary::builtin()?;
    let source = source
        .map(|s| SourceId::from_str(s).ok_or_else(|| anyhow!("Unknown source '{s}'")))
        .transpose()?;

    let query = ListingQuery {
        destinations: resolve_selection(&dictionary.destinations(), destinations, "destination")?,
        airlines: resolve_selection(&dictionary.airlines(), airlines, "airline")?,
        source,
        limit: Some(limit),
    };

    let store = open_store(settings).await?;
    let records = store.listings.recent(&query).await?;

    if records.is_empty() {
        println!("{} No listings found", style("!").yellow());
        return Ok(());
    }

    println!("\n{}", style("Listings").bold());
    println!("{}", "-".repeat(80));
    for record in &records {
        println!(
            "{} {:<9} {}",
            style(record.published_at.format("%Y-%m-%d")).dim(),
            record.source.as_str(),
            truncate(&record.title, 60)
        );
        let tags: Vec<&str> = record
            .destinations
            .iter()
            .chain(record.airlines.iter())
            .map(String::as_str)
            .collect();
        if !tags.is_empty() {
            println!("           {}", style(tags.join(", ")).cyan());
        }
        println!("           {}", style(&record.url).dim());
    }
    println!("\n{} {} listing(s)", style("→").dim(), records.len());

    Ok(())
}
