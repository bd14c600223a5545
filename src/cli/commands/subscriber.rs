//! Subscriber management commands.

use anyhow::anyhow;
use chrono::Utc;
use console::style;

use farewatch::config::Settings;
use farewatch::dictionary::EntityDictionary;
use farewatch::models::{NotificationMode, Subscriber, SubscriberFilter};

use crate::cli::helpers::{open_store, resolve_selection};

/// Add a subscriber, or replace the selections of an existing one.
pub async fn cmd_subscriber_add(
    settings: &Settings,
    email: &str,
    destinations: &[String],
    airlines: &[String],
    chat_id: Option<String>,
    mode: &str,
) -> anyhow::Result<()> {
    let dictionary = EntityDictionary::builtin()?;
    let notification = NotificationMode::from_str(mode)
        .ok_or_else(|| anyhow!("Unknown notification mode '{mode}', expected daily or off"))?;

    let store = open_store(settings).await?;
    let existing = store.subscribers.get_by_email(email).await?;
    let is_new = existing.is_none();

    let mut subscriber = existing.unwrap_or_else(|| Subscriber::new(email.to_string()));
    subscriber.notification = notification;
    subscriber.destinations =
        resolve_selection(&dictionary.destinations(), destinations, "destination")?;
    subscriber.airlines = resolve_selection(&dictionary.airlines(), airlines, "airline")?;
    if chat_id.is_some() {
        subscriber.chat_id = chat_id;
    }
    subscriber.updated_at = Utc::now();

    store.subscribers.save(&subscriber).await?;

    println!(
        "{} {} subscriber {}",
        style("✓").green(),
        if is_new { "Added" } else { "Updated" },
        subscriber.email
    );
    if subscriber.chat_id.is_none() && subscriber.wants_alerts() {
        println!(
            "  {} No chat id set, Telegram alerts will fail until one is added",
            style("!").yellow()
        );
    }

    Ok(())
}

/// List subscribers.
pub async fn cmd_subscriber_list(settings: &Settings, daily_only: bool) -> anyhow::Result<()> {
    let dictionary = EntityDictionary::builtin()?;
    let store = open_store(settings).await?;
    let filter = if daily_only {
        SubscriberFilter::daily()
    } else {
        SubscriberFilter::all()
    };
    let subscribers = store.subscribers.find(filter).await?;

    if subscribers.is_empty() {
        println!("{} No subscribers", style("!").yellow());
        return Ok(());
    }

    println!("\n{}", style("Subscribers").bold());
    println!("{}", "-".repeat(60));
    for sub in &subscribers {
        println!(
            "{} [{}] chat: {}",
            style(&sub.email).bold(),
            sub.notification.as_str(),
            sub.chat_id.as_deref().unwrap_or("-")
        );
        println!(
            "  Destinations: {}",
            describe(sub.destinations.iter().map(|v| dictionary.label_for_destination(v)))
        );
        println!(
            "  Airlines:     {}",
            describe(sub.airlines.iter().map(|v| dictionary.label_for_airline(v)))
        );
    }

    Ok(())
}

/// Remove a subscriber.
pub async fn cmd_subscriber_remove(settings: &Settings, id_or_email: &str) -> anyhow::Result<()> {
    let store = open_store(settings).await?;
    if store.subscribers.delete(id_or_email).await? {
        println!("{} Removed {}", style("✓").green(), id_or_email);
    } else {
        println!("{} No subscriber matches {}", style("!").yellow(), id_or_email);
    }
    Ok(())
}

fn describe(labels: impl Iterator<Item = String>) -> String {
    let labels: Vec<String> = labels.collect();
    if labels.is_empty() {
        "All".to_string()
    } else {
        labels.join(", ")
    }
}
