//! Dictionary listing command.

use console::style;
use serde::Serialize;

use farewatch::dictionary::EntityDictionary;

use crate::cli::TagKind;

#[derive(Serialize)]
struct TagOutput {
    value: String,
    label: String,
}

/// Print the known destinations or airlines.
pub fn cmd_tags(kind: TagKind, json: bool) -> anyhow::Result<()> {
    let dictionary = EntityDictionary::builtin()?;
    let labels = match kind {
        TagKind::Destinations => dictionary.destination_labels(),
        TagKind::Airlines => dictionary.airline_labels(),
    };

    if json {
        let out: Vec<TagOutput> = labels
            .into_iter()
            .map(|(value, label)| TagOutput { value, label })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    let title = match kind {
        TagKind::Destinations => "Destinations",
        TagKind::Airlines => "Airlines",
    };
    println!("\n{}", style(title).bold());
    println!("{}", "-".repeat(40));
    for (_, label) in &labels {
        println!("  {label}");
    }
    println!("\n{} {} entries", style("→").dim(), labels.len());

    Ok(())
}
