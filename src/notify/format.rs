//! Plain-text alert bodies.

use std::collections::BTreeSet;

use crate::dictionary::EntityDictionary;
use crate::models::{ListingRecord, Subscriber};

/// Render the alert for one subscriber.
///
/// The body lists the subscriber's criteria (display labels, or `All` for an
/// empty selection) followed by each matched listing's title and link.
pub fn format_alert(
    dictionary: &EntityDictionary,
    subscriber: &Subscriber,
    records: &[&ListingRecord],
) -> String {
    let destinations = criteria(&subscriber.destinations, |v| {
        dictionary.label_for_destination(v)
    });
    let airlines = criteria(&subscriber.airlines, |v| dictionary.label_for_airline(v));

    let posts = records
        .iter()
        .map(|r| format!("{}\n{}", r.title, r.url))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "\nNew posts based on your search criteria:\nDestinations: {destinations}\nAirlines: {airlines}\n\nPosts:\n\n{posts}\n"
    )
}

fn criteria(selected: &BTreeSet<String>, label: impl Fn(&str) -> String) -> String {
    if selected.is_empty() {
        return "All".to_string();
    }
    selected
        .iter()
        .map(|v| label(v))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceId;
    use chrono::Utc;

    fn dictionary() -> EntityDictionary {
        EntityDictionary::builder()
            .destination("Japan", "日本")
            .destination("Korea", "韓國")
            .airline("Cathay Pacific", "國泰航空")
            .build()
            .unwrap()
    }

    fn record(title: &str, url: &str) -> ListingRecord {
        let now = Utc::now();
        ListingRecord {
            title: title.to_string(),
            summary: String::new(),
            destinations: BTreeSet::new(),
            airlines: BTreeSet::new(),
            url: url.to_string(),
            published_at: now,
            source: SourceId::FlyAgain,
            ingested_at: now,
        }
    }

    #[test]
    fn test_format_with_selections() {
        let mut sub = Subscriber::new("a@example.com".to_string());
        sub.destinations = ["韓國", "日本"].iter().map(|s| s.to_string()).collect();
        sub.airlines = ["國泰航空".to_string()].into_iter().collect();

        let a = record("東京 $1800", "https://flyday.hk/a");
        let b = record("首爾 $1200", "https://flyday.hk/b");
        let body = format_alert(&dictionary(), &sub, &[&a, &b]);

        assert_eq!(
            body,
            "\nNew posts based on your search criteria:\n\
             Destinations: 日本 Japan, 韓國 Korea\n\
             Airlines: 國泰航空 Cathay Pacific\n\n\
             Posts:\n\n\
             東京 $1800\nhttps://flyday.hk/a\n\n\
             首爾 $1200\nhttps://flyday.hk/b\n"
        );
    }

    #[test]
    fn test_empty_selection_prints_all() {
        let sub = Subscriber::new("a@example.com".to_string());
        let a = record("曼谷", "https://flyagain.la/a");
        let body = format_alert(&dictionary(), &sub, &[&a]);
        assert!(body.contains("Destinations: All\n"));
        assert!(body.contains("Airlines: All\n"));
    }

    #[test]
    fn test_unknown_value_falls_back_to_raw() {
        let mut sub = Subscriber::new("a@example.com".to_string());
        sub.destinations.insert("火星".to_string());
        let body = format_alert(&dictionary(), &sub, &[]);
        assert!(body.contains("Destinations: 火星\n"));
    }

    #[test]
    fn test_formatting_is_deterministic() {
        let mut sub = Subscriber::new("a@example.com".to_string());
        sub.destinations = ["韓國", "日本"].iter().map(|s| s.to_string()).collect();
        let a = record("東京", "https://flyday.hk/a");
        let dict = dictionary();
        assert_eq!(
            format_alert(&dict, &sub, &[&a]),
            format_alert(&dict, &sub, &[&a])
        );
    }
}
