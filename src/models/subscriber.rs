//! Subscriber models.
//!
//! Subscribers are owned by the profile service; the pipeline only reads them.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How often a subscriber wants alerts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationMode {
    #[default]
    Off,
    /// One alert per scrape run (runs are daily).
    Daily,
}

impl NotificationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Daily => "daily",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "off" => Some(Self::Off),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

/// Someone who wants to hear about matching deals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub notification: NotificationMode,
    /// Selected canonical destinations. Empty means any destination.
    pub destinations: BTreeSet<String>,
    /// Selected canonical airlines. Empty means any airline.
    pub airlines: BTreeSet<String>,
    /// Telegram chat the alerts go to, once the subscriber linked the bot.
    pub chat_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscriber {
    /// Create a subscriber with a fresh id and no selections.
    pub fn new(email: String) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            notification: NotificationMode::Off,
            destinations: BTreeSet::new(),
            airlines: BTreeSet::new(),
            chat_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn wants_alerts(&self) -> bool {
        self.notification != NotificationMode::Off
    }
}

/// Filter for subscriber lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscriberFilter {
    pub notification: Option<NotificationMode>,
}

impl SubscriberFilter {
    /// Subscribers who should receive the daily alert.
    pub fn daily() -> Self {
        Self {
            notification: Some(NotificationMode::Daily),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn accepts(&self, subscriber: &Subscriber) -> bool {
        self.notification
            .map_or(true, |mode| subscriber.notification == mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_subscriber_is_muted() {
        let sub = Subscriber::new("someone@example.com".to_string());
        assert!(!sub.wants_alerts());
        assert!(sub.destinations.is_empty());
        assert!(sub.airlines.is_empty());
        assert!(sub.chat_id.is_none());
    }

    #[test]
    fn test_filter_accepts() {
        let mut sub = Subscriber::new("someone@example.com".to_string());
        assert!(SubscriberFilter::all().accepts(&sub));
        assert!(!SubscriberFilter::daily().accepts(&sub));

        sub.notification = NotificationMode::Daily;
        assert!(SubscriberFilter::daily().accepts(&sub));
    }

    #[test]
    fn test_notification_mode_strings() {
        assert_eq!(NotificationMode::from_str("daily"), Some(NotificationMode::Daily));
        assert_eq!(NotificationMode::from_str("instant"), None);
        assert_eq!(NotificationMode::Off.as_str(), "off");
    }
}
