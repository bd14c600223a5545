//! Matching new listings against subscriber interests.

use std::collections::BTreeSet;

use crate::models::{ListingRecord, Subscriber};

/// Whether `record` is relevant to `subscriber`.
///
/// An empty selection means "any". Otherwise the record must share at least
/// one destination and at least one airline with the selections.
pub fn matches(subscriber: &Subscriber, record: &ListingRecord) -> bool {
    overlaps(&subscriber.destinations, &record.destinations)
        && overlaps(&subscriber.airlines, &record.airlines)
}

fn overlaps(selected: &BTreeSet<String>, found: &BTreeSet<String>) -> bool {
    selected.is_empty() || !selected.is_disjoint(found)
}

/// One subscriber and the records that matched them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert<'a> {
    pub subscriber: &'a Subscriber,
    pub records: Vec<&'a ListingRecord>,
}

/// Alerts for one run. Subscribers without any match are left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertBatch<'a> {
    pub alerts: Vec<Alert<'a>>,
}

impl<'a> AlertBatch<'a> {
    /// Pair each subscriber with the records that match them, keeping the
    /// input order of both.
    pub fn build(subscribers: &'a [Subscriber], records: &'a [ListingRecord]) -> Self {
        let alerts = subscribers
            .iter()
            .filter_map(|subscriber| {
                let matched: Vec<&ListingRecord> =
                    records.iter().filter(|r| matches(subscriber, r)).collect();
                (!matched.is_empty()).then_some(Alert {
                    subscriber,
                    records: matched,
                })
            })
            .collect();

        Self { alerts }
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }
}
