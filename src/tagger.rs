//! Destination and airline tagging for free-form listing text.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::dictionary::EntityDictionary;

/// Canonical entities found in a set of text fragments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags {
    pub destinations: BTreeSet<String>,
    pub airlines: BTreeSet<String>,
}

/// Tags text against a shared, read-only dictionary.
#[derive(Debug, Clone)]
pub struct Tagger {
    dictionary: Arc<EntityDictionary>,
}

impl Tagger {
    pub fn new(dictionary: Arc<EntityDictionary>) -> Self {
        Self { dictionary }
    }

    /// Destinations and airlines referenced by any of the fragments.
    pub fn tag(&self, fragments: &[&str]) -> Tags {
        Tags {
            destinations: self.destinations_in(fragments),
            airlines: self.airlines_in(fragments),
        }
    }

    pub fn destinations_in(&self, fragments: &[&str]) -> BTreeSet<String> {
        fragments
            .iter()
            .flat_map(|text| self.dictionary.resolve_destinations(text))
            .collect()
    }

    pub fn airlines_in(&self, fragments: &[&str]) -> BTreeSet<String> {
        fragments
            .iter()
            .flat_map(|text| self.dictionary.resolve_airlines(text))
            .collect()
    }
}
