//! Entity dictionary for destinations and airlines.
//!
//! Each entity has a canonical value (the Traditional Chinese name used on
//! the deal sites) and an English label. Aliases map extra terms, such as
//! city names or short forms, onto one or more canonical values.
//!
//! The dictionary is immutable after construction and is handed to the
//! tagger and the alert formatter explicitly.

mod tables;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::{Arc, LazyLock};

use serde::Serialize;
use thiserror::Error;

/// Which table an entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Destination,
    Airline,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Destination => "destination",
            Self::Airline => "airline",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DictionaryError {
    #[error("{kind} alias {alias:?} points at unknown canonical value {target:?}")]
    UnknownAliasTarget {
        kind: EntityKind,
        alias: String,
        target: String,
    },

    #[error("{kind} canonical value {value:?} is defined twice")]
    DuplicateCanonical { kind: EntityKind, value: String },

    #[error("{kind} dictionary contains an empty term")]
    EmptyTerm { kind: EntityKind },
}

/// A canonical entity with its display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Canonical value stored on listings and subscriber selections.
    pub value: String,
    pub english: String,
}

impl Entity {
    /// Bilingual label, e.g. `日本 Japan`.
    pub fn label(&self) -> String {
        if self.value == self.english {
            self.value.clone()
        } else {
            format!("{} {}", self.value, self.english)
        }
    }
}

/// One side of the dictionary: canonical entries plus their aliases.
#[derive(Debug, Clone, Default)]
struct EntityTable {
    entries: Vec<Entity>,
    aliases: BTreeMap<String, BTreeSet<String>>,
}

impl EntityTable {
    fn validate(&self, kind: EntityKind) -> Result<(), DictionaryError> {
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if entry.value.trim().is_empty() {
                return Err(DictionaryError::EmptyTerm { kind });
            }
            if !seen.insert(entry.value.as_str()) {
                return Err(DictionaryError::DuplicateCanonical {
                    kind,
                    value: entry.value.clone(),
                });
            }
        }

        for (alias, targets) in &self.aliases {
            if alias.trim().is_empty() {
                return Err(DictionaryError::EmptyTerm { kind });
            }
            if let Some(missing) = targets.iter().find(|t| !seen.contains(t.as_str())) {
                return Err(DictionaryError::UnknownAliasTarget {
                    kind,
                    alias: alias.clone(),
                    target: missing.clone(),
                });
            }
        }

        Ok(())
    }

    /// Canonical values whose name, or one of whose aliases, occurs in `text`.
    ///
    /// Longer terms win: a term that only occurs inside a longer matched term
    /// (泰航 inside 國泰航空, 柏林 inside 都柏林) is ignored. Ties go to the
    /// leftmost occurrence.
    fn resolve(&self, text: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        if text.is_empty() {
            return found;
        }

        let terms = self
            .entries
            .iter()
            .map(|e| e.value.as_str())
            .chain(self.aliases.keys().map(String::as_str));

        let mut hits: Vec<(usize, usize, &str)> = Vec::new();
        for term in terms {
            for (start, _) in text.match_indices(term) {
                hits.push((start, start + term.len(), term));
            }
        }
        hits.sort_by(|a, b| (b.1 - b.0).cmp(&(a.1 - a.0)).then(a.0.cmp(&b.0)));

        let mut claimed: Vec<(usize, usize)> = Vec::new();
        for (start, end, term) in hits {
            if claimed.iter().any(|&(s, e)| start < e && s < end) {
                continue;
            }
            claimed.push((start, end));

            if self.entries.iter().any(|e| e.value == term) {
                found.insert(term.to_string());
            }
            if let Some(targets) = self.aliases.get(term) {
                found.extend(targets.iter().cloned());
            }
        }

        found
    }

    fn get(&self, value: &str) -> Option<&Entity> {
        self.entries.iter().find(|e| e.value == value)
    }

    fn sorted(&self) -> Vec<&Entity> {
        let mut entries: Vec<&Entity> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.english.cmp(&b.english));
        entries
    }
}

/// Destination and airline tables used for tagging and labelling.
#[derive(Debug, Clone)]
pub struct EntityDictionary {
    destinations: EntityTable,
    airlines: EntityTable,
}

static BUILTIN: LazyLock<Result<Arc<EntityDictionary>, DictionaryError>> = LazyLock::new(|| {
    let mut builder = DictionaryBuilder::new();
    for (english, value) in tables::DESTINATIONS {
        builder = builder.destination(*english, *value);
    }
    for (alias, targets) in tables::DESTINATION_ALIASES {
        builder = builder.destination_alias(*alias, targets.iter().copied());
    }
    for (english, value) in tables::AIRLINES {
        builder = builder.airline(*english, *value);
    }
    for (alias, targets) in tables::AIRLINE_ALIASES {
        builder = builder.airline_alias(*alias, targets.iter().copied());
    }
    builder.build().map(Arc::new)
});

impl EntityDictionary {
    /// The bundled dictionary, validated once per process.
    pub fn builtin() -> Result<Arc<EntityDictionary>, DictionaryError> {
        (*BUILTIN).clone()
    }

    pub fn builder() -> DictionaryBuilder {
        DictionaryBuilder::new()
    }

    /// Canonical destinations mentioned in `text`.
    pub fn resolve_destinations(&self, text: &str) -> BTreeSet<String> {
        self.destinations.resolve(text)
    }

    /// Canonical airlines mentioned in `text`.
    pub fn resolve_airlines(&self, text: &str) -> BTreeSet<String> {
        self.airlines.resolve(text)
    }

    pub fn destination(&self, value: &str) -> Option<&Entity> {
        self.destinations.get(value)
    }

    pub fn airline(&self, value: &str) -> Option<&Entity> {
        self.airlines.get(value)
    }

    /// All destinations, ordered by English name.
    pub fn destinations(&self) -> Vec<&Entity> {
        self.destinations.sorted()
    }

    /// All airlines, ordered by English name.
    pub fn airlines(&self) -> Vec<&Entity> {
        self.airlines.sorted()
    }

    /// `(value, label)` pairs for every destination, ordered by English name.
    pub fn destination_labels(&self) -> Vec<(String, String)> {
        self.destinations()
            .into_iter()
            .map(|e| (e.value.clone(), e.label()))
            .collect()
    }

    pub fn airline_labels(&self) -> Vec<(String, String)> {
        self.airlines()
            .into_iter()
            .map(|e| (e.value.clone(), e.label()))
            .collect()
    }

    /// Display label for a canonical destination, falling back to the raw value.
    pub fn label_for_destination(&self, value: &str) -> String {
        self.destination(value)
            .map(Entity::label)
            .unwrap_or_else(|| value.to_string())
    }

    /// Display label for a canonical airline, falling back to the raw value.
    pub fn label_for_airline(&self, value: &str) -> String {
        self.airline(value)
            .map(Entity::label)
            .unwrap_or_else(|| value.to_string())
    }
}

/// Builds and validates an [`EntityDictionary`].
#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    destinations: EntityTable,
    airlines: EntityTable,
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(mut self, english: impl Into<String>, value: impl Into<String>) -> Self {
        self.destinations.entries.push(Entity {
            value: value.into(),
            english: english.into(),
        });
        self
    }

    pub fn destination_alias<I, S>(mut self, alias: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.destinations
            .aliases
            .entry(alias.into())
            .or_default()
            .extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn airline(mut self, english: impl Into<String>, value: impl Into<String>) -> Self {
        self.airlines.entries.push(Entity {
            value: value.into(),
            english: english.into(),
        });
        self
    }

    pub fn airline_alias<I, S>(mut self, alias: impl Into<String>, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.airlines
            .aliases
            .entry(alias.into())
            .or_default()
            .extend(targets.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Result<EntityDictionary, DictionaryError> {
        self.destinations.validate(EntityKind::Destination)?;
        self.airlines.validate(EntityKind::Airline)?;
        Ok(EntityDictionary {
            destinations: self.destinations,
            airlines: self.airlines,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_builtin_dictionary_is_valid() {
        let dict = EntityDictionary::builtin().unwrap();
        assert!(dict.destination("日本").is_some());
        assert!(dict.airline("國泰航空").is_some());
    }

    #[test]
    fn test_city_alias_resolves_to_country() {
        let dict = EntityDictionary::builder()
            .destination("Japan", "日本")
            .destination_alias("東京", ["日本"])
            .build()
            .unwrap();

        assert_eq!(dict.resolve_destinations("東京機票優惠"), set(&["日本"]));
    }

    #[test]
    fn test_direct_and_english_matches() {
        let dict = EntityDictionary::builtin().unwrap();
        assert_eq!(dict.resolve_destinations("飛日本 $1500"), set(&["日本"]));
        // English names are display-only
        assert!(dict.resolve_destinations("Cheap flights to Japan").is_empty());
        assert!(dict.resolve_destinations("no places here").is_empty());
        assert!(dict.resolve_destinations("").is_empty());
    }

    #[test]
    fn test_region_alias_expands_to_every_target() {
        let dict = EntityDictionary::builtin().unwrap();
        let found = dict.resolve_destinations("東南亞大減價");
        for country in ["新加坡", "泰國", "越南", "汶萊"] {
            assert!(found.contains(country), "missing {country}");
        }
    }

    #[test]
    fn test_airline_short_forms() {
        let dict = EntityDictionary::builtin().unwrap();
        assert_eq!(dict.resolve_airlines("國泰大特價"), set(&["國泰航空"]));
        assert_eq!(dict.resolve_airlines("英航直飛倫敦"), set(&["英國航空"]));
        assert_eq!(dict.resolve_airlines("UO 限時優惠"), set(&["香港快運航空"]));
        assert_eq!(
            dict.resolve_airlines("馬來西亞國際航空"),
            set(&["馬來西亞航空"])
        );
    }

    #[test]
    fn test_term_inside_longer_match_is_ignored() {
        let dict = EntityDictionary::builtin().unwrap();
        assert_eq!(dict.resolve_airlines("國泰航空"), set(&["國泰航空"]));
        assert_eq!(dict.resolve_airlines("韓亞航空 首爾"), set(&["韓亞航空"]));
        assert_eq!(
            dict.resolve_airlines("國泰航空 經曼谷轉 泰航"),
            set(&["國泰航空", "泰國航空"])
        );
    }

    #[test]
    fn test_longest_alias_wins() {
        let dict = EntityDictionary::builder()
            .destination("Germany", "德國")
            .destination("Ireland", "愛爾蘭")
            .destination_alias("柏林", ["德國"])
            .destination_alias("都柏林", ["愛爾蘭"])
            .build()
            .unwrap();

        assert_eq!(dict.resolve_destinations("都柏林來回"), set(&["愛爾蘭"]));
        assert_eq!(
            dict.resolve_destinations("柏林 都柏林 雙城"),
            set(&["德國", "愛爾蘭"])
        );
    }

    #[test]
    fn test_unknown_alias_target_is_rejected() {
        let err = EntityDictionary::builder()
            .destination("Japan", "日本")
            .destination_alias("都柏林", ["愛爾蘭"])
            .build()
            .unwrap_err();

        assert_eq!(
            err,
            DictionaryError::UnknownAliasTarget {
                kind: EntityKind::Destination,
                alias: "都柏林".to_string(),
                target: "愛爾蘭".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_canonical_is_rejected() {
        let err = EntityDictionary::builder()
            .airline("Cathay Pacific", "國泰航空")
            .airline("Cathay Pacific", "國泰航空")
            .build()
            .unwrap_err();
        assert!(matches!(err, DictionaryError::DuplicateCanonical { .. }));
    }

    #[test]
    fn test_empty_alias_is_rejected() {
        let err = EntityDictionary::builder()
            .destination("Japan", "日本")
            .destination_alias(" ", ["日本"])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            DictionaryError::EmptyTerm {
                kind: EntityKind::Destination
            }
        );
    }

    #[test]
    fn test_labels_sorted_by_english_name() {
        let dict = EntityDictionary::builder()
            .destination("Korea", "韓國")
            .destination("Japan", "日本")
            .airline("Vistara", "Vistara")
            .build()
            .unwrap();

        let labels: Vec<String> = dict
            .destination_labels()
            .into_iter()
            .map(|(_, label)| label)
            .collect();
        assert_eq!(labels, vec!["日本 Japan", "韓國 Korea"]);
        assert_eq!(
            dict.airline_labels(),
            vec![("Vistara".to_string(), "Vistara".to_string())]
        );
        assert_eq!(dict.label_for_destination("日本"), "日本 Japan");
        assert_eq!(dict.label_for_destination("火星"), "火星");
    }
}
