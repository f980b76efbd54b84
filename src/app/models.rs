//! Data models for the cafe directory
//!
//! This module contains the core data structures: canonical field keys, the
//! sparse [`Record`] built from one CSV row, the ordered [`RecordSet`], and the
//! filter tokens that make up an [`ActiveFilterSet`].

use crate::constants::PINNED_SEARCH_PREFIX;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// =============================================================================
// Field Keys
// =============================================================================

/// Known canonical fields of a cafe record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldKey {
    Name,
    Location,
    MapUrl,
    Wifi,
    Comfort,
    Noise,
    Coffee,
    Food,
    Power,
    Temperature,
    Comments,
    Timestamp,
}

impl FieldKey {
    pub const ALL: [FieldKey; 12] = [
        FieldKey::Name,
        FieldKey::Location,
        FieldKey::MapUrl,
        FieldKey::Wifi,
        FieldKey::Comfort,
        FieldKey::Noise,
        FieldKey::Coffee,
        FieldKey::Food,
        FieldKey::Power,
        FieldKey::Temperature,
        FieldKey::Comments,
        FieldKey::Timestamp,
    ];

    /// Stable external name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Location => "location",
            FieldKey::MapUrl => "mapUrl",
            FieldKey::Wifi => "wifi",
            FieldKey::Comfort => "comfort",
            FieldKey::Noise => "noise",
            FieldKey::Coffee => "coffee",
            FieldKey::Food => "food",
            FieldKey::Power => "power",
            FieldKey::Temperature => "temperature",
            FieldKey::Comments => "comments",
            FieldKey::Timestamp => "timestamp",
        }
    }

    /// Look up a field by its external name, ignoring ASCII case
    pub fn from_name(name: &str) -> Option<Self> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key of a record field: either a known field or a pass-through header
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalKey {
    Field(FieldKey),
    /// Unmapped header, already normalized (dequoted, trimmed, lowercased)
    Other(String),
}

impl CanonicalKey {
    /// Key for normalized header text. A known field name always resolves to
    /// that field, so `Other` never shadows one.
    pub fn from_normalized(name: String) -> Self {
        match FieldKey::from_name(&name) {
            Some(key) => CanonicalKey::Field(key),
            None => CanonicalKey::Other(name),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CanonicalKey::Field(key) => key.as_str(),
            CanonicalKey::Other(name) => name,
        }
    }
}

impl From<FieldKey> for CanonicalKey {
    fn from(key: FieldKey) -> Self {
        CanonicalKey::Field(key)
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CanonicalKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// Records
// =============================================================================

/// Parse a rating cell using the leading-integer rule.
///
/// Leading whitespace and an optional sign are accepted, then the longest run
/// of ASCII digits is read. Anything without leading digits is `0`.
pub fn parse_rating(value: &str) -> i64 {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());

    let magnitude = rest[..digits_end]
        .bytes()
        .fold(0i64, |acc, b| acc.saturating_mul(10).saturating_add(i64::from(b - b'0')));

    if negative { -magnitude } else { magnitude }
}

/// One normalized venue entry.
///
/// Records are sparse: a key is present only when both its header cell and
/// its value cell were non-blank. Records are immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<CanonicalKey, String>,
}

impl Record {
    /// Look up a known field
    pub fn get(&self, key: FieldKey) -> Option<&str> {
        self.fields
            .get(&CanonicalKey::Field(key))
            .map(String::as_str)
    }

    /// Look up a known field, treating an absent key as the empty string
    pub fn get_or_empty(&self, key: FieldKey) -> &str {
        self.get(key).unwrap_or("")
    }

    /// Look up any field by canonical key
    pub fn get_key(&self, key: &CanonicalKey) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Numeric rating of a field; absent or non-numeric is `0`
    pub fn rating(&self, key: FieldKey) -> i64 {
        self.get(key).map(parse_rating).unwrap_or(0)
    }

    pub fn contains(&self, key: FieldKey) -> bool {
        self.fields.contains_key(&CanonicalKey::Field(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalKey, &str)> {
        self.fields.iter().map(|(k, v)| (k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<CanonicalKey>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Ordered records of one successful ingestion, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Filter Tokens
// =============================================================================

/// Named quick filters offered to the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QualityFilter {
    Wifi,
    Quiet,
    Power,
    Coffee,
}

impl QualityFilter {
    pub const ALL: [QualityFilter; 4] = [
        QualityFilter::Wifi,
        QualityFilter::Quiet,
        QualityFilter::Power,
        QualityFilter::Coffee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityFilter::Wifi => "wifi",
            QualityFilter::Quiet => "quiet",
            QualityFilter::Power => "power",
            QualityFilter::Coffee => "coffee",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        QualityFilter::ALL
            .into_iter()
            .find(|filter| filter.as_str() == name)
    }
}

impl fmt::Display for QualityFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the active filter set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterToken {
    Quality(QualityFilter),
    /// Pinned search; the phrase is kept verbatim and lowercased at match time
    PinnedSearch(String),
    /// Anything else; always passes
    Unrecognized(String),
}

impl FilterToken {
    /// Parse the wire form of a token.
    ///
    /// Everything after the first `search:` prefix is the phrase, colons included.
    pub fn parse(token: &str) -> Self {
        if let Some(phrase) = token.strip_prefix(PINNED_SEARCH_PREFIX) {
            return FilterToken::PinnedSearch(phrase.to_string());
        }
        match QualityFilter::from_name(token) {
            Some(filter) => FilterToken::Quality(filter),
            None => FilterToken::Unrecognized(token.to_string()),
        }
    }

    pub fn pinned(phrase: impl Into<String>) -> Self {
        FilterToken::PinnedSearch(phrase.into())
    }
}

impl From<QualityFilter> for FilterToken {
    fn from(filter: QualityFilter) -> Self {
        FilterToken::Quality(filter)
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterToken::Quality(filter) => f.write_str(filter.as_str()),
            FilterToken::PinnedSearch(phrase) => write!(f, "{PINNED_SEARCH_PREFIX}{phrase}"),
            FilterToken::Unrecognized(raw) => f.write_str(raw),
        }
    }
}

/// Set of enabled filters, unique by token value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveFilterSet {
    tokens: BTreeSet<FilterToken>,
}

impl ActiveFilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the token was already present
    pub fn insert(&mut self, token: FilterToken) -> bool {
        self.tokens.insert(token)
    }

    /// Returns false if the token was not present
    pub fn remove(&mut self, token: &FilterToken) -> bool {
        self.tokens.remove(token)
    }

    /// Flip presence of a token; returns true if it is now active
    pub fn toggle(&mut self, token: FilterToken) -> bool {
        if self.tokens.remove(&token) {
            false
        } else {
            self.tokens.insert(token);
            true
        }
    }

    pub fn contains(&self, token: &FilterToken) -> bool {
        self.tokens.contains(token)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FilterToken> {
        self.tokens.iter()
    }

    pub fn pinned_phrases(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            FilterToken::PinnedSearch(phrase) => Some(phrase.as_str()),
            _ => None,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl FromIterator<FilterToken> for ActiveFilterSet {
    fn from_iter<I: IntoIterator<Item = FilterToken>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}
