//! Search and quick-filter evaluation
//!
//! Every active constraint is AND'd: free-text search, each pinned search,
//! and each named quality filter. Evaluation is a pure function of the
//! record, the search term and the active filter set.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::app::models::{ActiveFilterSet, FieldKey, FilterToken, QualityFilter, Record, RecordSet};
use crate::constants::{DEFAULT_MIN_COFFEE, DEFAULT_MIN_QUIET, DEFAULT_MIN_WIFI};

/// Minimum ratings required by the named quality filters.
///
/// `quiet` reads the noise field as a quietness score: higher is quieter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterThresholds {
    pub wifi: i64,
    pub quiet: i64,
    pub coffee: i64,
}

impl Default for FilterThresholds {
    fn default() -> Self {
        Self {
            wifi: DEFAULT_MIN_WIFI,
            quiet: DEFAULT_MIN_QUIET,
            coffee: DEFAULT_MIN_COFFEE,
        }
    }
}

/// Evaluates records against a search term and an active filter set
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    thresholds: FilterThresholds,
}

impl FilterEngine {
    pub fn new(thresholds: FilterThresholds) -> Self {
        Self { thresholds }
    }

    /// True when the record satisfies the search term and every active filter
    pub fn matches(&self, record: &Record, search_term: &str, active: &ActiveFilterSet) -> bool {
        self.matches_lowered(record, &search_term.to_lowercase(), active)
    }

    /// Filter a record set, preserving source order
    pub fn apply<'a>(
        &self,
        records: &'a RecordSet,
        search_term: &str,
        active: &ActiveFilterSet,
    ) -> Vec<&'a Record> {
        let term = search_term.to_lowercase();
        let visible: Vec<&Record> = records
            .iter()
            .filter(|record| self.matches_lowered(record, &term, active))
            .collect();

        debug!(
            "Filtering complete: {} -> {} records ({} filters, search {:?})",
            records.len(),
            visible.len(),
            active.len(),
            term
        );

        visible
    }

    /// Evaluate one filter token against a record
    pub fn passes_token(&self, record: &Record, token: &FilterToken) -> bool {
        match token {
            FilterToken::PinnedSearch(phrase) => matches_text(record, &phrase.to_lowercase()),
            FilterToken::Quality(filter) => self.passes_quality(record, *filter),
            FilterToken::Unrecognized(_) => true,
        }
    }

    /// Evaluate a named quality filter; missing ratings count as 0
    pub fn passes_quality(&self, record: &Record, filter: QualityFilter) -> bool {
        match filter {
            QualityFilter::Wifi => record.rating(FieldKey::Wifi) >= self.thresholds.wifi,
            QualityFilter::Quiet => record.rating(FieldKey::Noise) >= self.thresholds.quiet,
            QualityFilter::Power => record.rating(FieldKey::Power) != 0,
            QualityFilter::Coffee => record.rating(FieldKey::Coffee) >= self.thresholds.coffee,
        }
    }

    fn matches_lowered(&self, record: &Record, term: &str, active: &ActiveFilterSet) -> bool {
        if !term.is_empty() && !matches_text(record, term) {
            return false;
        }
        active.iter().all(|token| self.passes_token(record, token))
    }
}

/// Case-insensitive substring match against name or location.
///
/// `term` must already be lowercased. Missing fields match as empty strings.
pub fn matches_text(record: &Record, term: &str) -> bool {
    [FieldKey::Name, FieldKey::Location]
        .into_iter()
        .any(|key| record.get_or_empty(key).to_lowercase().contains(term))
}

/// Evaluate with the default thresholds
pub fn matches(record: &Record, search_term: &str, active: &ActiveFilterSet) -> bool {
    FilterEngine::default().matches(record, search_term, active)
}
