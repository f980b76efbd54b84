//! Per-session directory state
//!
//! One owned object holds the loaded records, the free-text search and the
//! active filters. All mutation goes through the methods below; the filtered
//! view is recomputed from scratch on every read.

use tracing::{debug, info, warn};

use crate::CafeError;
use crate::app::models::{ActiveFilterSet, FilterToken, QualityFilter, Record, RecordSet};
use crate::app::services::filter_engine::FilterEngine;

/// Outcome of the most recent ingestion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Pending,
    Loaded(RecordSet),
    Failed(String),
}

/// What a renderer should show for the current state
#[derive(Debug, Clone, PartialEq)]
pub enum SessionView<'a> {
    Pending,
    Failed { detail: &'a str },
    Records(Vec<&'a Record>),
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    load: LoadState,

    /// Search text as typed
    search_input: String,

    /// Lowercased search text used for matching
    search_term: String,

    active_filters: ActiveFilterSet,
    engine: FilterEngine,
}

impl SessionState {
    pub fn new(engine: FilterEngine) -> Self {
        Self {
            engine,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Ingestion
    // -------------------------------------------------------------------------

    /// Install a freshly ingested record set, replacing any previous one whole
    pub fn replace_records(&mut self, records: RecordSet) {
        info!("Loaded {} records into session", records.len());
        self.load = LoadState::Loaded(records);
    }

    /// Record a failed ingestion; any previous record set is dropped
    pub fn record_failure(&mut self, error: &CafeError) {
        warn!("Ingestion failed: {}", error);
        self.load = LoadState::Failed(error.to_string());
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn records(&self) -> Option<&RecordSet> {
        match &self.load {
            LoadState::Loaded(records) => Some(records),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Search and filters
    // -------------------------------------------------------------------------

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Lowercased free-text search
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, text: &str) {
        self.search_input = text.to_string();
        self.search_term = text.to_lowercase();
        debug!("Search term set to {:?}", self.search_term);
    }

    pub fn clear_search(&mut self) {
        self.set_search_term("");
    }

    pub fn active_filters(&self) -> &ActiveFilterSet {
        &self.active_filters
    }

    /// Flip a named quality filter; returns true if it is now active
    pub fn toggle_filter(&mut self, filter: QualityFilter) -> bool {
        self.toggle_token(filter.into())
    }

    /// Flip any filter token; returns true if it is now active
    pub fn toggle_token(&mut self, token: FilterToken) -> bool {
        let label = token.to_string();
        let active = self.active_filters.toggle(token);
        debug!("Filter {} {}", label, if active { "on" } else { "off" });
        active
    }

    /// Promote the current search text into a pinned-search filter.
    ///
    /// Blank search text is a no-op. Otherwise the trimmed text is pinned
    /// (once per identical phrase) and the free-text search is cleared.
    pub fn pin_search(&mut self) -> Option<FilterToken> {
        let phrase = self.search_input.trim();
        if phrase.is_empty() {
            return None;
        }

        let token = FilterToken::pinned(phrase);
        if self.active_filters.insert(token.clone()) {
            debug!("Pinned search {}", token);
        } else {
            debug!("Search {} already pinned", token);
        }
        self.clear_search();
        Some(token)
    }

    /// Remove a pinned search by phrase. The free-text search is untouched.
    pub fn unpin(&mut self, phrase: &str) -> bool {
        self.remove_filter(&FilterToken::pinned(phrase))
    }

    pub fn remove_filter(&mut self, token: &FilterToken) -> bool {
        self.active_filters.remove(token)
    }

    // -------------------------------------------------------------------------
    // Views
    // -------------------------------------------------------------------------

    /// Records passing the current search and filters, in source order
    pub fn visible_records(&self) -> Vec<&Record> {
        match self.records() {
            Some(records) => self
                .engine
                .apply(records, &self.search_term, &self.active_filters),
            None => Vec::new(),
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        match &self.load {
            LoadState::Pending => SessionView::Pending,
            LoadState::Failed(detail) => SessionView::Failed { detail },
            LoadState::Loaded(_) => SessionView::Records(self.visible_records()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::FieldKey;

    fn loaded_session() -> SessionState {
        let records = RecordSet::new(vec![
            [(FieldKey::Name, "Brew Haven"), (FieldKey::Wifi, "5")]
                .into_iter()
                .collect(),
            [(FieldKey::Name, "Quiet Corner"), (FieldKey::Noise, "5")]
                .into_iter()
                .collect(),
        ]);
        let mut session = SessionState::default();
        session.replace_records(records);
        session
    }

    fn visible_names(session: &SessionState) -> Vec<&str> {
        session
            .visible_records()
            .into_iter()
            .map(|record| record.get_or_empty(FieldKey::Name))
            .collect()
    }

    #[test]
    fn test_initial_state_is_empty() {
        let session = SessionState::default();
        assert_eq!(session.load_state(), &LoadState::Pending);
        assert_eq!(session.search_term(), "");
        assert!(session.active_filters().is_empty());
        assert!(session.visible_records().is_empty());
        assert_eq!(session.view(), SessionView::Pending);
    }

    #[test]
    fn test_search_term_lowercased() {
        let mut session = loaded_session();
        session.set_search_term("BREW");
        assert_eq!(session.search_term(), "brew");
        assert_eq!(session.search_input(), "BREW");
        assert_eq!(visible_names(&session), vec!["Brew Haven"]);
    }

    #[test]
    fn test_pin_moves_search_into_filter() {
        let mut session = loaded_session();
        session.set_search_term("brew");

        let token = session.pin_search().unwrap();

        assert_eq!(token.to_string(), "search:brew");
        assert!(session.active_filters().contains(&token));
        assert_eq!(session.search_term(), "");
        assert_eq!(visible_names(&session), vec!["Brew Haven"]);
    }

    #[test]
    fn test_pin_keeps_typed_casing_and_trims() {
        let mut session = loaded_session();
        session.set_search_term("  Brew ");
        let token = session.pin_search().unwrap();

        assert_eq!(token, FilterToken::pinned("Brew"));
        assert_eq!(visible_names(&session), vec!["Brew Haven"]);
    }

    #[test]
    fn test_pin_blank_search_is_noop() {
        let mut session = loaded_session();
        session.set_search_term("   ");

        assert!(session.pin_search().is_none());
        assert!(session.active_filters().is_empty());
        assert_eq!(session.search_input(), "   ");
    }

    #[test]
    fn test_duplicate_pin_not_added_twice() {
        let mut session = loaded_session();
        session.set_search_term("brew");
        session.pin_search();
        session.set_search_term("brew");
        session.pin_search();

        assert_eq!(session.active_filters().len(), 1);
        assert_eq!(session.search_term(), "");
    }

    #[test]
    fn test_unpin_leaves_search_untouched() {
        let mut session = loaded_session();
        session.set_search_term("brew");
        session.pin_search();
        session.set_search_term("corner");

        assert!(session.unpin("brew"));
        assert!(!session.unpin("brew"));
        assert_eq!(session.search_term(), "corner");
        assert_eq!(visible_names(&session), vec!["Quiet Corner"]);
    }

    #[test]
    fn test_toggle_filter_flips_presence() {
        let mut session = loaded_session();

        assert!(session.toggle_filter(QualityFilter::Quiet));
        assert_eq!(visible_names(&session), vec!["Quiet Corner"]);

        assert!(!session.toggle_filter(QualityFilter::Quiet));
        assert_eq!(visible_names(&session).len(), 2);
    }

    #[test]
    fn test_failure_replaces_records() {
        let mut session = loaded_session();
        session.record_failure(&CafeError::http_status("https://sheet.example", 503));

        assert!(session.records().is_none());
        assert!(session.visible_records().is_empty());
        match session.view() {
            SessionView::Failed { detail } => assert!(detail.contains("503")),
            other => panic!("Expected failed view, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_load_distinct_from_failure() {
        let mut session = SessionState::default();
        session.replace_records(RecordSet::default());

        assert_eq!(session.view(), SessionView::Records(Vec::new()));
        assert!(session.records().is_some());
    }

    #[test]
    fn test_replace_records_keeps_filters() {
        let mut session = loaded_session();
        session.toggle_filter(QualityFilter::Wifi);
        session.replace_records(RecordSet::new(vec![
            [(FieldKey::Name, "New Place"), (FieldKey::Wifi, "4")]
                .into_iter()
                .collect(),
        ]));

        assert_eq!(visible_names(&session), vec!["New Place"]);
    }
}
