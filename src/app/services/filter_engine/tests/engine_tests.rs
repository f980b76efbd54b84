//! Tests for search and quick-filter evaluation

use super::{record, sample_records};
use crate::app::models::{ActiveFilterSet, FieldKey, FilterToken, QualityFilter};
use crate::app::services::filter_engine::{FilterEngine, FilterThresholds, matches};

fn filters(tokens: &[&str]) -> ActiveFilterSet {
    tokens.iter().map(|token| FilterToken::parse(token)).collect()
}

fn names(engine: &FilterEngine, search: &str, active: &ActiveFilterSet) -> Vec<String> {
    let records = sample_records();
    engine
        .apply(&records, search, active)
        .into_iter()
        .map(|record| record.get_or_empty(FieldKey::Location).to_string())
        .collect()
}

#[test]
fn test_no_constraints_passes_everything() {
    let records = sample_records();
    let visible = FilterEngine::default().apply(&records, "", &ActiveFilterSet::new());
    assert_eq!(visible.len(), records.len());
}

#[test]
fn test_wifi_threshold() {
    let active = filters(&["wifi"]);
    assert!(!matches(&record(&[(FieldKey::Wifi, "3")]), "", &active));
    assert!(matches(&record(&[(FieldKey::Wifi, "4")]), "", &active));
    assert!(!matches(&record(&[(FieldKey::Name, "No Wifi Data")]), "", &active));
}

#[test]
fn test_quiet_requires_high_quietness_score() {
    let active = filters(&["quiet"]);
    assert!(matches(&record(&[(FieldKey::Noise, "4")]), "", &active));
    assert!(matches(&record(&[(FieldKey::Noise, "5")]), "", &active));
    assert!(!matches(&record(&[(FieldKey::Noise, "2")]), "", &active));
    assert!(!matches(&record(&[]), "", &active));
}

#[test]
fn test_power_requires_nonzero() {
    let active = filters(&["power"]);
    assert!(matches(&record(&[(FieldKey::Power, "1")]), "", &active));
    assert!(!matches(&record(&[(FieldKey::Power, "0")]), "", &active));
    assert!(!matches(&record(&[(FieldKey::Power, "none")]), "", &active));
    assert!(!matches(&record(&[]), "", &active));
}

#[test]
fn test_coffee_threshold() {
    let active = filters(&["coffee"]);
    assert!(matches(&record(&[(FieldKey::Coffee, "4")]), "", &active));
    assert!(!matches(&record(&[(FieldKey::Coffee, "3.9")]), "", &active));
}

#[test]
fn test_search_matches_name_or_location_case_insensitively() {
    let engine = FilterEngine::default();
    let none = ActiveFilterSet::new();

    assert_eq!(names(&engine, "bean", &none), vec!["Springfield"]);
    assert_eq!(names(&engine, "SHELBY", &none), vec!["Shelbyville"]);
    // Mug Life has no location; matched through its name
    assert_eq!(
        FilterEngine::default()
            .apply(&sample_records(), "mug", &none)
            .len(),
        1
    );
    assert!(names(&engine, "nowhere", &none).is_empty());
}

#[test]
fn test_all_constraints_are_anded() {
    let engine = FilterEngine::default();

    assert_eq!(
        names(&engine, "", &filters(&["wifi", "quiet"])),
        vec!["Springfield", "Capital City"]
    );
    assert_eq!(
        names(&engine, "", &filters(&["wifi", "quiet", "coffee"])),
        vec!["Springfield"]
    );
    assert_eq!(
        names(&engine, "capital", &filters(&["wifi", "power"])),
        vec!["Capital City"]
    );
    assert!(names(&engine, "capital", &filters(&["coffee"])).is_empty());
}

#[test]
fn test_pinned_search_behaves_like_search() {
    let engine = FilterEngine::default();
    assert_eq!(
        names(&engine, "", &filters(&["search:Brew"])),
        vec!["Capital City"]
    );
    // Pinned and free text combine
    assert!(names(&engine, "spring", &filters(&["search:brew"])).is_empty());
}

#[test]
fn test_pinned_phrase_with_delimiter_not_truncated() {
    let active = filters(&["search:Cafe: The Sequel"]);
    let sequel = record(&[(FieldKey::Name, "Cafe: The Sequel")]);
    let prefix_only = record(&[(FieldKey::Name, "Cafe")]);

    assert!(matches(&sequel, "", &active));
    assert!(!matches(&prefix_only, "", &active));
}

#[test]
fn test_unrecognized_tokens_always_pass() {
    let records = sample_records();
    let visible = FilterEngine::default().apply(&records, "", &filters(&["outdoor", "vegan"]));
    assert_eq!(visible.len(), records.len());
}

#[test]
fn test_custom_thresholds() {
    let engine = FilterEngine::new(FilterThresholds {
        wifi: 3,
        ..Default::default()
    });
    let active = filters(&["wifi"]);

    assert!(engine.matches(&record(&[(FieldKey::Wifi, "3")]), "", &active));
    assert!(engine.passes_quality(&record(&[(FieldKey::Wifi, "3")]), QualityFilter::Wifi));
}

#[test]
fn test_apply_is_repeatable() {
    let engine = FilterEngine::default();
    let active = filters(&["power", "search:i"]);
    assert_eq!(names(&engine, "", &active), names(&engine, "", &active));
}
