//! Test utilities for filter evaluation

use crate::app::models::{FieldKey, Record, RecordSet};

mod engine_tests;

/// Build a record from known-field pairs
pub fn record(fields: &[(FieldKey, &str)]) -> Record {
    fields.iter().map(|&(key, value)| (key, value)).collect()
}

/// Small directory covering each quick filter
pub fn sample_records() -> RecordSet {
    RecordSet::new(vec![
        record(&[
            (FieldKey::Name, "Bean There"),
            (FieldKey::Location, "Springfield"),
            (FieldKey::Wifi, "5"),
            (FieldKey::Noise, "4"),
            (FieldKey::Power, "3"),
            (FieldKey::Coffee, "4"),
        ]),
        record(&[
            (FieldKey::Location, "Shelbyville"),
            (FieldKey::Wifi, "3"),
            (FieldKey::Noise, "2"),
        ]),
        record(&[
            (FieldKey::Name, "Mug Life"),
            (FieldKey::Wifi, "0"),
            (FieldKey::Power, "0"),
            (FieldKey::Coffee, "5"),
        ]),
        record(&[
            (FieldKey::Name, "Brewed Awakening"),
            (FieldKey::Location, "Capital City"),
            (FieldKey::Wifi, "4"),
            (FieldKey::Noise, "5"),
            (FieldKey::Power, "1"),
        ]),
    ])
}
