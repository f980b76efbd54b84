//! Record filtering for the directory view
//!
//! Combines the free-text search with named quality filters and pinned
//! searches. See [`engine`] for evaluation rules.

pub mod engine;

#[cfg(test)]
mod tests;

pub use engine::{FilterEngine, FilterThresholds, matches, matches_text};
