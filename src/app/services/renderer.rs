//! Output collaborators for the filtered directory view
//!
//! The ingestion and filter core only produces [`SessionView`]s. Anything that
//! turns them into pixels, text or JSON implements [`Renderer`].

use colored::Colorize;
use serde_json::json;
use std::io::Write;

use crate::Result;
use crate::app::models::{FieldKey, Record};
use crate::app::services::session::SessionView;
use crate::constants::MAX_RATING;

/// Consumer of session views
pub trait Renderer {
    fn render(&mut self, view: &SessionView<'_>) -> Result<()>;
}

/// Rating rows shown on each card, in display order
const RATING_ROWS: &[(FieldKey, &str)] = &[
    (FieldKey::Wifi, "Wifi"),
    (FieldKey::Power, "Power"),
    (FieldKey::Noise, "Quietness"),
    (FieldKey::Coffee, "Coffee"),
    (FieldKey::Temperature, "Temperature"),
    (FieldKey::Comfort, "Comfort"),
];

/// Star string for a rating, or `None` when there is no rating
pub fn stars(rating: i64) -> Option<String> {
    if rating == 0 {
        return None;
    }
    let filled = rating.clamp(0, MAX_RATING) as usize;
    let empty = MAX_RATING as usize - filled;
    Some(format!("{}{}", "★".repeat(filled), "☆".repeat(empty)))
}

/// Plain-text cards, optionally colored
#[derive(Debug)]
pub struct TextRenderer<W: Write> {
    out: W,
    color: bool,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self { out, color }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render_card(&mut self, record: &Record) -> Result<()> {
        let name = record.get(FieldKey::Name).unwrap_or("(unnamed)");
        if self.color {
            writeln!(self.out, "{}", name.bold())?;
        } else {
            writeln!(self.out, "{}", name)?;
        }

        if let Some(location) = record.get(FieldKey::Location) {
            writeln!(self.out, "  {}", location)?;
        }

        for &(key, label) in RATING_ROWS {
            let display = match stars(record.rating(key)) {
                Some(stars) if self.color => stars.yellow().to_string(),
                Some(stars) => stars,
                None if self.color => "None".dimmed().to_string(),
                None => "None".to_string(),
            };
            writeln!(self.out, "  {:<12}{}", label, display)?;
        }

        if let Some(map_url) = record.get(FieldKey::MapUrl) {
            writeln!(self.out, "  {:<12}{}", "Map", map_url)?;
        }
        if let Some(comments) = record.get(FieldKey::Comments) {
            writeln!(self.out, "  {:<12}{}", "Comments", comments)?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &SessionView<'_>) -> Result<()> {
        match view {
            SessionView::Pending => writeln!(self.out, "Loading cafes...")?,
            SessionView::Failed { detail } => {
                let headline = "Failed to load cafes. Please try again later.";
                if self.color {
                    writeln!(self.out, "{}", headline.red())?;
                } else {
                    writeln!(self.out, "{}", headline)?;
                }
                writeln!(self.out, "{}", detail)?;
            }
            SessionView::Records(records) if records.is_empty() => {
                writeln!(self.out, "No cafes found matching your criteria")?;
            }
            SessionView::Records(records) => {
                for record in records {
                    self.render_card(record)?;
                }
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

/// JSON array of records; failures become an object with an `error` field
#[derive(Debug)]
pub struct JsonRenderer<W: Write> {
    out: W,
}

impl<W: Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for JsonRenderer<W> {
    fn render(&mut self, view: &SessionView<'_>) -> Result<()> {
        let value = match view {
            SessionView::Pending => json!([]),
            SessionView::Failed { detail } => json!({ "error": detail, "records": [] }),
            SessionView::Records(records) => serde_json::to_value(records)?,
        };
        serde_json::to_writer_pretty(&mut self.out, &value)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
