//! CSV export of aggregated collections.
//!
//! Fields containing a comma, a double quote, CR or LF are quoted and inner
//! quotes doubled. Rows end with `\n`.

use std::borrow::Cow;
use std::path::Path;

use tracing::info;

use crate::application::aggregate::Attributed;
use crate::domain::{Action, Superfan, Timestamp};
use crate::error::Result;

pub const ACTION_COLUMNS: [&str; 7] = [
    "artist",
    "title",
    "urgency",
    "status",
    "category",
    "created_at",
    "due_date",
];

pub const SUPERFAN_COLUMNS: [&str; 6] = [
    "artist",
    "name",
    "location",
    "tier",
    "fan_value_score",
    "lifetime_value",
];

/// Quote a field if it needs it.
#[must_use]
pub fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Accumulates a CSV document in memory.
#[derive(Debug)]
pub struct CsvWriter {
    out: String,
}

impl CsvWriter {
    /// Start a document with the given header row.
    #[must_use]
    pub fn new(header: &[&str]) -> Self {
        let mut writer = Self { out: String::new() };
        writer.row(header.iter().copied());
        writer
    }

    pub fn row<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (i, field) in fields.into_iter().enumerate() {
            if i > 0 {
                self.out.push(',');
            }
            self.out.push_str(&escape_field(field.as_ref()));
        }
        self.out.push('\n');
    }

    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

fn date(ts: &Timestamp) -> String {
    ts.as_datetime().format("%Y-%m-%d").to_string()
}

/// Render actions, one row per element, in collection order.
#[must_use]
pub fn export_actions(items: &[Attributed<Action>]) -> String {
    let mut csv = CsvWriter::new(&ACTION_COLUMNS);
    for entry in items {
        let action = &entry.item;
        csv.row([
            entry.artist.name.clone(),
            action.title.clone(),
            action.urgency.to_string(),
            action.status.to_string(),
            action.category.clone(),
            date(&action.created_at),
            action.due_date.as_ref().map(date).unwrap_or_default(),
        ]);
    }
    csv.finish()
}

/// Render superfans, one row per element, in collection order.
#[must_use]
pub fn export_superfans(items: &[Attributed<Superfan>]) -> String {
    let mut csv = CsvWriter::new(&SUPERFAN_COLUMNS);
    for entry in items {
        let fan = &entry.item;
        csv.row([
            entry.artist.name.clone(),
            fan.name.clone(),
            fan.location.clone().unwrap_or_default(),
            fan.tier.to_string(),
            format!("{:.1}", fan.fan_value_score),
            format!("{:.2}", fan.lifetime_value),
        ]);
    }
    csv.finish()
}

/// Write a rendered document to disk.
///
/// # Errors
///
/// Returns an IO error if the file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents)?;
    info!(path = %path.display(), bytes = contents.len(), "CSV written");
    Ok(())
}
