use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

/// Filename stem format for entry files: creation time at second precision.
pub const FILE_STEM_FMT: &str = "%Y-%m-%d_%H-%M-%S";

/// Extension of entry files (rich-text markup).
pub const ENTRY_EXT: &str = "html";

/// A lightweight handle for one diary record.
///
/// Identity and timestamp both derive from the on-disk filename. Content is
/// never held here: it lives in the file, and in the engine's editor mirror
/// while an entry is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub timestamp: NaiveDateTime,
}

impl Entry {
    /// Build a handle from a record path, parsing the timestamp out of the
    /// filename stem. A malformed stem falls back to the current time; the
    /// fallback is recomputed on every index refresh and never persisted.
    pub fn from_path(path: PathBuf) -> Entry {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
        let timestamp = NaiveDateTime::parse_from_str(stem, FILE_STEM_FMT)
            .unwrap_or_else(|_| Local::now().naive_local());
        Entry { path, timestamp }
    }

    /// The filename stem, used as the entry's unique key.
    pub fn id(&self) -> &str {
        self.path.file_stem().and_then(|s| s.to_str()).unwrap_or("")
    }

    /// Display title: the timestamp as a long date ("January 15, 2024").
    pub fn title(&self) -> String {
        self.timestamp.format("%B %d, %Y").to_string()
    }

    /// Display time ("10:30").
    pub fn time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn parses_timestamp_from_stem() {
        let entry = Entry::from_path(PathBuf::from("diary/2024-01-15_10-30-00.html"));
        assert_eq!(entry.id(), "2024-01-15_10-30-00");
        assert_eq!(entry.title(), "January 15, 2024");
        assert_eq!(entry.time(), "10:30");
    }

    #[test]
    fn title_zero_pads_day() {
        let entry = Entry::from_path(PathBuf::from("2024-02-02_09-00-00.html"));
        assert_eq!(entry.title(), "February 02, 2024");
    }

    #[test]
    fn malformed_stem_falls_back_to_now() {
        let before = Local::now().naive_local();
        let entry = Entry::from_path(PathBuf::from("notes-from-the-road.html"));
        let after = Local::now().naive_local();

        assert_eq!(entry.id(), "notes-from-the-road");
        assert!(entry.timestamp >= before - TimeDelta::seconds(1));
        assert!(entry.timestamp <= after + TimeDelta::seconds(1));
    }

    #[test]
    fn stem_round_trips_through_format() {
        let entry = Entry::from_path(PathBuf::from("2023-12-31_23-59-59.html"));
        assert_eq!(
            entry.timestamp.format(FILE_STEM_FMT).to_string(),
            "2023-12-31_23-59-59"
        );
    }
}
