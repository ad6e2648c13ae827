use crate::domain::model::{CityEntry, CityRecord, IataCode};
use crate::extract::{clean_field, contains_digit};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

// CODE CITY STATE COUNTRY. City and country words are single-space separated;
// a row ends at a column gap (2+ spaces or a tab) or at end of line, so one
// line of a multi-column page can hold several rows.
static TABLE_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b([A-Z]{3})[ \t]+(\S+(?: \S+)*?)[ \t]+([A-Z]{2})[ \t]+([A-Za-z][A-Za-z.,'()\-]*(?: [A-Za-z.,'()\-]+)*)(?:[ \t]{2,}|\t|[ \t]*$)",
    )
    .expect("table row pattern is valid")
});

/// Matches fully populated table rows: `NYC New York NY United States`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectPatternExtractor;

impl DirectPatternExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Replaces every complete table row in `line` with a column gap, leaving
    /// the text the direct pass does not own.
    pub fn strip_rows(line: &str) -> Cow<'_, str> {
        TABLE_ROW.replace_all(line, "\t")
    }

    pub fn extract(&self, text: &str) -> Vec<CityEntry> {
        text.lines()
            .flat_map(|line| TABLE_ROW.captures_iter(line))
            .filter_map(|caps| Self::parse_row(&caps))
            .collect()
    }

    fn parse_row(caps: &Captures<'_>) -> Option<CityEntry> {
        let code = IataCode::parse(&caps[1])?;
        let city = clean_field(&caps[2]);
        let country = clean_field(&caps[4]);

        if city.is_empty() || contains_digit(&city) || country.is_empty() {
            return None;
        }

        Some(CityEntry {
            city,
            record: CityRecord::new(code, Some(country)),
        })
    }
}
