use crate::domain::model::{CityEntry, CityRecord, IataCode};
use crate::extract::{clean_field, contains_digit, DirectPatternExtractor};
use regex::{Captures, Regex};
use std::sync::LazyLock;

// CODE CITY, terminated by a column gap (2+ spaces or a tab) or end of line
static CODE_CITY_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z]{3})[ \t]+(\p{L}[^\t]*?)(?:[ \t]{2,}|\t|$)")
        .expect("code/city pattern is valid")
});

/// Fallback for `CODE CITY` pairs, including several pairs on one line of a
/// multi-column layout. Never yields a country.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoosePatternExtractor;

impl LoosePatternExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str) -> Vec<CityEntry> {
        text.lines()
            .flat_map(|line| {
                // full rows belong to the direct pass
                let remainder = DirectPatternExtractor::strip_rows(line);
                CODE_CITY_PAIR
                    .captures_iter(&remainder)
                    .filter_map(|caps| Self::parse_pair(&caps))
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    fn parse_pair(caps: &Captures<'_>) -> Option<CityEntry> {
        let code = IataCode::parse(&caps[1])?;
        let city = clean_field(&caps[2]);

        if city.chars().count() < 2 || contains_digit(&city) {
            return None;
        }

        Some(CityEntry {
            city,
            record: CityRecord::new(code, None),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(text: &str) -> Vec<(String, String)> {
        LoosePatternExtractor::new()
            .extract(text)
            .into_iter()
            .map(|e| (e.city, e.record.code.to_string()))
            .collect()
    }

    #[test]
    fn test_single_pair() {
        assert_eq!(pairs("BUH Bucharest"), vec![("Bucharest".to_string(), "BUH".to_string())]);
    }

    #[test]
    fn test_multi_column_line() {
        assert_eq!(
            pairs("BUH Bucharest    NAP Napoli\tSAO São Paulo"),
            vec![
                ("Bucharest".to_string(), "BUH".to_string()),
                ("Napoli".to_string(), "NAP".to_string()),
                ("São Paulo".to_string(), "SAO".to_string()),
            ]
        );
    }

    #[test]
    fn test_digit_tokens_are_not_cities() {
        assert!(pairs("ABC 123 Main Street").is_empty());
        assert!(pairs("PAR Terminal2").is_empty());
    }

    #[test]
    fn test_records_have_no_country() {
        let entries = LoosePatternExtractor::new().extract("NAP Napoli");
        assert_eq!(entries[0].record.country, None);
    }

    #[test]
    fn test_skips_full_table_rows() {
        assert!(pairs("NYC New York NY United States").is_empty());
    }

    #[test]
    fn test_keeps_pairs_next_to_full_rows() {
        assert_eq!(
            pairs("NYC New York NY United States    BUH Bucharest"),
            vec![("Bucharest".to_string(), "BUH".to_string())]
        );
        assert!(pairs("NYC New York NY United States    BUH Bucharest RO Romania").is_empty());
    }
}
