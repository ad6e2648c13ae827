//! Text extractors that turn page text into `CityEntry` candidates.
//!
//! Extractors never touch the merged result set; the pipeline decides which
//! candidates are kept.

pub mod direct;
pub mod llm;
pub mod loose;

pub use direct::DirectPatternExtractor;
pub use llm::{chunk_text, parse_completion, LlmExtractor};
pub use loose::LoosePatternExtractor;

/// Collapses inner whitespace runs and strips surrounding quotes and emphasis markers.
pub(crate) fn clean_field(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | '*') || c.is_whitespace())
        .to_string()
}

pub(crate) fn contains_digit(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}
