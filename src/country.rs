//! Country code → country name normalization.

use crate::domain::ports::CountryLookup;
use std::collections::HashMap;

/// Fallback names for codes the reference table does not resolve.
pub const DEFAULT_OVERRIDES: &[(&str, &str)] = &[
    ("UK", "United Kingdom"),
    ("US", "United States"),
    ("UAE", "United Arab Emirates"),
    ("PF", "French Polynesia"),
    ("TL", "Timor-Leste"),
    ("XK", "Kosovo"),
];

/// True for 2 or 3 alphabetic characters, the only strings worth looking up.
pub fn looks_like_country_code(value: &str) -> bool {
    let count = value.chars().count();
    (count == 2 || count == 3) && value.chars().all(char::is_alphabetic)
}

pub struct CountryNormalizer<L: CountryLookup> {
    lookup: L,
    overrides: HashMap<String, String>,
}

impl<L: CountryLookup> CountryNormalizer<L> {
    pub fn new(lookup: L) -> Self {
        let overrides = DEFAULT_OVERRIDES
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect();
        Self { lookup, overrides }
    }

    /// Adds or replaces override entries.
    pub fn with_overrides<I>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.overrides.extend(extra);
        self
    }

    /// Alpha-2 lookup, then alpha-3, then the override table. Anything
    /// unresolved, or not shaped like a code, comes back unchanged.
    pub fn normalize(&self, code: &str) -> String {
        if !looks_like_country_code(code) {
            return code.to_string();
        }

        self.lookup
            .by_alpha2(code)
            .or_else(|| self.lookup.by_alpha3(code))
            .or_else(|| self.overrides.get(code).cloned())
            .unwrap_or_else(|| code.to_string())
    }

    /// Rewrites the `country` field of every object entry in place and
    /// returns how many entries changed. Other fields and non-object entries
    /// are left alone.
    pub fn convert_document(
        &self,
        document: &mut serde_json::Map<String, serde_json::Value>,
    ) -> usize {
        let mut converted = 0;

        for (city, info) in document.iter_mut() {
            let Some(country) = info.get_mut("country") else {
                continue;
            };
            let Some(code) = country.as_str() else {
                continue;
            };

            let name = self.normalize(code);
            if name != code {
                tracing::debug!(
                    city = %city,
                    code = %code,
                    country = %name,
                    "Converted country code"
                );
                *country = serde_json::Value::String(name);
                converted += 1;
            }
        }

        converted
    }
}
