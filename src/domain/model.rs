use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Three uppercase ASCII letters. Only constructible through [`IataCode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IataCode(String);

impl IataCode {
    /// Accepts any 3 ASCII letters (surrounding whitespace ignored) and upper-cases them.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(trimmed.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IataCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for IataCode {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{}' is not a 3-letter IATA code", value))
    }
}

impl From<IataCode> for String {
    fn from(code: IataCode) -> Self {
        code.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityRecord {
    pub code: IataCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl CityRecord {
    pub fn new(code: IataCode, country: Option<String>) -> Self {
        Self { code, country }
    }
}

/// A city/record pair produced by one extractor, before merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityEntry {
    pub city: String,
    pub record: CityRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionSource {
    Direct,
    Llm,
    Loose,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionSource::Direct => "direct",
            ExtractionSource::Llm => "llm",
            ExtractionSource::Loose => "loose",
        };
        f.write_str(name)
    }
}

/// City name to record. The first insert for a city wins; later ones are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: BTreeMap<String, CityRecord>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the entry was stored, `false` when the city was already present.
    pub fn insert_if_absent(&mut self, entry: CityEntry) -> bool {
        if self.entries.contains_key(&entry.city) {
            return false;
        }
        self.entries.insert(entry.city, entry.record);
        true
    }

    pub fn contains(&self, city: &str) -> bool {
        self.entries.contains_key(city)
    }

    pub fn get(&self, city: &str) -> Option<&CityRecord> {
        self.entries.get(city)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CityRecord)> {
        self.entries.iter()
    }
}

/// Counters for one pass of the extraction pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassStats {
    pub accepted: usize,
    pub duplicates: usize,
    pub failed_units: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionReport {
    pub pages: usize,
    pub direct: PassStats,
    pub llm: PassStats,
    pub loose: PassStats,
}

impl ExtractionReport {
    pub fn pass_mut(&mut self, source: ExtractionSource) -> &mut PassStats {
        match source {
            ExtractionSource::Direct => &mut self.direct,
            ExtractionSource::Llm => &mut self.llm,
            ExtractionSource::Loose => &mut self.loose,
        }
    }

    pub fn total_accepted(&self) -> usize {
        self.direct.accepted + self.llm.accepted + self.loose.accepted
    }
}

#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub results: ResultSet,
    pub report: ExtractionReport,
}

/// Output of the country conversion transform.
#[derive(Debug, Clone)]
pub struct ConversionResult {
    pub document: serde_json::Map<String, serde_json::Value>,
    pub converted: usize,
}
