use crate::domain::model::{CityEntry, CityRecord, IataCode};
use crate::domain::ports::CompletionClient;
use crate::extract::clean_field;
use crate::utils::error::Result;
use regex::Regex;
use std::sync::LazyLock;

pub const SYSTEM_PROMPT: &str = "You are a data extractor. You read fragments of an IATA city code \
reference table and list every city found in them. Answer with one line per city in the exact form \
`City, Country: CODE`, where CODE is the 3-letter IATA code. Keep the city name as written in the \
table. Do not swap city names and codes. Do not add explanations, numbering or headers.";

// City, Country: CODE. The city takes everything up to the last comma before the colon.
static CITY_COUNTRY_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(?:[-*•]\s*|\d+[.)]\s*)?(?P<city>[^:\n]+),(?P<country>[^,:\n]+):(?P<code>[^\n]+)$",
    )
    .expect("city/country/code pattern is valid")
});

// City: CODE, when the model leaves the country out
static CITY_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•]\s*|\d+[.)]\s*)?(?P<city>[^,:\n]+):(?P<code>[^\n]+)$")
        .expect("city/code pattern is valid")
});

/// Splits text into windows of at most `size` characters. Whitespace-only
/// windows are dropped since there is nothing to send.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let size = size.max(1);
    let chars: Vec<char> = text.chars().collect();

    chars
        .chunks(size)
        .map(|window| window.iter().collect::<String>())
        .filter(|chunk| !chunk.trim().is_empty())
        .collect()
}

pub fn build_user_prompt(chunk: &str) -> String {
    format!(
        "Example output:\nNapoli, Italy: NAP\nBucharest, Romania: BUH\n\nTable fragment:\n{}",
        chunk
    )
}

/// Parses a completion into entries. Accepts either `City, Country: CODE`
/// lines or a JSON object (`{city: code}` or `{city: {code, country}}`),
/// optionally wrapped in a Markdown code fence.
pub fn parse_completion(text: &str) -> Vec<CityEntry> {
    let body = strip_code_fence(text);

    if let Ok(serde_json::Value::Object(map)) = serde_json::from_str::<serde_json::Value>(body) {
        return parse_json_object(map);
    }

    body.lines().filter_map(parse_line).collect()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }
    // drop the opening fence line (it may carry a language tag) and the closing fence
    let without_open = trimmed.split_once('\n').map_or("", |(_, rest)| rest);
    without_open.trim_end().trim_end_matches("```").trim()
}

fn parse_line(line: &str) -> Option<CityEntry> {
    if let Some(caps) = CITY_COUNTRY_CODE.captures(line) {
        return build_entry(&caps["city"], &caps["code"], Some(&caps["country"]));
    }
    let caps = CITY_CODE.captures(line)?;
    build_entry(&caps["city"], &caps["code"], None)
}

fn parse_json_object(map: serde_json::Map<String, serde_json::Value>) -> Vec<CityEntry> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(code) => build_entry(&key, &code, None),
            serde_json::Value::Object(fields) => {
                let code = fields.get("code").and_then(|v| v.as_str())?;
                let country = fields.get("country").and_then(|v| v.as_str());
                build_entry(&key, code, country)
            }
            _ => None,
        })
        .collect()
}

/// Builds an entry, repairing a swapped city/code pair: when the code slot
/// is not a code but the city slot is three letters, the two trade places.
fn build_entry(city: &str, code: &str, country: Option<&str>) -> Option<CityEntry> {
    let city = clean_field(city);
    let code = clean_code(code);
    let country = country.map(clean_field).filter(|c| !c.is_empty());

    let (city, code) = match IataCode::parse(&code) {
        Some(parsed) => (city, parsed),
        None if code.chars().count() > 2 => {
            let swapped = IataCode::parse(&city)?;
            tracing::debug!(city = %code, code = %swapped, "Repaired inverted city/code pair");
            (clean_field(&code), swapped)
        }
        None => return None,
    };

    if city.is_empty() {
        return None;
    }

    Some(CityEntry {
        city,
        record: CityRecord::new(code, country),
    })
}

fn clean_code(raw: &str) -> String {
    clean_field(raw)
        .trim_matches(|c: char| !c.is_alphanumeric() && !c.is_whitespace())
        .trim()
        .to_string()
}

/// Sends text chunks to a completion service and parses the answers.
pub struct LlmExtractor {
    client: Box<dyn CompletionClient>,
}

impl LlmExtractor {
    pub fn new(client: Box<dyn CompletionClient>) -> Self {
        Self { client }
    }

    pub async fn extract_chunk(&self, chunk: &str) -> Result<Vec<CityEntry>> {
        let user_prompt = build_user_prompt(chunk);
        let completion = self.client.complete(SYSTEM_PROMPT, &user_prompt).await?;

        let entries = parse_completion(&completion);
        if entries.is_empty() {
            tracing::debug!(
                response_chars = completion.chars().count(),
                "Completion contained no parsable entries"
            );
        }
        Ok(entries)
    }
}
