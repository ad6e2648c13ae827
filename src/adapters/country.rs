use crate::domain::ports::CountryLookup;
use celes::Country;

/// ISO 3166-1 table backed by the `celes` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct CelesCountryLookup;

impl CelesCountryLookup {
    pub fn new() -> Self {
        Self
    }
}

// Entries whose formal name does not reduce to the ISO short name, by alpha-2.
const SHORT_NAMES: &[(&str, &str)] = &[
    ("US", "United States"),
    ("GB", "United Kingdom"),
    ("KR", "Korea, Republic of"),
    ("KP", "Korea, Democratic People's Republic of"),
    ("IR", "Iran, Islamic Republic of"),
    ("VE", "Venezuela, Bolivarian Republic of"),
    ("TZ", "Tanzania, United Republic of"),
    ("MD", "Moldova, Republic of"),
    ("LA", "Lao People's Democratic Republic"),
    ("FM", "Micronesia, Federated States of"),
    ("PS", "Palestine, State of"),
    ("TW", "Taiwan, Province of China"),
    ("MK", "North Macedonia"),
    ("CD", "Congo, The Democratic Republic of the"),
    ("CI", "Côte d'Ivoire"),
    ("VA", "Holy See (Vatican City State)"),
    ("SH", "Saint Helena, Ascension and Tristan da Cunha"),
    ("TL", "Timor-Leste"),
];

/// `celes` stores formal names in title case ("The Republic Of Moldova").
/// Uses the correction table when it has the code, otherwise drops the
/// leading article and lowercases inner connectives.
fn short_name(country: &Country) -> String {
    if let Some((_, name)) = SHORT_NAMES
        .iter()
        .find(|(alpha2, _)| alpha2.eq_ignore_ascii_case(country.alpha2))
    {
        return name.to_string();
    }
    shorten_formal_name(country.long_name)
}

fn shorten_formal_name(long_name: &str) -> String {
    let name = long_name.strip_prefix("The ").unwrap_or(long_name);

    name.split(' ')
        .enumerate()
        .map(|(i, word)| match word {
            "And" | "Of" | "The" | "Da" if i > 0 => word.to_ascii_lowercase(),
            _ => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl CountryLookup for CelesCountryLookup {
    fn by_alpha2(&self, code: &str) -> Option<String> {
        Country::from_alpha2(code).ok().map(|country| short_name(&country))
    }

    fn by_alpha3(&self, code: &str) -> Option<String> {
        Country::from_alpha3(code).ok().map(|country| short_name(&country))
    }
}
