use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A normalized municipality identifier.
///
/// Keys are normalized on construction: lowercased, Scandinavian characters
/// folded (ä/å → a, ö → o) and every remaining non-ASCII-alphanumeric
/// character stripped. `"Jyväskylä"`, `"JYVASKYLA"` and `"jyvaskyla"` all
/// produce the same key, so lookups are case and diacritic insensitive.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MunicipalityKey(String);

impl MunicipalityKey {
    /// Creates a key from a raw municipality name or slug.
    ///
    /// Normalization is idempotent: applying it to an already-normalized
    /// key returns the same key.
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .to_lowercase()
            .chars()
            .filter_map(|c| match c {
                'ä' | 'å' => Some('a'),
                'ö' => Some('o'),
                c if c.is_ascii_alphanumeric() => Some(c),
                _ => None,
            })
            .collect();
        Self(normalized)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Proper display name for the known Finnish municipalities.
    ///
    /// Unknown keys fall back to the key with its first letter capitalized.
    pub fn display_name(&self) -> String {
        let name = match self.0.as_str() {
            "helsinki" => "Helsinki",
            "espoo" => "Espoo",
            "vantaa" => "Vantaa",
            "tampere" => "Tampere",
            "turku" => "Turku",
            "oulu" => "Oulu",
            "jyvaskyla" => "Jyväskylä",
            "lahti" => "Lahti",
            "kuopio" => "Kuopio",
            "pori" => "Pori",
            "kouvola" => "Kouvola",
            "joensuu" => "Joensuu",
            "lappeenranta" => "Lappeenranta",
            "vaasa" => "Vaasa",
            "hameenlinna" => "Hämeenlinna",
            "seinajoki" => "Seinäjoki",
            "rovaniemi" => "Rovaniemi",
            "mikkeli" => "Mikkeli",
            "kotka" => "Kotka",
            "salo" => "Salo",
            _ => "",
        };
        if !name.is_empty() {
            return name.to_string();
        }
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for MunicipalityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-municipality flat tax rates, as fractions.
///
/// The church rate is optional: most entries in the published data carry
/// only the municipal income tax rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MunicipalRate {
    pub rate: Decimal,
    #[serde(default)]
    pub church_rate: Option<Decimal>,
}
