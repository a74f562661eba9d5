//! Decimal parsing for the rate fields of both datasets.
//!
//! The Paris records API serves rates as plain decimals ("25.3" or 25.3), the Est
//! Ensemble snapshot as French decimal-comma strings ("16,9").

use serde::{Deserialize, Deserializer, de};

/// Parses `"16,9"`, `"16.9"` or `" 16 "` into a float.
///
/// Returns `None` for empty or non-numeric input.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.replacen(',', ".", 1).parse::<f64>().ok().filter(|v| v.is_finite())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(de::IgnoredAny),
}

/// Serde adapter for rate fields.
///
/// A JSON number or a decimal string gives `Some`. Null, unreadable text and any
/// other JSON value give `None`, so one bad record never fails a whole page.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(v) => Some(v).filter(|v| v.is_finite()),
        NumberOrText::Text(s) => parse_decimal(&s),
        NumberOrText::Other(_) => None,
    })
}

/// Serde adapter accepting a JSON string or number and keeping it as text.
///
/// Used for echo fields (`piece`, `annee`) that the upstream API types loosely.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Int(i64),
        Float(f64),
        Text(String),
    }

    Ok(match Loose::deserialize(deserializer)? {
        Loose::Int(v) => v.to_string(),
        Loose::Float(v) => v.to_string(),
        Loose::Text(s) => s,
    })
}
