//! Lenient parameter parsing.
//!
//! Hosts send numbers either as JSON numbers or as numeric strings, and
//! ids either as numbers or strings. Blank strings count as absent.

use serde::{Deserialize, Deserializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Bool(bool),
    Int(u64),
    Float(f64),
    Text(String),
}

/// `Option<u32>` from a number, a numeric string, blank or null.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Loose>::deserialize(deserializer)?;
    let number = match value {
        None => return Ok(None),
        Some(Loose::Int(n)) => n,
        Some(Loose::Float(f)) if f.fract() == 0.0 && f >= 0.0 => f as u64,
        Some(Loose::Text(text)) if text.trim().is_empty() => return Ok(None),
        Some(Loose::Text(text)) => text
            .trim()
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("expected a non-negative integer, got {text:?}")))?,
        Some(_) => return Err(de::Error::custom("expected a non-negative integer")),
    };
    u32::try_from(number)
        .map(Some)
        .map_err(|_| de::Error::custom(format!("{number} is out of range")))
}

/// `Option<String>` from a string or a number.
pub fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Text(text)) => Ok(Some(text)),
        Some(Loose::Int(n)) => Ok(Some(n.to_string())),
        Some(Loose::Float(f)) => Ok(Some(f.to_string())),
        Some(Loose::Bool(b)) => Ok(Some(b.to_string())),
    }
}

/// `Option<bool>` from a bool or `"true"` / `"false"`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Loose>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Loose::Bool(b)) => Ok(Some(b)),
        Some(Loose::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "true" | "1" | "yes" => Ok(Some(true)),
            "false" | "0" | "no" => Ok(Some(false)),
            other => Err(de::Error::custom(format!("expected a boolean, got {other:?}"))),
        },
        Some(Loose::Int(n)) => Ok(Some(n != 0)),
        Some(Loose::Float(_)) => Err(de::Error::custom("expected a boolean")),
    }
}

/// Trimmed, non-blank string parameter.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
