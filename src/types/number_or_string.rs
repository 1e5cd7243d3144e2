use serde::{
    de::{Deserializer, Error},
    Deserialize,
};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

/// Prices and totals are rendered by the server either as JSON numbers or as
/// decimal strings (`"15000.00"`).
pub fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::String(value) if value.trim().is_empty() => Ok(0.0),
        NumberOrString::String(value) => value.trim().parse::<f64>().map_err(D::Error::custom),
    }
}

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrInteger {
        String(String),
        Integer(i64),
        Number(f64),
    }

    Ok(match StringOrInteger::deserialize(deserializer)? {
        StringOrInteger::String(value) => value,
        StringOrInteger::Integer(value) => value.to_string(),
        StringOrInteger::Number(value) => value.to_string(),
    })
}
