use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Int(i64),
}

/// Accepts either a JSON string or an integer and yields a `String`.
///
/// Token subjects are strings on the wire, but some issuers put the numeric
/// user id there directly.
pub fn deserialize_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match StringOrNumber::deserialize(deserializer)? {
        StringOrNumber::String(s) => Ok(s),
        StringOrNumber::Int(n) => Ok(n.to_string()),
    }
}
