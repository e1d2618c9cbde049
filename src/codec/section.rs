use indexmap::IndexMap;

use super::option::{option_shape, OptionShape};
use super::scalar::evaluate;
use crate::error::OptionErrorKind;
use crate::value::quoted;
use crate::{Error, Map, Result, Value};

/// Decodes a single raw option value: sub-options when the text is
/// option-shaped, otherwise the typed scalar.
pub fn decode_entry(raw: &str) -> Value {
    match option_shape(raw) {
        OptionShape::Options(map) => Value::Map(map),
        OptionShape::Scalar => evaluate(raw.trim()),
    }
}

/// Decodes the ordered `(option, raw value)` pairs of one section.
///
/// Every pair yields exactly one entry; order is preserved.
pub fn decode_section<I, K, V>(pairs: I) -> Map
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: AsRef<str>,
{
    pairs
        .into_iter()
        .map(|(key, raw)| (key.into(), decode_entry(raw.as_ref())))
        .collect()
}

/// Decodes a section given as a runtime value.
///
/// Accepts a list of `[option, raw]` string pairs or a map of raw strings
/// (the output of [`flatten_section`]).
pub fn decode_section_value(section: &Value) -> Result<Map> {
    match section {
        Value::Map(map) => map
            .iter()
            .map(|(key, raw)| Ok((key.clone(), decode_entry(raw_str(raw)?))))
            .collect(),
        Value::List(items) => items
            .iter()
            .map(|item| match item.as_list() {
                Some([Value::String(key), raw]) => Ok((key.clone(), decode_entry(raw_str(raw)?))),
                _ => Err(Error::InvalidSectionType {
                    found: item.type_name(),
                }),
            })
            .collect(),
        other => Err(Error::InvalidSectionType {
            found: other.type_name(),
        }),
    }
}

fn raw_str(raw: &Value) -> Result<&str> {
    raw.as_str().ok_or_else(|| Error::InvalidConfigOption {
        raw: raw.to_string(),
        kind: OptionErrorKind::WrongType {
            found: raw.type_name(),
        },
    })
}

/// Renders each entry of a decoded section back into its raw option string.
///
/// ```
/// use ini_nest::{codec::{decode_section, flatten_section}, Map, Value};
///
/// let mut profile = Map::new();
/// profile.insert("name".into(), "Luna".into());
/// let mut section = Map::new();
/// section.insert("profile".into(), Value::Map(profile));
/// section.insert("Users".into(), 5.into());
///
/// let flat = flatten_section(&section);
/// assert_eq!(flat["profile"], "\nname: Luna");
/// assert_eq!(flat["Users"], "5");
/// assert_eq!(decode_section(&flat), section);
/// ```
pub fn flatten_section(section: &Map) -> IndexMap<String, String> {
    section
        .iter()
        .map(|(key, value)| (key.clone(), flatten_value(value)))
        .collect()
}

/// Renders one decoded value as a raw option string.
///
/// Maps become `key: value` lines after a leading newline; an empty map is
/// written as the literal `{}`. Strings whose bare text would read back as
/// something else are written as quoted literals.
pub fn flatten_value(value: &Value) -> String {
    match value {
        Value::Map(map) if map.is_empty() => "{}".to_string(),
        Value::Map(map) => map
            .iter()
            .map(|(key, value)| format!("\n{key}: {}", scalar_text(value)))
            .collect(),
        other => scalar_text(other),
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) if needs_quotes(s) => quoted(s),
        other => other.to_string(),
    }
}

/// True when `s` written bare would not decode back to the same string.
fn needs_quotes(s: &str) -> bool {
    s.trim() != s
        || s.contains(['\n', '\r'])
        || !matches!(evaluate(s), Value::String(ref back) if back == s)
}
