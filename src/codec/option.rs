use super::scalar::evaluate;
use crate::error::OptionErrorKind;
use crate::{Error, Map, Result, Value};

/// Outcome of reading a raw value as `key: value` lines.
#[derive(Debug, Clone, PartialEq)]
pub enum OptionShape {
    /// Every non-blank line split into a key and a typed value.
    Options(Map),
    /// The text is not option-shaped and should be read as a single scalar.
    Scalar,
}

/// Classifies `raw` as option-shaped text or a plain scalar.
///
/// Only the first colon of a line separates key from value. Blank lines are
/// skipped; any other line without a colon makes the whole value a scalar.
pub fn option_shape(raw: &str) -> OptionShape {
    let mut options = Map::new();
    for line in raw.trim().lines() {
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return OptionShape::Scalar;
        };
        options.insert(key.trim().to_string(), evaluate(value.trim()));
    }

    if options.is_empty() {
        OptionShape::Scalar
    } else {
        OptionShape::Options(options)
    }
}

/// Decodes a multi-line option value into a map of sub-options.
///
/// ```
/// use ini_nest::{codec::decode_option, Value};
///
/// let map = decode_option("\nclownfish: 2\nchalk_goby:1").unwrap();
/// assert_eq!(map["clownfish"], Value::Int(2));
/// assert_eq!(map["chalk_goby"], Value::Int(1));
/// ```
pub fn decode_option(raw: &str) -> Result<Map> {
    match option_shape(raw) {
        OptionShape::Options(map) => Ok(map),
        OptionShape::Scalar => Err(Error::malformed_option(raw)),
    }
}

/// Like [`decode_option`], for a value whose type is only known at runtime.
/// Anything but a string is rejected.
pub fn decode_option_value(value: &Value) -> Result<Map> {
    match value {
        Value::String(raw) => decode_option(raw),
        other => Err(Error::InvalidConfigOption {
            raw: other.to_string(),
            kind: OptionErrorKind::WrongType {
                found: other.type_name(),
            },
        }),
    }
}
