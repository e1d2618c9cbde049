use super::scalar::evaluate;
use crate::{Error, Result, Value};

/// Trims every string leaf of a (possibly nested) list in place.
///
/// With `evaluate` set, each trimmed leaf is also replaced by its typed
/// interpretation. Fails with [`Error::InvalidInput`] unless `value` is a list
/// whose elements are strings or further such lists.
pub fn normalize(value: &mut Value, evaluate: bool) -> Result<()> {
    match value {
        Value::List(items) => normalize_items(items, evaluate),
        other => Err(Error::InvalidInput {
            found: other.type_name(),
        }),
    }
}

fn normalize_items(items: &mut [Value], eval: bool) -> Result<()> {
    for item in items.iter_mut() {
        let normalized = match item {
            Value::String(s) if eval => evaluate(s.trim()),
            Value::String(s) => Value::String(s.trim().to_string()),
            Value::List(nested) => {
                normalize_items(nested, eval)?;
                continue;
            }
            other => {
                return Err(Error::InvalidInput {
                    found: other.type_name(),
                })
            }
        };
        *item = normalized;
    }
    Ok(())
}
