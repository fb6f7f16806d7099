use serde::Serialize;
use serde_json::Value;

/// Round-trips a value through JSON so callers only ever see plain data.
pub fn to_plain<T: Serialize>(value: &T) -> Result<Value, serde_json::Error> {
    let text = serde_json::to_string(value)?;
    serde_json::from_str(&text)
}
