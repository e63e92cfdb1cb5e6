use serde_json::Value;

/// Wrapper keys probed, in order, when a payload is not a bare array
pub const WRAPPER_KEYS: &[&str] = &["data", "items", "results", "pairs", "pools", "records"];

/// Find the raw pool records inside an arbitrary payload.
///
/// A bare array is returned as-is. Objects are searched through
/// [`WRAPPER_KEYS`], recursing into each, and the first non-empty result
/// wins. Scalars yield nothing.
pub fn locate(payload: &Value) -> &[Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => WRAPPER_KEYS
            .iter()
            .filter_map(|key| map.get(*key))
            .map(locate)
            .find(|records| !records.is_empty())
            .unwrap_or(&[]),
        _ => &[],
    }
}
