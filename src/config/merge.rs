use serde_json::{Map, Value};

/// Merges `overrides` onto `base`, returning a new map.
///
/// Objects present on both sides are merged recursively. Any other override
/// value (scalar, array, or an object replacing a non-object) replaces the
/// base value wholesale; arrays are never concatenated. `null` overrides are
/// skipped and the base value is kept. Neither input is modified.
pub fn deep_merge(base: &Map<String, Value>, overrides: &Map<String, Value>) -> Map<String, Value> {
    let mut merged = base.clone();

    for (key, value) in overrides {
        let replacement = match (merged.get(key), value) {
            (_, Value::Null) => continue,
            (Some(Value::Object(base_obj)), Value::Object(overlay_obj)) => {
                Value::Object(deep_merge(base_obj, overlay_obj))
            }
            (_, value) => value.clone(),
        };
        merged.insert(key.clone(), replacement);
    }

    merged
}
