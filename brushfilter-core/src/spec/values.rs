/*
 * BrushFilter
 * Copyright (C) 2024 BrushFilter Contributors
 *
 * This program is distributed under multiple licenses.
 * Please consult the license documentation provided alongside
 * this program the details of the active license.
 */
use serde_json::{Map, Value};

/// JavaScript-style truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|v| v != 0.0 && !v.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Recursively merge `source` into `target`.
///
/// Objects merge key by key, creating an empty object in `target` when the
/// existing value is not an object. Arrays and scalars replace the target
/// value outright.
pub fn deep_mix(target: &mut Value, source: &Value) {
    match source {
        Value::Object(source_map) => {
            if !target.is_object() {
                *target = Value::Object(Map::new());
            }
            if let Value::Object(target_map) = target {
                for (key, value) in source_map {
                    match value {
                        Value::Object(_) => {
                            let entry = target_map
                                .entry(key.clone())
                                .or_insert_with(|| Value::Object(Map::new()));
                            deep_mix(entry, value);
                        }
                        _ => {
                            target_map.insert(key.clone(), value.clone());
                        }
                    }
                }
            }
        }
        _ => *target = source.clone(),
    }
}
