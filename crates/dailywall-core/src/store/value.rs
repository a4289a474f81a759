//! Conversion between plain JSON and Firestore's typed value encoding.
//!
//! Firestore REST documents wrap every value in a single-key object naming
//! its type, e.g. `{"integerValue": "20230219"}` or
//! `{"mapValue": {"fields": {...}}}`.

use serde_json::{json, Map, Number, Value};

use crate::error::{PipelineError, PipelineResult};

/// Encode a JSON object as a Firestore `fields` map.
pub fn encode_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), encode(value)))
        .collect()
}

/// Encode one JSON value as a Firestore typed value.
pub fn encode(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                json!({ "integerValue": i.to_string() })
            } else {
                json!({ "doubleValue": n.as_f64().unwrap_or_default() })
            }
        }
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(items) => {
            let values: Vec<Value> = items.iter().map(encode).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

/// Decode a Firestore document body into a plain JSON object.
///
/// Documents without fields decode to an empty object.
pub fn decode_document(document: &Value) -> PipelineResult<Value> {
    match document.get("fields") {
        Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
        Some(other) => Err(malformed(other)),
        None => Ok(Value::Object(Map::new())),
    }
}

fn decode_fields(fields: &Map<String, Value>) -> PipelineResult<Map<String, Value>> {
    fields
        .iter()
        .map(|(key, value)| Ok::<_, PipelineError>((key.clone(), decode(value)?)))
        .collect()
}

/// Decode one Firestore typed value.
pub fn decode(value: &Value) -> PipelineResult<Value> {
    let Some(object) = value.as_object() else {
        return Err(malformed(value));
    };
    let Some((kind, inner)) = object.iter().next() else {
        return Err(malformed(value));
    };

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => Ok(Value::Bool(inner.as_bool().unwrap_or_default())),
        // int64 travels as a decimal string
        "integerValue" => {
            let parsed = match inner {
                Value::String(s) => s.parse::<i64>().ok(),
                Value::Number(n) => n.as_i64(),
                _ => None,
            };
            parsed
                .map(|i| Value::Number(i.into()))
                .ok_or_else(|| malformed(value))
        }
        "doubleValue" => match inner {
            Value::Number(_) => Ok(inner.clone()),
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| malformed(value)),
            _ => Err(malformed(value)),
        },
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => Ok(inner.clone()),
        "geoPointValue" => Ok(inner.clone()),
        "arrayValue" => {
            let values: Vec<Value> = match inner.get("values") {
                Some(Value::Array(items)) => items.iter().map(decode).collect::<PipelineResult<_>>()?,
                _ => Vec::new(),
            };
            Ok(Value::Array(values))
        }
        "mapValue" => match inner.get("fields") {
            Some(Value::Object(fields)) => decode_fields(fields).map(Value::Object),
            _ => Ok(Value::Object(Map::new())),
        },
        _ => Err(malformed(value)),
    }
}

fn malformed(value: &Value) -> PipelineError {
    PipelineError::store(format!("unrecognized Firestore value: {value}"))
}
