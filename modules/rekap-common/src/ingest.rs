//! Boundary decoding of raw upstream payloads into record collections.
//!
//! The pipeline itself never errors on record shape; the only hard failure
//! is a payload that is not JSON at all. Everything else degrades to an
//! empty collection.

use serde_json::Value;

use crate::error::RekapError;

/// Decode a raw response body into a flat record collection.
///
/// Accepted shapes: a JSON array, `null` (empty), or an envelope object
/// whose `data` / `records` / `items` field holds the array. Any other
/// valid JSON decodes to an empty collection; invalid JSON is the one
/// error this library surfaces.
pub fn decode_records(payload: &str) -> Result<Vec<Value>, RekapError> {
    let value: Value = serde_json::from_str(payload)?;
    Ok(unwrap_records(value))
}

fn unwrap_records(value: Value) -> Vec<Value> {
    match value {
        Value::Array(records) => records,
        Value::Object(mut envelope) => {
            for field in ["data", "records", "items"] {
                if let Some(Value::Array(records)) = envelope.remove(field) {
                    return records;
                }
            }
            Vec::new()
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_array_decodes_as_is() {
        let records = decode_records(r#"[{"a":1},{"b":2}]"#).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], json!({"a": 1}));
    }

    #[test]
    fn null_and_scalars_decode_to_empty() {
        assert!(decode_records("null").unwrap().is_empty());
        assert!(decode_records("42").unwrap().is_empty());
        assert!(decode_records("\"ok\"").unwrap().is_empty());
    }

    #[test]
    fn data_envelope_is_unwrapped() {
        let records = decode_records(r#"{"status":"ok","data":[{"a":1}]}"#).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn envelope_without_array_decodes_to_empty() {
        assert!(decode_records(r#"{"data":"none"}"#).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        assert!(decode_records("{not json").is_err());
    }
}
