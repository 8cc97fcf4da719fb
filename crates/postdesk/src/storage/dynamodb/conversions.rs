//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and JSON records.
//! These are testable in isolation without DynamoDB access.

use std::collections::{BTreeMap, HashMap};

use aws_sdk_dynamodb::types::AttributeValue;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use postdesk_core::post::Record;
use postdesk_core::storage::StoreError;
use serde_json::{Number, Value};

// ============================================================================
// JSON -> DynamoDB
// ============================================================================

/// Convert a JSON value to a DynamoDB attribute.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::String(s) => AttributeValue::S(s.clone()),
        Value::Number(n) => AttributeValue::N(n.to_string()),
        Value::Bool(b) => AttributeValue::Bool(*b),
        Value::Null => AttributeValue::Null(true),
        Value::Array(items) => AttributeValue::L(items.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(record_to_item(map)),
    }
}

/// Convert a record to a DynamoDB item.
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    record
        .iter()
        .map(|(name, value)| (name.clone(), value_to_attribute(value)))
        .collect()
}

// ============================================================================
// DynamoDB -> JSON
// ============================================================================

/// Convert a DynamoDB attribute to a JSON value.
///
/// Binary values are returned as base64 strings, sets as arrays.
pub fn attribute_to_value(attribute: &AttributeValue) -> Result<Value, StoreError> {
    let value = match attribute {
        AttributeValue::S(s) => Value::String(s.clone()),
        AttributeValue::N(n) => Value::Number(parse_number(n)?),
        AttributeValue::Bool(b) => Value::Bool(*b),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::B(blob) => Value::String(STANDARD.encode(blob.as_ref())),
        AttributeValue::L(items) => Value::Array(
            items
                .iter()
                .map(attribute_to_value)
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::M(map) => Value::Object(item_to_record(map)?),
        AttributeValue::Ss(strings) => {
            Value::Array(strings.iter().cloned().map(Value::String).collect())
        }
        AttributeValue::Ns(numbers) => Value::Array(
            numbers
                .iter()
                .map(|n| parse_number(n).map(Value::Number))
                .collect::<Result<_, _>>()?,
        ),
        AttributeValue::Bs(blobs) => Value::Array(
            blobs
                .iter()
                .map(|blob| Value::String(STANDARD.encode(blob.as_ref())))
                .collect(),
        ),
        other => {
            return Err(StoreError::InvalidData(format!(
                "Unsupported attribute type: {:?}",
                other
            )))
        }
    };

    Ok(value)
}

/// Convert a DynamoDB item to a record.
///
/// DynamoDB does not preserve attribute order, so fields are sorted by name.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, StoreError> {
    let sorted: BTreeMap<&String, &AttributeValue> = item.iter().collect();
    sorted
        .into_iter()
        .map(|(name, attribute)| Ok((name.clone(), attribute_to_value(attribute)?)))
        .collect()
}

// ============================================================================
// Helper functions
// ============================================================================

/// Parse a DynamoDB number string.
fn parse_number(raw: &str) -> Result<Number, StoreError> {
    raw.parse::<Number>()
        .map_err(|e| StoreError::InvalidData(format!("Invalid number {}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::primitives::Blob;
    use serde_json::json;

    fn sample_record() -> Record {
        let value = json!({
            "postId": "p1",
            "title": "Hello",
            "likes": 3,
            "rating": 4.5,
            "published": true,
            "deletedAt": null,
            "tags": ["rust", 1],
            "author": {"name": "Ada", "verified": false}
        });
        match value {
            Value::Object(record) => record,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_record_round_trip() {
        let record = sample_record();
        let item = record_to_item(&record);
        let parsed = item_to_record(&item).unwrap();

        assert_eq!(Value::Object(record), Value::Object(parsed));
    }

    #[test]
    fn test_item_has_typed_attributes() {
        let item = record_to_item(&sample_record());

        assert_eq!(item.get("postId").unwrap().as_s().unwrap(), "p1");
        assert_eq!(item.get("likes").unwrap().as_n().unwrap(), "3");
        assert_eq!(item.get("rating").unwrap().as_n().unwrap(), "4.5");
        assert!(*item.get("published").unwrap().as_bool().unwrap());
        assert!(item.get("deletedAt").unwrap().is_null());
        assert_eq!(item.get("tags").unwrap().as_l().unwrap().len(), 2);
        assert!(item.get("author").unwrap().as_m().unwrap().contains_key("name"));
    }

    #[test]
    fn test_item_to_record_sorts_fields() {
        let mut item = HashMap::new();
        item.insert("zeta".to_string(), AttributeValue::S("z".to_string()));
        item.insert("alpha".to_string(), AttributeValue::S("a".to_string()));
        item.insert("postId".to_string(), AttributeValue::S("p1".to_string()));

        let record = item_to_record(&item).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();

        assert_eq!(keys, vec!["alpha", "postId", "zeta"]);
    }

    #[test]
    fn test_sets_become_arrays() {
        let ss = AttributeValue::Ss(vec!["a".to_string(), "b".to_string()]);
        let ns = AttributeValue::Ns(vec!["1".to_string(), "2.5".to_string()]);

        assert_eq!(attribute_to_value(&ss).unwrap(), json!(["a", "b"]));
        assert_eq!(attribute_to_value(&ns).unwrap(), json!([1, 2.5]));
    }

    #[test]
    fn test_binary_becomes_base64() {
        let b = AttributeValue::B(Blob::new(b"hello".to_vec()));
        let bs = AttributeValue::Bs(vec![Blob::new(b"hi".to_vec())]);

        assert_eq!(attribute_to_value(&b).unwrap(), json!("aGVsbG8="));
        assert_eq!(attribute_to_value(&bs).unwrap(), json!(["aGk="]));
    }

    #[test]
    fn test_invalid_number() {
        let n = AttributeValue::N("not-a-number".to_string());
        assert!(matches!(
            attribute_to_value(&n),
            Err(StoreError::InvalidData(_))
        ));
    }

    #[test]
    fn test_whole_float_is_sent_verbatim() {
        // DynamoDB stores "1.0" as 1, so it reads back as an integer.
        assert_eq!(value_to_attribute(&json!(1.0)).as_n().unwrap(), "1.0");
        assert_eq!(
            attribute_to_value(&AttributeValue::N("1".to_string())).unwrap(),
            json!(1)
        );
    }
}
