//! Post records and their typed attribute form.
//!
//! A record is an open-ended JSON object. The only field the system cares
//! about is [`POST_ID`], the identity key of the table.

use serde_json::{Map, Value};

use super::RequestError;

/// Name of the identity key field.
pub const POST_ID: &str = "postId";

/// An untyped post record. Field order follows the order the fields were
/// received in.
pub type Record = Map<String, Value>;

/// Parse a request body into a record.
///
/// An empty body and the JSON literal `null` both yield an empty record.
pub fn parse_record_body(body: &[u8]) -> Result<Record, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Record::new());
    }

    match serde_json::from_slice::<Value>(body)? {
        Value::Object(record) => Ok(record),
        Value::Null => Ok(Record::new()),
        _ => Err(RequestError::BodyNotObject),
    }
}

/// Extract the identity key of a record.
pub fn record_key(record: &Record) -> Result<&str, RequestError> {
    match record.get(POST_ID) {
        None => Err(RequestError::MissingKey(POST_ID)),
        Some(Value::String(key)) if key.is_empty() => Err(RequestError::InvalidKey {
            field: POST_ID,
            reason: "must not be empty",
        }),
        Some(Value::String(key)) => Ok(key),
        Some(_) => Err(RequestError::InvalidKey {
            field: POST_ID,
            reason: "must be a string",
        }),
    }
}

/// Convert a JSON value to its typed attribute form.
///
/// Strings become `{"S": ..}`, numbers `{"N": ".."}`, booleans `{"BOOL": ..}`,
/// null `{"NULL": true}`, objects `{"M": {..}}` and arrays `{"L": [..]}`.
pub fn to_attribute_json(value: &Value) -> Value {
    let mut typed = Map::with_capacity(1);
    match value {
        Value::String(s) => typed.insert("S".to_string(), Value::String(s.clone())),
        Value::Number(n) => typed.insert("N".to_string(), Value::String(n.to_string())),
        Value::Bool(b) => typed.insert("BOOL".to_string(), Value::Bool(*b)),
        Value::Null => typed.insert("NULL".to_string(), Value::Bool(true)),
        Value::Object(map) => typed.insert("M".to_string(), record_to_attribute_json(map)),
        Value::Array(items) => typed.insert(
            "L".to_string(),
            Value::Array(items.iter().map(to_attribute_json).collect()),
        ),
    };
    Value::Object(typed)
}

/// Convert every field of a record to its typed attribute form.
pub fn record_to_attribute_json(record: &Record) -> Value {
    Value::Object(
        record
            .iter()
            .map(|(name, value)| (name.clone(), to_attribute_json(value)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_empty_body_is_empty_record() {
        assert_eq!(parse_record_body(b"").unwrap(), Record::new());
        assert_eq!(parse_record_body(b"  \n").unwrap(), Record::new());
    }

    #[test]
    fn test_parse_null_body_is_empty_record() {
        assert_eq!(parse_record_body(b"null").unwrap(), Record::new());
    }

    #[test]
    fn test_parse_object_body_keeps_field_order() {
        let record = parse_record_body(br#"{"zeta": 1, "alpha": "a", "postId": "p1"}"#).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "postId"]);
    }

    #[test]
    fn test_parse_malformed_body_fails() {
        let error = parse_record_body(br#"{"postId": "#).unwrap_err();
        assert!(matches!(error, RequestError::InvalidBody(_)));
    }

    #[test]
    fn test_parse_non_object_body_fails() {
        assert_eq!(
            parse_record_body(b"[1, 2]").unwrap_err(),
            RequestError::BodyNotObject
        );
        assert_eq!(
            parse_record_body(b"\"hello\"").unwrap_err(),
            RequestError::BodyNotObject
        );
    }

    #[test]
    fn test_record_key_present() {
        let record = parse_record_body(br#"{"postId": "p1"}"#).unwrap();
        assert_eq!(record_key(&record).unwrap(), "p1");
    }

    #[test]
    fn test_record_key_missing() {
        let record = parse_record_body(br#"{"title": "Hello"}"#).unwrap();
        assert_eq!(
            record_key(&record).unwrap_err(),
            RequestError::MissingKey(POST_ID)
        );
    }

    #[test]
    fn test_record_key_must_be_non_empty_string() {
        let record = parse_record_body(br#"{"postId": 42}"#).unwrap();
        assert!(matches!(
            record_key(&record),
            Err(RequestError::InvalidKey { .. })
        ));

        let record = parse_record_body(br#"{"postId": ""}"#).unwrap();
        assert!(matches!(
            record_key(&record),
            Err(RequestError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_to_attribute_json_scalars() {
        assert_eq!(to_attribute_json(&json!("x")), json!({"S": "x"}));
        assert_eq!(to_attribute_json(&json!(1)), json!({"N": "1"}));
        assert_eq!(to_attribute_json(&json!(2.5)), json!({"N": "2.5"}));
        assert_eq!(to_attribute_json(&json!(true)), json!({"BOOL": true}));
        assert_eq!(to_attribute_json(&json!(null)), json!({"NULL": true}));
    }

    #[test]
    fn test_record_to_attribute_json_nested() {
        let record = parse_record_body(
            br#"{"postId": "p1", "tags": ["a", 1], "meta": {"draft": false}}"#,
        )
        .unwrap();

        assert_eq!(
            record_to_attribute_json(&record),
            json!({
                "postId": {"S": "p1"},
                "tags": {"L": [{"S": "a"}, {"N": "1"}]},
                "meta": {"M": {"draft": {"BOOL": false}}}
            })
        );
    }
}
