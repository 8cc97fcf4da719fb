//! `SET` update expressions built from a partial record.
//!
//! Field names never appear in the expression itself. Each field gets a
//! positional `#keyN` name placeholder and `:valueN` value placeholder, so
//! reserved words and unusual characters are accepted as field names.

use serde_json::Value;

use super::{Record, RequestError};

/// A whole-value `SET` update with its placeholder mappings.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    /// The expression text, e.g. `SET #key0 = :value0, #key1 = :value1`.
    pub expression: String,
    /// `(placeholder, field name)` pairs, in body order.
    pub names: Vec<(String, String)>,
    /// `(placeholder, new value)` pairs, in body order.
    pub values: Vec<(String, Value)>,
}

impl UpdateExpression {
    /// Iterate over the `(field name, new value)` assignments.
    pub fn assignments(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names
            .iter()
            .zip(self.values.iter())
            .map(|((_, field), (_, value))| (field.as_str(), value))
    }
}

/// Build a `SET` expression assigning every top-level field of `fields`.
pub fn build_set_expression(fields: &Record) -> Result<UpdateExpression, RequestError> {
    if fields.is_empty() {
        return Err(RequestError::EmptyUpdate);
    }

    let mut clauses = Vec::with_capacity(fields.len());
    let mut names = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for (index, (field, value)) in fields.iter().enumerate() {
        let name_placeholder = format!("#key{index}");
        let value_placeholder = format!(":value{index}");

        clauses.push(format!("{name_placeholder} = {value_placeholder}"));
        names.push((name_placeholder, field.clone()));
        values.push((value_placeholder, value.clone()));
    }

    Ok(UpdateExpression {
        expression: format!("SET {}", clauses.join(", ")),
        names,
        values,
    })
}
