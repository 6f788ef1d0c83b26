use serde_json::{Map, Value};

use super::CheckError;
use crate::http_probe::result::ProbeResult;

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Passes only when a response arrived with exactly `expected` as status.
pub fn expect_status(result: &ProbeResult, expected: u16) -> Result<(), CheckError> {
    if let Some(error) = &result.error {
        return Err(CheckError::Transport(error.clone()));
    }
    match result.status_code {
        Some(actual) if actual == expected => Ok(()),
        Some(actual) => Err(CheckError::UnexpectedStatus { expected, actual }),
        None => Err(CheckError::Transport("no response received".to_string())),
    }
}

pub fn json_body(result: &ProbeResult) -> Result<&Value, CheckError> {
    result.json().ok_or(CheckError::NotJson)
}

pub fn json_object(result: &ProbeResult) -> Result<&Map<String, Value>, CheckError> {
    as_object(json_body(result)?)
}

pub fn json_array(result: &ProbeResult) -> Result<&Vec<Value>, CheckError> {
    match json_body(result)? {
        Value::Array(items) => Ok(items),
        other => Err(CheckError::WrongType {
            expected: "array",
            actual: type_name(other),
        }),
    }
}

pub fn as_object(value: &Value) -> Result<&Map<String, Value>, CheckError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(CheckError::WrongType {
            expected: "object",
            actual: type_name(other),
        }),
    }
}

/// Checks that every name in `fields` is a key of `object`. The error lists
/// both the expected and the present keys.
pub fn expect_fields(
    context: &str,
    object: &Map<String, Value>,
    fields: &[&str],
) -> Result<(), CheckError> {
    let missing: Vec<String> = fields
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(CheckError::MissingFields {
        context: context.to_string(),
        expected: fields.iter().map(|f| f.to_string()).collect(),
        missing,
        present: object.keys().cloned().collect(),
    })
}

pub fn expect_field(
    object: &Map<String, Value>,
    field: &str,
    expected: &Value,
) -> Result<(), CheckError> {
    let actual = object.get(field).cloned().unwrap_or(Value::Null);
    if &actual == expected {
        Ok(())
    } else {
        Err(CheckError::FieldMismatch {
            field: field.to_string(),
            expected: expected.clone(),
            actual,
        })
    }
}

pub fn expect_string_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a str, CheckError> {
    match object.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(CheckError::FieldType {
            field: field.to_string(),
            expected: "string",
            actual: type_name(other),
        }),
        None => Err(CheckError::MissingFields {
            context: "response".to_string(),
            expected: vec![field.to_string()],
            missing: vec![field.to_string()],
            present: object.keys().cloned().collect(),
        }),
    }
}

/// `object[field]` as an array; a missing field or another JSON type fails.
pub fn expect_array_field<'a>(
    object: &'a Map<String, Value>,
    field: &str,
) -> Result<&'a Vec<Value>, CheckError> {
    match object.get(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(CheckError::FieldType {
            field: field.to_string(),
            expected: "array",
            actual: type_name(other),
        }),
        None => Err(CheckError::MissingFields {
            context: "response".to_string(),
            expected: vec![field.to_string()],
            missing: vec![field.to_string()],
            present: object.keys().cloned().collect(),
        }),
    }
}

/// The anonymous-caller contract of every user or admin scoped endpoint:
/// `401` with `{"error": "Unauthorized"}`.
pub fn expect_unauthorized(result: &ProbeResult) -> Result<(), CheckError> {
    expect_status(result, 401)?;
    let body = json_object(result)?;
    expect_field(body, "error", &Value::from("Unauthorized"))
}
