pub mod expect;
pub mod outcome;
pub mod shape;

use serde_json::Value;

use shape::Shape;

/// Why a probe did not meet its expectation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {actual} (expected {expected})")]
    UnexpectedStatus { expected: u16, actual: u16 },

    #[error("response body is not JSON")]
    NotJson,

    #[error("expected a JSON {expected}, got {actual}")]
    WrongType {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{context}: missing fields {missing:?} (expected: {expected:?}, present: {present:?})")]
    MissingFields {
        context: String,
        expected: Vec<String>,
        missing: Vec<String>,
        present: Vec<String>,
    },

    #[error("field {field:?} is {actual}, expected {expected}")]
    FieldMismatch {
        field: String,
        expected: Value,
        actual: Value,
    },

    #[error("field {field:?} is {actual}, expected {expected}")]
    FieldType {
        field: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("{path}: status changed between probes ({first:?} then {second:?})")]
    StatusDrift {
        path: String,
        first: Option<u16>,
        second: Option<u16>,
    },

    #[error("{path}: body shape changed between probes ({first} then {second})")]
    ShapeDrift {
        path: String,
        first: Shape,
        second: Shape,
    },
}
