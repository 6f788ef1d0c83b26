use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

/// Structural signature of a JSON value: types and keys, no values.
/// Arrays are described by their first element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Null,
    Bool,
    Number,
    String,
    Array(Option<Box<Shape>>),
    Object(BTreeMap<String, Shape>),
}

pub fn shape_of(value: &Value) -> Shape {
    match value {
        Value::Null => Shape::Null,
        Value::Bool(_) => Shape::Bool,
        Value::Number(_) => Shape::Number,
        Value::String(_) => Shape::String,
        Value::Array(items) => Shape::Array(items.first().map(|v| Box::new(shape_of(v)))),
        Value::Object(map) => Shape::Object(
            map.iter()
                .map(|(key, value)| (key.clone(), shape_of(value)))
                .collect(),
        ),
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Null => f.write_str("null"),
            Shape::Bool => f.write_str("boolean"),
            Shape::Number => f.write_str("number"),
            Shape::String => f.write_str("string"),
            Shape::Array(None) => f.write_str("[]"),
            Shape::Array(Some(item)) => write!(f, "[{item}]"),
            Shape::Object(fields) => {
                f.write_str("{")?;
                for (i, (key, shape)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {shape}")?;
                }
                f.write_str("}")
            }
        }
    }
}
