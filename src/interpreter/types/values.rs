//! Runtime value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Runtime value produced by evaluating an expression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Value {
    Number(f32),
    Point(f32, f32),
    Range(f32, f32),
}

/// Static type of an expression, as computed by the type checker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Number,
    Point,
    Range,
}

impl Value {
    /// The static type this value inhabits
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Number(_) => ValueType::Number,
            Value::Point(..) => ValueType::Point,
            Value::Range(..) => ValueType::Range,
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<(f32, f32)> {
        match self {
            Value::Point(x, y) => Some((*x, *y)),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Point(x, y) => write!(f, "({}, {})", x, y),
            Value::Range(start, end) => write!(f, "[{}, {}]", start, end),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Number => "Number",
            ValueType::Point => "Point",
            ValueType::Range => "Range",
        };
        f.write_str(name)
    }
}
