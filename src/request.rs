//! Turning a raw `/bfhl` body into exactly one typed operation.
//!
//! Parsing checks key cardinality, the operation name, and the input shape
//! of that operation, in that order. Nothing is computed here.

use serde_json::{Map, Value};
use std::fmt;

use crate::error::BfhlError;
use crate::operations::fibonacci;

/// The closed set of operations `/bfhl` understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Fibonacci,
    Prime,
    Lcm,
    Hcf,
    Ai,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::Fibonacci,
        Operation::Prime,
        Operation::Lcm,
        Operation::Hcf,
        Operation::Ai,
    ];

    /// The body key that selects this operation. Case-sensitive.
    pub fn key(self) -> &'static str {
        match self {
            Operation::Fibonacci => "fibonacci",
            Operation::Prime => "prime",
            Operation::Lcm => "lcm",
            Operation::Hcf => "hcf",
            Operation::Ai => "AI",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.key() == key)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A validated request. Array payloads are kept as raw values because
/// their elements are checked by the operation itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Fibonacci(u64),
    Prime(Vec<Value>),
    /// Guaranteed non-empty.
    Lcm(Vec<Value>),
    /// Guaranteed non-empty.
    Hcf(Vec<Value>),
    /// The question as sent, guaranteed non-blank.
    Ai(String),
}

impl Request {
    /// Parse a raw body. An empty body counts as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, BfhlError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Self::from_object(Map::new());
        }
        let value: Value =
            serde_json::from_slice(body).map_err(|_| BfhlError::InvalidRequestShape)?;
        Self::from_value(value)
    }

    /// Parse an already-decoded body. Anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, BfhlError> {
        match value {
            Value::Object(map) => Self::from_object(map),
            _ => Err(BfhlError::InvalidRequestShape),
        }
    }

    fn from_object(map: Map<String, Value>) -> Result<Self, BfhlError> {
        if map.len() != 1 {
            return Err(BfhlError::InvalidRequestShape);
        }
        let Some((key, input)) = map.into_iter().next() else {
            return Err(BfhlError::InvalidRequestShape);
        };
        let operation =
            Operation::from_key(&key).ok_or(BfhlError::UnsupportedOperation(key))?;

        match operation {
            Operation::Fibonacci => fibonacci::parse_count(&input)
                .map(Request::Fibonacci)
                .ok_or_else(|| BfhlError::invalid_input("Invalid fibonacci input")),
            Operation::Prime => match input {
                Value::Array(values) => Ok(Request::Prime(values)),
                _ => Err(BfhlError::invalid_input("Prime input must be an array")),
            },
            Operation::Lcm => match input {
                Value::Array(values) if !values.is_empty() => Ok(Request::Lcm(values)),
                _ => Err(BfhlError::invalid_input("LCM input must be non empty")),
            },
            Operation::Hcf => match input {
                Value::Array(values) if !values.is_empty() => Ok(Request::Hcf(values)),
                _ => Err(BfhlError::invalid_input("HCF input must be non empty array")),
            },
            Operation::Ai => match input {
                Value::String(question) if !question.trim().is_empty() => {
                    Ok(Request::Ai(question))
                }
                _ => Err(BfhlError::invalid_input("AI input must be a string")),
            },
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            Request::Fibonacci(_) => Operation::Fibonacci,
            Request::Prime(_) => Operation::Prime,
            Request::Lcm(_) => Operation::Lcm,
            Request::Hcf(_) => Operation::Hcf,
            Request::Ai(_) => Operation::Ai,
        }
    }
}
