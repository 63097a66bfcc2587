//! The five computations behind `/bfhl`.
//!
//! Everything here is a pure function of already-validated input, except
//! [`ai::ask`], which suspends on one [`Oracle`](crate::oracle::Oracle) call.

pub mod ai;
pub mod fibonacci;
pub mod prime;
pub mod reduce;

use serde::Serialize;
use serde_json::Value;

/// What a successful operation produces. Serializes as the bare value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Outcome {
    Sequence(Vec<u64>),
    Number(u64),
    Word(String),
}

/// Floats at or above 2^64 are never treated as exact integers.
const FLOAT_INTEGER_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Read a JSON value as an integer.
///
/// Accepts JSON integers and floats with no fractional part (`5.0`), the
/// way a JSON number is an integer regardless of how it was written.
/// Returns `None` for non-numbers, fractions, and non-finite or oversized
/// floats.
pub fn as_integer(value: &Value) -> Option<i128> {
    if let Some(n) = value.as_i64() {
        return Some(i128::from(n));
    }
    if let Some(n) = value.as_u64() {
        return Some(i128::from(n));
    }
    let f = value.as_f64()?;
    (f.is_finite() && f.fract() == 0.0 && f.abs() < FLOAT_INTEGER_LIMIT).then_some(f as i128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_are_integers() {
        assert_eq!(as_integer(&json!(0)), Some(0));
        assert_eq!(as_integer(&json!(-7)), Some(-7));
        assert_eq!(as_integer(&json!(u64::MAX)), Some(i128::from(u64::MAX)));
    }

    #[test]
    fn integral_floats_are_integers() {
        assert_eq!(as_integer(&json!(5.0)), Some(5));
        assert_eq!(as_integer(&json!(-3.0)), Some(-3));
    }

    #[test]
    fn everything_else_is_not() {
        assert_eq!(as_integer(&json!(1.5)), None);
        assert_eq!(as_integer(&json!("3")), None);
        assert_eq!(as_integer(&json!(true)), None);
        assert_eq!(as_integer(&json!(null)), None);
        assert_eq!(as_integer(&json!([1])), None);
        assert_eq!(as_integer(&json!(1e30)), None);
    }

    #[test]
    fn outcome_serializes_bare() {
        assert_eq!(
            serde_json::to_value(Outcome::Sequence(vec![0, 1, 1])).unwrap(),
            json!([0, 1, 1])
        );
        assert_eq!(serde_json::to_value(Outcome::Number(12)).unwrap(), json!(12));
        assert_eq!(
            serde_json::to_value(Outcome::Word("Paris".into())).unwrap(),
            json!("Paris")
        );
    }
}
