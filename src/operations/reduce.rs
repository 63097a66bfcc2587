//! LCM and HCF folds.
//!
//! Each fold step returns a `Result`, so a bad element stops the reduction
//! where it is found instead of unwinding to the caller.

use serde_json::Value;
use thiserror::Error;

use super::as_integer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReductionError {
    #[error("nothing to reduce")]
    Empty,
    #[error("element {index} is not an integer")]
    InvalidElement { index: usize },
    #[error("result does not fit in 64 bits")]
    Overflow,
}

/// Euclidean algorithm.
pub fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `|a*b| / gcd(a, b)`, with `lcm(a, 0) = 0`. `None` on overflow.
pub fn lcm(a: u128, b: u128) -> Option<u128> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Least common multiple of every element.
pub fn lcm_of(values: &[Value]) -> Result<u64, ReductionError> {
    fold(values, lcm)
}

/// Highest common factor of every element.
pub fn hcf_of(values: &[Value]) -> Result<u64, ReductionError> {
    fold(values, |a, b| Some(gcd(a, b)))
}

fn fold(
    values: &[Value],
    step: impl Fn(u128, u128) -> Option<u128>,
) -> Result<u64, ReductionError> {
    let mut elements = values.iter().enumerate().map(|(index, v)| element(index, v));
    let mut acc = elements.next().ok_or(ReductionError::Empty)??;
    for n in elements {
        acc = step(acc, n?).ok_or(ReductionError::Overflow)?;
    }
    u64::try_from(acc).map_err(|_| ReductionError::Overflow)
}

// Both folds only ever need magnitudes.
fn element(index: usize, value: &Value) -> Result<u128, ReductionError> {
    as_integer(value)
        .map(i128::unsigned_abs)
        .ok_or(ReductionError::InvalidElement { index })
}
