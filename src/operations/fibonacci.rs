use serde_json::Value;

use super::as_integer;

/// Parse a term count: a non-negative integer.
pub fn parse_count(value: &Value) -> Option<u64> {
    as_integer(value).and_then(|n| u64::try_from(n).ok())
}

/// The first `n` Fibonacci numbers, starting `0, 1, 1, 2, ...`.
///
/// Terms past index 93 do not fit in a `u64` and saturate; callers cap `n`
/// at [`FIBONACCI_CEILING`](crate::consts::FIBONACCI_CEILING).
pub fn sequence(n: u64) -> Vec<u64> {
    let mut seq = Vec::with_capacity(n as usize);
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        seq.push(a);
        let next = a.saturating_add(b);
        a = b;
        b = next;
    }
    seq
}
