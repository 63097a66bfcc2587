use serde_json::Value;

use super::as_integer;

/// Trial division up to √n.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Keep the prime integers of `values`, in order. Anything that is not an
/// integer is dropped, never an error.
pub fn filter_primes(values: &[Value]) -> Vec<u64> {
    values
        .iter()
        .filter_map(as_integer)
        .filter_map(|n| u64::try_from(n).ok())
        .filter(|&n| is_prime(n))
        .collect()
}
