//! Functions to construct and combine [`Integer`]s.

use rug::Integer;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Computes the greatest common divisor of two [`Integer`]s.
///
/// The result is always nonnegative; `gcd(0, 0)` is 0, so callers that divide by
/// the result must rule that case out first (see
/// [`AlgebraError::DivisionByZero`](crate::error::AlgebraError::DivisionByZero)).
pub fn gcd(a: &Integer, b: &Integer) -> Integer {
    Integer::from(a.gcd_ref(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basic() {
        assert_eq!(gcd(&int(12), &int(18)), 6);
        assert_eq!(gcd(&int(-12), &int(18)), 6);
        assert_eq!(gcd(&int(7), &int(13)), 1);
        assert_eq!(gcd(&int(0), &int(5)), 5);
        assert_eq!(gcd(&int(0), &int(0)), 0);
    }
}
