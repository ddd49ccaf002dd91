/// Power-of-two exponent helpers
///
/// These decide how many Morton levels an offset or a chunk size needs.

use super::error::{MortonError, MortonResult};

/// Smallest `e` such that `2^e > n`, i.e. the bit length of `n`.
///
/// `0` maps to `0` and an exact power of two `2^k` maps to `k + 1`.
#[inline(always)]
pub const fn exponent_covering(n: u64) -> u32 {
    u64::BITS - n.leading_zeros()
}

/// Signed entry point for [`exponent_covering`]. Negative input is rejected.
pub fn smallest_exponent_covering(n: i64) -> MortonResult<u32> {
    if n < 0 {
        return Err(MortonError::invalid(format!(
            "cannot resolve a power-of-two exponent for negative value {}",
            n
        )));
    }
    Ok(exponent_covering(n as u64))
}

/// Smallest `e` such that `2^e >= size`.
///
/// Used to round chunk sizes that are not a power of two up to the next one.
/// Both `0` and `1` give `0`.
#[inline(always)]
pub const fn next_power_of_two_exponent(size: u64) -> u32 {
    if size <= 1 {
        0
    } else {
        exponent_covering(size - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponent_boundaries() {
        let cases = [(0, 0), (1, 1), (2, 2), (3, 2), (7, 3), (8, 4), (67, 7)];
        for (n, expected) in cases {
            assert_eq!(
                smallest_exponent_covering(n).unwrap(),
                expected,
                "Wrong exponent for {}",
                n
            );
        }
    }

    #[test]
    fn test_exponent_is_strictly_greater() {
        for n in 0u64..4096 {
            let e = exponent_covering(n);
            assert!((1u128 << e) > n as u128);
            if e > 0 {
                assert!((1u128 << (e - 1)) <= n as u128, "{} is not minimal for {}", e, n);
            }
        }
    }

    #[test]
    fn test_exponent_extremes() {
        assert_eq!(exponent_covering(u64::MAX), 64);
        assert_eq!(exponent_covering(1 << 63), 64);
        assert_eq!(smallest_exponent_covering(i64::MAX).unwrap(), 63);
    }

    #[test]
    fn test_negative_is_invalid() {
        assert!(smallest_exponent_covering(-1).unwrap_err().is_invalid_argument());
        assert!(smallest_exponent_covering(i64::MIN).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_next_power_of_two_exponent() {
        let cases = [(0, 0), (1, 0), (2, 1), (3, 2), (4, 2), (5, 3), (50, 6), (64, 6), (65, 7)];
        for (size, expected) in cases {
            assert_eq!(next_power_of_two_exponent(size), expected, "size {}", size);
        }
    }
}
