//! Expected distinct-character estimate.

const FIXED_BITS: i64 = 15;

/// Estimates how many distinct characters a random password of `length`
/// drawn uniformly from an alphabet of `charset` symbols is expected to
/// contain, rounded down. The classifier uses this with the requested
/// minimum length, so longer passwords are not held to a stricter bar.
///
/// The arithmetic is 15-bit fixed point with truncating division,
/// matching the reference algorithm bit for bit; shift amounts the
/// reference cannot represent saturate to a result of 0. Non-positive
/// `charset` or `length` yields 0.
pub(crate) fn expected_distinct(charset: i32, length: i32) -> i32 {
    if charset < 1 || length < 1 {
        return 0;
    }
    let x = i64::from(charset - 1) << (FIXED_BITS / i64::from(charset));
    let mut y = x;
    for _ in 1..length {
        y = (y * x) >> FIXED_BITS;
    }
    if y > FIXED_BITS {
        return 0;
    }
    let z = i64::from(charset) << (FIXED_BITS - y);
    (z >> FIXED_BITS) as i32
}
