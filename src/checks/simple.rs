//! The "too simple" classifier.

use crate::checks::estimate::expected_distinct;
use crate::policy::Policy;

/// ASCII whitespace as the reference classifies it, vertical tab included.
fn is_space(byte: u8) -> bool {
    byte == b' ' || (0x09..=0x0d).contains(&byte)
}

/// Decides whether a password is too weak (`true` = too simple): too
/// short for its class count, not enough distinct characters for its
/// class count, or not enough words to qualify as a passphrase. A
/// password passes as soon as one tier, evaluated from its own class
/// count down to one class, is satisfied.
///
/// The biases are added to the length and may be positive or negative.
/// The passphrase length check uses `passphrase_bias` so that callers can
/// pass zero there while `bias` is non-zero because of a dictionary word,
/// which is perfectly normal for a passphrase. Neither bias affects the
/// distinct-character, class, or word counts.
///
/// Classification is a fixed ASCII table; bytes outside ASCII count as an
/// "unknown" class that only adds class diversity for otherwise
/// unstructured passwords.
pub(crate) fn is_too_simple(
    policy: &Policy,
    password: &[u8],
    bias: i32,
    passphrase_bias: i32,
) -> bool {
    let length = password.len() as i32;
    if length < 1 {
        return true;
    }

    let mut digits = 0;
    let mut lowers = 0;
    let mut uppers = 0;
    let mut others = 0;
    let mut unknowns = 0;
    let mut words = 0i32;
    let mut chars = 0i32;
    let mut previous: Option<u8> = None;

    for (i, &c) in password.iter().enumerate() {
        if !c.is_ascii() {
            unknowns += 1;
        } else if c.is_ascii_digit() {
            digits += 1;
        } else if c.is_ascii_lowercase() {
            lowers += 1;
        } else if c.is_ascii_uppercase() {
            uppers += 1;
        } else {
            others += 1;
        }

        // A word starts where a letter follows a non-letter, or anything
        // follows whitespace.
        if let Some(p) = previous.filter(u8::is_ascii) {
            if c.is_ascii() {
                if c.is_ascii_alphabetic() && !p.is_ascii_alphabetic() {
                    words += 1;
                }
            } else if is_space(p) {
                words += 1;
            }
        }
        previous = Some(c);

        if !password[..i].contains(&c) {
            chars += 1;
        }
    }

    let mut classes = 0;
    if digits > 0 {
        classes += 1;
    }
    if lowers > 0 {
        classes += 1;
    }
    if uppers > 0 {
        classes += 1;
    }
    if others > 0 {
        classes += 1;
    }
    if unknowns > 0 && classes <= 1 && (classes == 0 || digits > 0 || words >= 2) {
        classes += 1;
    }

    let min = policy.min();
    let satisfied = |threshold: i32, applied_bias: i32, charset: i32| {
        i64::from(length) + i64::from(applied_bias) >= i64::from(threshold)
            && chars >= expected_distinct(charset, threshold - 1)
    };

    while classes > 0 {
        match classes {
            4 => {
                if satisfied(min[4], bias, 95) {
                    return false;
                }
            }
            3 => {
                if satisfied(min[4], bias, 62) {
                    return false;
                }
            }
            2 => {
                if satisfied(min[1], bias, 36) {
                    return false;
                }
                if policy.passphrase() != 0
                    && words >= policy.passphrase()
                    && satisfied(min[2], passphrase_bias, 27)
                {
                    return false;
                }
            }
            _ => return !satisfied(min[0], bias, 10),
        }
        classes -= 1;
    }
    true
}
