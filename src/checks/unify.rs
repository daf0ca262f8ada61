//! Canonicalization for similarity comparisons.

/// Folds one byte: ASCII lowercase, then the leetspeak substitution.
///
/// 'i' and 'l' map to different tokens on purpose; sending both to '1'
/// would make unrelated words like "mile" and "MLLE" compare equal.
fn unify_byte(byte: u8) -> u8 {
    match byte.to_ascii_lowercase() {
        b'a' | b'@' => b'4',
        b'e' => b'3',
        b'i' | b'|' => b'!',
        b'l' => b'1',
        b'o' => b'0',
        b's' | b'$' => b'5',
        b't' | b'+' => b'7',
        other => other,
    }
}

pub(crate) fn unify_bytes(source: &[u8]) -> Vec<u8> {
    source.iter().map(|&b| unify_byte(b)).collect()
}

/// Canonicalizes a string for comparison: ASCII letters are lowercased,
/// then common leetspeak spellings are collapsed (a/@ and 4, e and 3,
/// i/| and !, l and 1, o and 0, s/$ and 5, t/+ and 7). Every output
/// character is a fixed point of the mapping, so `unify` is idempotent.
pub fn unify(source: &str) -> String {
    source
        .chars()
        .map(|c| {
            if c.is_ascii() {
                unify_byte(c as u8) as char
            } else {
                c
            }
        })
        .collect()
}
