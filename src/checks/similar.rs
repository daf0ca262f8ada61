//! Common-substring similarity detection.
//!
//! A needle is "based on" a haystack when the two share a substring of at
//! least the configured match length and the needle would still be too
//! simple with the shared material either excised (with partial length
//! credit) or partially discounted.

use crate::checks::simple::is_too_simple;
use crate::policy::Policy;

/// How a detected common substring is weighed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MatchKind {
    /// Excise the matched span and re-test the remainder. Used for the
    /// old-password and personal-information checks; `true` means the
    /// needle is related to the haystack.
    Removal,
    /// Discount the match against the full needle, with the stricter
    /// handling of leetspeak inside dictionary words. `true` means the
    /// dictionary pattern is confirmed.
    Word,
    /// Discount without the letters-only handling, for keyboard
    /// sequences and years. `true` means the pattern is confirmed.
    Sequence,
}

/// A [`MatchKind`] plus the direction the needle is being read in.
/// `reversed` marks that the needle runs backwards relative to
/// `original`, so span positions are mirrored before touching `original`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchMode {
    pub kind: MatchKind,
    pub reversed: bool,
}

impl MatchMode {
    pub(crate) fn forward(kind: MatchKind) -> Self {
        MatchMode {
            kind,
            reversed: false,
        }
    }

    pub(crate) fn reversed(kind: MatchKind) -> Self {
        MatchMode {
            kind,
            reversed: true,
        }
    }
}

/// What the word-mode span scan decided for one `(offset, length)` pair.
enum SpanScan {
    /// Every spanned byte of the original is a letter: the extra
    /// one-character penalty stays.
    AllLetters,
    /// A non-letter inside a longer-than-minimal match waives the extra
    /// penalty.
    MixedContent,
    /// A non-letter inside a minimal-length match: this offset is done,
    /// move to the next one.
    Disqualified,
}

/// Word matches are held to a stricter bar when they contain leetspeak: a
/// minimal-length match may not span a non-letter at all, and a longer
/// match loses the extra penalty it would otherwise carry.
fn scan_word_span(
    original: &[u8],
    offset: usize,
    span: usize,
    match_length: usize,
    reversed: bool,
) -> SpanScan {
    let length = original.len();
    let (start, end) = if reversed {
        (length - (offset + span), length - offset)
    } else {
        (offset, offset + span)
    };
    if original[start..end].iter().all(u8::is_ascii_alphabetic) {
        SpanScan::AllLetters
    } else if span == match_length {
        SpanScan::Disqualified
    } else {
        SpanScan::MixedContent
    }
}

/// Decides whether `needle` (already unified) is based on `haystack`
/// (already unified). `original` is the needle before unification, in its
/// natural reading direction; in removal mode the excision is applied to
/// it, in word mode its bytes decide the letters-only handling.
///
/// Returns `true` when the caller should reject; see [`MatchKind`] for
/// the per-mode meaning.
pub(crate) fn is_based_on(
    policy: &Policy,
    haystack: &[u8],
    needle: &[u8],
    original: &[u8],
    mode: MatchMode,
) -> bool {
    let match_length = policy.match_length();
    if match_length == 0 {
        return false;
    }
    if match_length < 0 {
        return true;
    }

    let m = match_length as usize;
    let length = needle.len();
    if length < m {
        return false;
    }

    let mut worst_bias = 0i32;

    'offsets: for i in 0..=(length - m) {
        let mut bias = 0i32;
        for j in m..=(length - i) {
            bias = 0;
            let span = &needle[i..i + j];
            if haystack.len() < j || !haystack.windows(j).any(|window| window == span) {
                continue;
            }
            match mode.kind {
                MatchKind::Removal => {
                    // Excise the span from the original and re-test the
                    // remainder with credit for match_length - 1 bytes.
                    let pos = if mode.reversed { length - (i + j) } else { i };
                    let mut scratch = Vec::with_capacity(length - j);
                    scratch.extend_from_slice(&original[..pos]);
                    scratch.extend_from_slice(&original[pos + j..]);
                    bias = match_length - 1;
                    if is_too_simple(policy, &scratch, bias, bias) {
                        return true;
                    }
                }
                MatchKind::Word | MatchKind::Sequence => {
                    bias = -1;
                    if mode.kind == MatchKind::Word {
                        match scan_word_span(original, i, j, m, mode.reversed) {
                            SpanScan::AllLetters => {}
                            SpanScan::MixedContent => bias = 0,
                            SpanScan::Disqualified => continue 'offsets,
                        }
                    }
                    // Discount span - (match_length + bias) bytes.
                    bias += match_length - j as i32;
                    if bias < worst_bias {
                        let passphrase_bias = if mode.kind == MatchKind::Word { 0 } else { bias };
                        if is_too_simple(policy, original, bias, passphrase_bias) {
                            return true;
                        }
                        worst_bias = bias;
                    }
                }
            }
        }
        // A zero bias means the last span length found no match, so no
        // longer span at any later offset can match either.
        if bias == 0 {
            break;
        }
    }
    false
}
