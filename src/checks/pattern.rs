//! Dictionary, keyboard-sequence, and birth-year detection.

use crate::checks::similar::{MatchKind, MatchMode, is_based_on};
use crate::checks::unify::unify_bytes;
use crate::policy::Policy;
use crate::types::RejectionReason;
use crate::wordlist::WordCorpus;

/// Keyboard-adjacency and digit/shift sequences a password must not be
/// based on. Fixed data, not user-configurable.
const SEQUENCES: [&str; 20] = [
    "0123456789",
    "`1234567890-=",
    "~!@#$%^&*()_+",
    "abcdefghijklmnopqrstuvwxyz",
    "a1b2c3d4e5f6g7h8i9j0",
    "1a2b3c4d5e6f7g8h9i0j",
    "abc123",
    "qwertyuiop[]\\asdfghjkl;'zxcvbnm,./",
    "qwertyuiop{}|asdfghjkl:\"zxcvbnm<>?",
    "qwertyuiopasdfghjklzxcvbnm",
    "1qaz2wsx3edc4rfv5tgb6yhn7ujm8ik,9ol.0p;/-['=]\\",
    "!qaz@wsx#edc$rfv%tgb^yhn&ujm*ik<(ol>)p:?_{\"+}|",
    "qazwsxedcrfvtgbyhnujmikolp",
    "1q2w3e4r5t6y7u8i9o0p-[=]",
    "q1w2e3r4t5y6u7i8o9p0[-]=\\",
    "1qaz1qaz",
    "1qaz!qaz", // '1' and '!' do not unify - see unify()
    "1qazzaq1",
    "zaq!1qaz",
    "zaq!2wsx",
];

/// First year of the range the birth-year pass covers.
const YEAR_FIRST: i32 = 1900;
/// Last year of the range, inclusive.
const YEAR_LAST: i32 = 2039;

/// Tests the needle against the corpus, the sequence table, and the
/// birth-year range, in that order, returning the reason of the first
/// hit. `needle` is the unified password (possibly reversed), `original`
/// the password as typed.
pub(crate) fn find_pattern<W: WordCorpus + ?Sized>(
    policy: &Policy,
    corpus: &W,
    needle: &[u8],
    original: &[u8],
    reversed: bool,
) -> Option<RejectionReason> {
    if policy.match_length() == 0 {
        return None;
    }

    let mode = if reversed {
        MatchMode::reversed(MatchKind::Word)
    } else {
        MatchMode::forward(MatchKind::Word)
    };
    for word in corpus.words() {
        let unified = unify_bytes(word.as_bytes());
        if is_based_on(policy, &unified, needle, original, mode) {
            return Some(RejectionReason::Word);
        }
    }

    let mode = if reversed {
        MatchMode::reversed(MatchKind::Sequence)
    } else {
        MatchMode::forward(MatchKind::Sequence)
    };
    for seq in SEQUENCES {
        let unified = unify_bytes(seq.as_bytes());
        if is_based_on(policy, &unified, needle, original, mode) {
            return Some(RejectionReason::Sequence);
        }
    }

    // Years only make sense as a pattern when matches this short count.
    if policy.match_length() <= 4 {
        for year in YEAR_FIRST..=YEAR_LAST {
            let digits = year.to_string();
            if is_based_on(policy, digits.as_bytes(), needle, original, mode) {
                return Some(RejectionReason::Sequence);
            }
        }
    }

    None
}
