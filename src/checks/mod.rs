//! The decision gates behind a password check.
//!
//! Each module covers one aspect: canonicalization, the distinct-character
//! estimate, the simplicity classifier, common-substring similarity, and
//! dictionary/sequence pattern detection.

mod estimate;
mod pattern;
mod similar;
mod simple;
mod unify;

pub use unify::unify;

pub(crate) use pattern::find_pattern;
pub(crate) use similar::{MatchKind, MatchMode, is_based_on};
pub(crate) use simple::is_too_simple;
pub(crate) use unify::unify_bytes;
