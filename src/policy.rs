//! Strength policy configuration.
//!
//! A [`Policy`] collects the tunable limits a password is checked against.
//! Invalid configurations are rejected at assignment time; the check itself
//! never validates or corrects the policy.

use std::str::FromStr;
use thiserror::Error;

/// Sentinel for a disabled length tier in [`Policy::min`].
pub const MIN_DISABLED: i32 = i32::MAX;

/// Hard ceiling on checked password length, independent of the policy.
pub const HARD_LENGTH_LIMIT: i32 = 10_000;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    #[error("length minimum at index {0} must not be negative")]
    NegativeMin(usize),
    #[error("length minimums must not increase with class count (min[{0}] exceeds min[{1}])")]
    IncreasingMin(usize, usize),
    #[error("maximum length must not be negative")]
    NegativeMax,
    #[error("passphrase word count must not be negative")]
    NegativePassphrase,
    #[error("unrecognized similar policy {0:?}, expected \"permit\" or \"deny\"")]
    UnknownSimilar(String),
}

/// Whether a new password may resemble the old one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Similar {
    /// Allow a new password that shares material with the old one.
    Permit,
    /// Reject a new password based on the old one.
    #[default]
    Deny,
}

impl FromStr for Similar {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permit" => Ok(Similar::Permit),
            "deny" => Ok(Similar::Deny),
            other => Err(PolicyError::UnknownSimilar(other.to_string())),
        }
    }
}

/// The tunable strength requirements.
///
/// `min` holds the minimum acceptable lengths for passwords made of 1, 2,
/// 3 and 4 character classes, plus the baseline minimum at index 4 that is
/// checked before anything else. The sequence must not increase as the
/// index grows; [`MIN_DISABLED`] disables a tier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    min: [i32; 5],
    max: i32,
    passphrase: i32,
    match_length: i32,
    similar: Similar,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            min: [MIN_DISABLED, 24, 11, 8, 7],
            max: 40,
            passphrase: 3,
            match_length: 4,
            similar: Similar::Deny,
        }
    }
}

impl Policy {
    pub fn new() -> Self {
        Policy::default()
    }

    /// Minimum lengths per class-count tier; index 4 is the baseline.
    pub fn min(&self) -> [i32; 5] {
        self.min
    }

    /// Maximum accepted length. The value 8 selects legacy truncation
    /// mode instead of rejecting overlong passwords.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Words required for the relaxed passphrase check; 0 disables it.
    pub fn passphrase(&self) -> i32 {
        self.passphrase
    }

    /// Common-substring length that makes two strings related. 0 disables
    /// similarity and pattern checks; negative treats everything as
    /// related.
    pub fn match_length(&self) -> i32 {
        self.match_length
    }

    pub fn similar(&self) -> Similar {
        self.similar
    }

    /// Replaces the length tiers, validating each value and the
    /// non-increasing invariant. The policy is unchanged on error.
    pub fn set_min(&mut self, min: [i32; 5]) -> Result<(), PolicyError> {
        for (i, &value) in min.iter().enumerate() {
            if value < 0 {
                return Err(PolicyError::NegativeMin(i));
            }
            if i > 0 && value > min[i - 1] {
                return Err(PolicyError::IncreasingMin(i, i - 1));
            }
        }
        self.min = min;
        Ok(())
    }

    pub fn set_max(&mut self, max: i32) -> Result<(), PolicyError> {
        if max < 0 {
            return Err(PolicyError::NegativeMax);
        }
        self.max = max;
        Ok(())
    }

    pub fn set_passphrase(&mut self, words: i32) -> Result<(), PolicyError> {
        if words < 0 {
            return Err(PolicyError::NegativePassphrase);
        }
        self.passphrase = words;
        Ok(())
    }

    /// Negative values are accepted and mean "always related".
    pub fn set_match_length(&mut self, match_length: i32) {
        self.match_length = match_length;
    }

    pub fn set_similar(&mut self, similar: Similar) {
        self.similar = similar;
    }
}
