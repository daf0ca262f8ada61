//! Result types returned by a password check.

use std::fmt;

/// Why a password was rejected.
///
/// Each variant carries a short human-readable message, available through
/// `Display` or [`RejectionReason::message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// The check could not be performed.
    Error,
    /// New password is identical to the old one.
    Same,
    /// New password is based on the old one.
    Similar,
    /// Shorter than the baseline minimum length.
    Short,
    /// Longer than the maximum accepted length.
    Long,
    /// Too simple, and too short for the relaxed length tiers to apply.
    SimpleShort,
    /// Not enough different characters or character classes.
    Simple,
    /// Based on the user's login information.
    Personal,
    /// Based on a dictionary word.
    Word,
    /// Based on a common keyboard or digit sequence.
    Sequence,
}

impl RejectionReason {
    /// The message shown to users for this rejection.
    pub fn message(&self) -> &'static str {
        match self {
            RejectionReason::Error => "check failed",
            RejectionReason::Same => "is the same as the old one",
            RejectionReason::Similar => "is based on the old one",
            RejectionReason::Short => "too short",
            RejectionReason::Long => "too long",
            RejectionReason::SimpleShort => {
                "not enough different characters or classes for this length"
            }
            RejectionReason::Simple => "not enough different characters or classes",
            RejectionReason::Personal => "based on personal login information",
            RejectionReason::Word => "based on a dictionary word and not a passphrase",
            RejectionReason::Sequence => {
                "based on a common sequence of characters and not a passphrase"
            }
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a single password check.
///
/// The rejection reason is part of the return value, so concurrent checks
/// never observe each other's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// The password satisfies the policy.
    Accepted,
    /// The password was rejected for the given reason.
    Rejected(RejectionReason),
}

impl CheckOutcome {
    /// Returns `true` if the password was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, CheckOutcome::Accepted)
    }

    /// The rejection reason, or `None` if the password was accepted.
    pub fn reason(&self) -> Option<RejectionReason> {
        match self {
            CheckOutcome::Accepted => None,
            CheckOutcome::Rejected(reason) => Some(*reason),
        }
    }
}
