//! Password checker - main decision logic.

use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::checks::{MatchKind, MatchMode, find_pattern, is_based_on, is_too_simple, unify_bytes};
use crate::identity::UserIdentity;
use crate::policy::{HARD_LENGTH_LIMIT, Policy, Similar};
use crate::types::{CheckOutcome, RejectionReason};
use crate::wordlist::WordCorpus;

/// Length passwords are cut to when the policy maximum is the legacy
/// value 8, for compatibility with fixed-width password hashes.
const LEGACY_TRUNCATION: usize = 8;

fn reject(reason: RejectionReason) -> CheckOutcome {
    #[cfg(feature = "tracing")]
    tracing::debug!("password rejected: {}", reason);
    CheckOutcome::Rejected(reason)
}

/// Checks candidate passwords against a policy and a word corpus.
///
/// Both collaborators are injected at construction; a checker holds no
/// other state, so one instance can serve concurrent checks.
#[derive(Debug, Clone)]
pub struct PasswordChecker<W> {
    policy: Policy,
    corpus: W,
}

impl<W: WordCorpus> PasswordChecker<W> {
    pub fn new(policy: Policy, corpus: W) -> Self {
        PasswordChecker { policy, corpus }
    }

    /// Builds a checker with the default policy.
    pub fn with_default_policy(corpus: W) -> Self {
        PasswordChecker::new(Policy::default(), corpus)
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Decides whether `new_password` is acceptable.
    ///
    /// An empty `old_password` counts as absent. The old password is only
    /// consulted for the sameness and similarity gates; `identity` only
    /// for the personal-information gate.
    ///
    /// # Returns
    /// [`CheckOutcome::Accepted`], or the first gate's rejection reason.
    pub fn check(
        &self,
        new_password: &SecretString,
        old_password: Option<&SecretString>,
        identity: Option<&UserIdentity>,
    ) -> CheckOutcome {
        let policy = &self.policy;
        let old = old_password
            .map(|p| p.expose_secret().as_bytes())
            .filter(|p| !p.is_empty());

        let mut new = new_password.expose_secret().as_bytes();
        let mut length = new.len() as i32;

        if length < policy.min()[4] {
            return reject(RejectionReason::Short);
        }

        if length > HARD_LENGTH_LIMIT {
            return reject(RejectionReason::Long);
        }

        if length > policy.max() {
            if policy.max() == LEGACY_TRUNCATION as i32 {
                // Compatibility with old DES-based crypt(): check only the
                // bytes the hash would keep.
                new = &new[..LEGACY_TRUNCATION];
                length = LEGACY_TRUNCATION as i32;
                if let Some(old) = old {
                    if old.len() < LEGACY_TRUNCATION || old[..LEGACY_TRUNCATION] != *new {
                        return reject(RejectionReason::Same);
                    }
                }
            } else {
                return reject(RejectionReason::Long);
            }
        }

        if let Some(old) = old {
            if bool::from(new.ct_eq(old)) {
                return reject(RejectionReason::Same);
            }
        }

        if is_too_simple(policy, new, 0, 0) {
            if length < policy.min()[1] && policy.min()[1] <= policy.max() {
                return reject(RejectionReason::SimpleShort);
            }
            return reject(RejectionReason::Simple);
        }

        let unified = unify_bytes(new);
        let reversed: Vec<u8> = unified.iter().rev().copied().collect();

        if policy.similar() == Similar::Deny {
            if let Some(old) = old {
                let unified_old = unify_bytes(old);
                if is_based_on(
                    policy,
                    &unified_old,
                    &unified,
                    new,
                    MatchMode::forward(MatchKind::Removal),
                ) || is_based_on(
                    policy,
                    &unified_old,
                    &reversed,
                    new,
                    MatchMode::reversed(MatchKind::Removal),
                ) {
                    return reject(RejectionReason::Similar);
                }
            }
        }

        if let Some(identity) = identity {
            for field in [
                identity.name(),
                identity.gecos(),
                identity.home_directory(),
            ] {
                let haystack = unify_bytes(field.as_bytes());
                if is_based_on(
                    policy,
                    &haystack,
                    &unified,
                    new,
                    MatchMode::forward(MatchKind::Removal),
                ) || is_based_on(
                    policy,
                    &haystack,
                    &reversed,
                    new,
                    MatchMode::reversed(MatchKind::Removal),
                ) {
                    return reject(RejectionReason::Personal);
                }
            }
        }

        if let Some(reason) = find_pattern(policy, &self.corpus, &unified, new, false)
            .or_else(|| find_pattern(policy, &self.corpus, &reversed, new, true))
        {
            return reject(reason);
        }

        CheckOutcome::Accepted
    }

    /// Async wrapper that delivers the outcome over a channel.
    ///
    /// A token cancelled before the check runs yields
    /// [`RejectionReason::Error`].
    #[cfg(feature = "async")]
    pub async fn check_tx(
        &self,
        new_password: &SecretString,
        old_password: Option<&SecretString>,
        identity: Option<&UserIdentity>,
        token: CancellationToken,
        tx: mpsc::Sender<CheckOutcome>,
    ) {
        let outcome = if token.is_cancelled() {
            CheckOutcome::Rejected(RejectionReason::Error)
        } else {
            self.check(new_password, old_password, identity)
        };

        if let Err(e) = tx.send(outcome).await {
            #[cfg(feature = "tracing")]
            tracing::error!("Failed to send password check outcome: {}", e);
            #[cfg(not(feature = "tracing"))]
            let _ = e;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn checker(policy: Policy) -> PasswordChecker<Vec<&'static str>> {
        PasswordChecker::new(policy, Vec::new())
    }

    fn checker_with_corpus(
        policy: Policy,
        corpus: Vec<&'static str>,
    ) -> PasswordChecker<Vec<&'static str>> {
        PasswordChecker::new(policy, corpus)
    }

    #[test]
    fn test_strong_password_is_accepted() {
        let checker = checker_with_corpus(
            Policy::default(),
            vec!["password", "dragon", "letmein", "monkey", "qwerty"],
        );
        let outcome = checker.check(
            &secret("o/IiJ/OI/110dA6KMN8m10pk7ff0UDR0rcJIAYhY"),
            None,
            None,
        );
        assert_eq!(outcome, CheckOutcome::Accepted);
    }

    #[test]
    fn test_short_password_is_rejected() {
        let checker = checker(Policy::default());
        assert_eq!(
            checker.check(&secret("123456"), None, None),
            CheckOutcome::Rejected(RejectionReason::Short)
        );
        assert_eq!(
            checker.check(&secret(""), None, None),
            CheckOutcome::Rejected(RejectionReason::Short)
        );
    }

    #[test]
    fn test_overlong_password_is_rejected() {
        let checker = checker(Policy::default());
        let password = "a".repeat(41);
        assert_eq!(
            checker.check(&secret(&password), None, None),
            CheckOutcome::Rejected(RejectionReason::Long)
        );
    }

    #[test]
    fn test_hard_ceiling_overrides_policy_maximum() {
        let mut policy = Policy::default();
        policy.set_max(20_000).expect("valid max");
        let checker = checker(policy);
        let password = "a".repeat(10_001);
        assert_eq!(
            checker.check(&secret(&password), None, None),
            CheckOutcome::Rejected(RejectionReason::Long)
        );
    }

    #[test]
    fn test_reusing_the_old_password_is_rejected() {
        let checker = checker(Policy::default());
        let password = secret("Str4ngeP4ss!");
        assert_eq!(
            checker.check(&password, Some(&password), None),
            CheckOutcome::Rejected(RejectionReason::Same)
        );
    }

    /// Policy with every length tier at 8 (baseline 7), so a ten-letter
    /// password with enough spread passes the strength gate and the
    /// later gates become observable.
    fn flat_policy() -> Policy {
        let mut policy = Policy::default();
        policy.set_min([8, 8, 8, 8, 7]).expect("valid min");
        policy
    }

    #[test]
    fn test_empty_old_password_counts_as_absent() {
        let checker = checker(flat_policy());
        assert_eq!(
            checker.check(&secret("qzwxvnmjkf"), Some(&secret("")), None),
            CheckOutcome::Accepted
        );
    }

    #[test]
    fn test_simple_password_is_rejected() {
        let mut policy = Policy::default();
        policy.set_min([10, 10, 10, 10, 7]).expect("valid min");
        let checker = checker(policy);
        // Long enough, but only six distinct characters.
        assert_eq!(
            checker.check(&secret("aabbccddeeff"), None, None),
            CheckOutcome::Rejected(RejectionReason::Simple)
        );
    }

    #[test]
    fn test_simple_short_below_the_two_class_minimum() {
        let mut policy = Policy::default();
        policy.set_min([10, 10, 10, 10, 7]).expect("valid min");
        let checker = checker(policy);
        assert_eq!(
            checker.check(&secret("abcdefghi"), None, None),
            CheckOutcome::Rejected(RejectionReason::SimpleShort)
        );
    }

    #[test]
    fn test_password_sharing_old_material_is_similar() {
        let checker = checker(flat_policy());
        // Removing the shared prefix leaves "vnmjkf", which is too weak
        // on its own.
        assert_eq!(
            checker.check(&secret("qzwxvnmjkf"), Some(&secret("Xqzwxvnmjkf7")), None),
            CheckOutcome::Rejected(RejectionReason::Similar)
        );
    }

    #[test]
    fn test_similarity_permitted_by_policy() {
        let mut policy = flat_policy();
        policy.set_similar(Similar::Permit);
        let checker = checker(policy);
        assert_eq!(
            checker.check(&secret("qzwxvnmjkf"), Some(&secret("Xqzwxvnmjkf7")), None),
            CheckOutcome::Accepted
        );
    }

    #[test]
    fn test_match_length_zero_permits_similarity() {
        let mut policy = flat_policy();
        policy.set_match_length(0);
        let checker = checker(policy);
        assert_eq!(
            checker.check(&secret("qzwxvnmjkf"), Some(&secret("Xqzwxvnmjkf7")), None),
            CheckOutcome::Accepted
        );
    }

    #[test]
    fn test_password_sharing_user_name_is_personal() {
        let checker = checker(flat_policy());
        let identity = UserIdentity::new("jonathansmith");
        assert_eq!(
            checker.check(&secret("nathqzwxvkjf"), None, Some(&identity)),
            CheckOutcome::Rejected(RejectionReason::Personal)
        );
    }

    #[test]
    fn test_reversed_password_shares_user_name() {
        let checker = checker(flat_policy());
        let identity = UserIdentity::new("jonathansmith");
        // Ends with "htan": "nath" read backwards.
        assert_eq!(
            checker.check(&secret("qzwxvkjfhtan"), None, Some(&identity)),
            CheckOutcome::Rejected(RejectionReason::Personal)
        );
    }

    #[test]
    fn test_password_sharing_home_directory_is_personal() {
        let checker = checker(flat_policy());
        let identity = UserIdentity::new("js").with_home_directory("/home/nathansm");
        assert_eq!(
            checker.check(&secret("nathqzwxvkjf"), None, Some(&identity)),
            CheckOutcome::Rejected(RejectionReason::Personal)
        );
    }

    #[test]
    fn test_unrelated_identity_is_accepted() {
        let checker = checker(flat_policy());
        let identity = UserIdentity::new("jsmith")
            .with_gecos("John Smith")
            .with_home_directory("/home/jsmith");
        assert_eq!(
            checker.check(&secret("qzwxvnmjkf"), None, Some(&identity)),
            CheckOutcome::Accepted
        );
    }

    #[test]
    fn test_leet_spelling_of_corpus_word_is_rejected() {
        let checker = checker_with_corpus(flat_policy(), vec!["dragonets"]);
        assert_eq!(
            checker.check(&secret("DRAGONETSQWK"), None, None),
            CheckOutcome::Rejected(RejectionReason::Word)
        );
    }

    #[test]
    fn test_word_rejection_depends_on_corpus() {
        let checker = checker(flat_policy());
        assert_eq!(
            checker.check(&secret("DRAGONETSQWK"), None, None),
            CheckOutcome::Accepted
        );
    }

    #[test]
    fn test_keyboard_row_password_is_rejected() {
        let checker = checker(flat_policy());
        assert_eq!(
            checker.check(&secret("qwertyuiopasd"), None, None),
            CheckOutcome::Rejected(RejectionReason::Sequence)
        );
    }

    /// Policy in legacy truncation mode with tiers low enough that the
    /// eight bytes kept by the truncation can still pass the gate.
    fn legacy_policy() -> Policy {
        let mut policy = Policy::default();
        policy.set_min([2, 2, 2, 2, 2]).expect("valid min");
        policy.set_max(8).expect("valid max");
        policy
    }

    #[test]
    fn test_legacy_truncation_keeps_checking() {
        let checker = checker(legacy_policy());
        assert_eq!(
            checker.check(&secret("abcdefghij"), None, None),
            CheckOutcome::Accepted
        );
    }

    #[test]
    fn test_legacy_truncation_rejects_differing_old_prefix() {
        let checker = checker(legacy_policy());
        assert_eq!(
            checker.check(&secret("abcdefghij"), Some(&secret("zzzzzzzzz")), None),
            CheckOutcome::Rejected(RejectionReason::Same)
        );
        assert_eq!(
            checker.check(&secret("abcdefghij"), Some(&secret("abc")), None),
            CheckOutcome::Rejected(RejectionReason::Same)
        );
    }

    #[test]
    fn test_legacy_truncation_with_agreeing_old_prefix() {
        let checker = checker(legacy_policy());
        // The truncated password survives the prefix gate, then the whole
        // of it turns up inside the old password: similar.
        assert_eq!(
            checker.check(&secret("abcdefghij"), Some(&secret("abcdefghZZZ")), None),
            CheckOutcome::Rejected(RejectionReason::Similar)
        );
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test]
    async fn test_check_tx_delivers_outcome() {
        let checker = PasswordChecker::with_default_policy(Vec::<&str>::new());
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        checker
            .check_tx(&secret("123456"), None, None, token, tx)
            .await;

        let outcome = rx.recv().await.expect("Should receive outcome");
        assert_eq!(outcome, CheckOutcome::Rejected(RejectionReason::Short));
    }

    #[tokio::test]
    async fn test_check_tx_cancelled_before_running() {
        let checker = PasswordChecker::with_default_policy(Vec::<&str>::new());
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        checker
            .check_tx(&secret("SomePassword123!"), None, None, token, tx)
            .await;

        let outcome = rx.recv().await.expect("Should receive outcome");
        assert_eq!(outcome, CheckOutcome::Rejected(RejectionReason::Error));
    }
}
