//! Password quality checking library
//!
//! This library evaluates candidate passwords against a configurable
//! strength policy: length tiers per character-class count, similarity to
//! the old password and to account information, and dictionary-word,
//! keyboard-sequence, and birth-year detection with leetspeak folding.
//!
//! # Features
//!
//! - `async` (default): Enables async checking with cancellation support
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_WORDLIST_PATH`: Custom path to wordlist file
//!   (default: `./assets/wordlist.txt`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_policy::{PasswordChecker, Policy, UserIdentity, Wordlist};
//! use secrecy::SecretString;
//!
//! // Load the dictionary once at startup
//! let wordlist = Wordlist::load().expect("Failed to load wordlist");
//! let checker = PasswordChecker::new(Policy::default(), wordlist);
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let identity = UserIdentity::new("jsmith").with_home_directory("/home/jsmith");
//!
//! let outcome = checker.check(&password, None, Some(&identity));
//! if let Some(reason) = outcome.reason() {
//!     println!("Rejected: {}", reason);
//! }
//! ```

// Internal modules
mod checker;
mod checks;
mod identity;
mod policy;
mod types;
mod wordlist;

// Public API
pub use checker::PasswordChecker;
pub use checks::unify;
pub use identity::UserIdentity;
pub use policy::{HARD_LENGTH_LIMIT, MIN_DISABLED, Policy, PolicyError, Similar};
pub use types::{CheckOutcome, RejectionReason};
pub use wordlist::{WordCorpus, Wordlist, WordlistError};
