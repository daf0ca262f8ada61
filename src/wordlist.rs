//! Word corpus management.
//!
//! The dictionary the pattern detector matches against is injected, not
//! compiled in: any ordered source of lowercase words implements
//! [`WordCorpus`]. [`Wordlist`] is the file-backed implementation.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// An ordered source of lowercase dictionary words.
///
/// Implemented for slices and vectors of string-likes, so tests can use
/// plain `vec!["password", "dragon"]` fakes.
pub trait WordCorpus {
    /// Iterates the corpus in order.
    fn words(&self) -> Box<dyn Iterator<Item = &str> + '_>;
}

impl<S: AsRef<str>> WordCorpus for [S] {
    fn words(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.iter().map(AsRef::as_ref))
    }
}

impl<S: AsRef<str>> WordCorpus for Vec<S> {
    fn words(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        self.as_slice().words()
    }
}

impl<W: WordCorpus + ?Sized> WordCorpus for &W {
    fn words(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        (**self).words()
    }
}

#[derive(Error, Debug)]
pub enum WordlistError {
    #[error("Wordlist file not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Failed to read wordlist file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Wordlist file is empty")]
    EmptyFile,
}

/// A wordlist loaded from a file, one word per line.
///
/// Lines are trimmed and lowercased; blank lines are skipped. File order
/// is preserved, since the pattern detector reports the first match.
#[derive(Debug, Clone, Default)]
pub struct Wordlist {
    words: Vec<String>,
}

impl Wordlist {
    /// Returns the wordlist file path.
    ///
    /// Priority:
    /// 1. Environment variable `PWD_WORDLIST_PATH`
    /// 2. Default path `./assets/wordlist.txt`
    pub fn default_path() -> PathBuf {
        std::env::var("PWD_WORDLIST_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./assets/wordlist.txt"))
    }

    /// Loads the wordlist from [`Wordlist::default_path`].
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File does not exist
    /// - File cannot be read
    /// - File is empty
    pub fn load() -> Result<Self, WordlistError> {
        Self::from_path(Self::default_path())
    }

    /// Loads the wordlist from a specific file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WordlistError> {
        let path = path.as_ref();

        if !path.exists() {
            #[cfg(feature = "tracing")]
            tracing::error!("Wordlist load FAILED: FileNotFound {:?}", path);
            return Err(WordlistError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path)?;

        if content.trim().is_empty() {
            #[cfg(feature = "tracing")]
            tracing::error!("Wordlist load FAILED: Empty file {:?}", path);
            return Err(WordlistError::EmptyFile);
        }

        let words: Vec<String> = content
            .lines()
            .map(|l| l.trim().to_lowercase())
            .filter(|l| !l.is_empty())
            .collect();

        #[cfg(feature = "tracing")]
        tracing::info!("Wordlist loaded: {} words from {:?}", words.len(), path);

        Ok(Wordlist { words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordCorpus for Wordlist {
    fn words(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.words.iter().map(String::as_str))
    }
}
