//! Tokenizers turning raw text into observation tokens.
//!
//! Tokenization is a collaborator of the classifier, not part of it: any
//! [`Tokenizer`] can feed [`ObservationSequence::tokenize`](super::ObservationSequence::tokenize).
//!
//! [`WhitespaceTokenizer`] splits on Unicode whitespace and keeps punctuation attached.

use crate::error::Result;

/// Splits text into string tokens.
pub trait Tokenizer {
    /// Tokenize `text` into an ordered list of tokens.
    ///
    /// # Errors
    ///
    /// Implementations may fail on malformed input.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

/// Whitespace tokenizer that splits text on Unicode whitespace characters.
///
/// # Examples
///
/// ```
/// use textbayes::observation::{Tokenizer, WhitespaceTokenizer};
///
/// let tokenizer = WhitespaceTokenizer::new();
/// let tokens = tokenizer.tokenize("Hello, world!").expect("tokenize should succeed");
/// assert_eq!(tokens, vec!["Hello,", "world!"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(ToString::to_string).collect())
    }
}
