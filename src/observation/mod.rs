//! Observations and observation sequences.
//!
//! An [`Observation`] is the atomic unit of evidence the classifier works
//! with: either a textual token or one of the two sequence boundary markers.
//! An [`ObservationSequence`] is an ordered, finite, restartable collection
//! of observations representing one document or one item to classify.
//!
//! # Example
//!
//! ```
//! use textbayes::observation::{BoundaryMode, Observation, ObservationSequence};
//!
//! let seq = ObservationSequence::from_text("Hello world", BoundaryMode::AddBoundaries);
//! assert_eq!(seq.len(), 4);
//! assert_eq!(seq.as_slice()[1], Observation::token("HELLO"));
//! ```

pub mod tokenize;

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub use tokenize::{Tokenizer, WhitespaceTokenizer};

/// Comparison mode for names and tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseSensitivity {
    /// Exact, ordinal comparison.
    Sensitive,
    /// Ordinal comparison after Unicode lowercasing.
    #[default]
    Insensitive,
}

impl CaseSensitivity {
    /// Produce the comparison key for `value` under this mode.
    #[must_use]
    pub fn key(self, value: &str) -> Arc<str> {
        match self {
            Self::Sensitive => Arc::from(value),
            Self::Insensitive => Arc::from(value.to_lowercase()),
        }
    }
}

/// The two special boundary observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Boundary {
    /// Marks the start of a sequence.
    SequenceStart,
    /// Marks the end of a sequence.
    SequenceEnd,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceStart => write!(f, "\u{22A5}"),
            Self::SequenceEnd => write!(f, "\u{22A4}"),
        }
    }
}

/// Whether boundary observations are added around a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Wrap the sequence in start/end boundaries.
    #[default]
    AddBoundaries,
    /// Leave the sequence as-is.
    NoBoundaries,
}

/// A textual token with a case-folding comparison key.
///
/// Equality and hashing use the key only, so `"Boston"` and `"boston"` are
/// the same observation when created case-insensitively.
#[derive(Debug, Clone)]
pub struct Token {
    value: Arc<str>,
    key: Arc<str>,
    case: CaseSensitivity,
}

impl Token {
    /// Create a token compared under the given mode.
    #[must_use]
    pub fn new(value: &str, case: CaseSensitivity) -> Self {
        Self {
            value: Arc::from(value),
            key: case.key(value),
            case,
        }
    }

    /// The token text as it was given.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The mode this token is compared under.
    #[must_use]
    pub fn case(&self) -> CaseSensitivity {
        self.case
    }

    fn rekeyed(&self, case: CaseSensitivity) -> Self {
        Self {
            value: Arc::clone(&self.value),
            key: match case {
                CaseSensitivity::Sensitive => Arc::clone(&self.value),
                CaseSensitivity::Insensitive => case.key(&self.value),
            },
            case,
        }
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Token {}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

/// An atomic, immutable unit of evidence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Observation {
    /// A textual token.
    Token(Token),
    /// A sequence boundary marker.
    Boundary(Boundary),
}

impl Observation {
    /// Create a case-insensitive token observation.
    #[must_use]
    pub fn token(value: &str) -> Self {
        Self::Token(Token::new(value, CaseSensitivity::Insensitive))
    }

    /// Create a token observation compared under `case`.
    #[must_use]
    pub fn token_with(value: &str, case: CaseSensitivity) -> Self {
        Self::Token(Token::new(value, case))
    }

    /// The sequence-start boundary.
    #[must_use]
    pub fn start() -> Self {
        Self::Boundary(Boundary::SequenceStart)
    }

    /// The sequence-end boundary.
    #[must_use]
    pub fn end() -> Self {
        Self::Boundary(Boundary::SequenceEnd)
    }

    /// Whether this is a boundary marker.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        matches!(self, Self::Boundary(_))
    }

    /// Whether this observation already compares under `case`.
    /// Boundaries compare the same under every mode.
    #[must_use]
    pub fn is_keyed(&self, case: CaseSensitivity) -> bool {
        match self {
            Self::Token(token) => token.case == case,
            Self::Boundary(_) => true,
        }
    }

    /// This observation compared under `case`, borrowed when it already is.
    #[must_use]
    pub fn keyed(&self, case: CaseSensitivity) -> Cow<'_, Self> {
        match self {
            Self::Token(token) if token.case != case => Cow::Owned(Self::Token(token.rekeyed(case))),
            _ => Cow::Borrowed(self),
        }
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "{}", token.value()),
            Self::Boundary(boundary) => write!(f, "{boundary}"),
        }
    }
}

impl From<&str> for Observation {
    fn from(value: &str) -> Self {
        Self::token(value)
    }
}

/// Wrap a sequence in start/end boundaries.
///
/// An empty input stays empty. An existing boundary at either end is kept
/// and not duplicated.
pub fn with_boundaries<I>(observations: I) -> Vec<Observation>
where
    I: IntoIterator<Item = Observation>,
{
    let mut iter = observations.into_iter().peekable();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(iter.size_hint().0 + 3);
    if !first.is_boundary() {
        out.push(Observation::start());
    }
    out.push(first);
    out.extend(iter);

    if out.last().is_some_and(|last| !last.is_boundary()) {
        out.push(Observation::end());
    }
    out
}

/// An ordered, finite, restartable collection of observations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationSequence {
    observations: Vec<Observation>,
}

impl ObservationSequence {
    /// Create an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sequence from `observations`, optionally adding boundaries.
    pub fn from_observations<I>(observations: I, mode: BoundaryMode) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let observations = match mode {
            BoundaryMode::AddBoundaries => with_boundaries(observations),
            BoundaryMode::NoBoundaries => observations.into_iter().collect(),
        };
        Self { observations }
    }

    /// Split `text` on whitespace into case-insensitive token observations.
    #[must_use]
    pub fn from_text(text: &str, mode: BoundaryMode) -> Self {
        Self::from_tokens(
            text.split_whitespace(),
            mode,
            CaseSensitivity::Insensitive,
        )
    }

    /// Tokenize `text` with `tokenizer` into observations compared under `case`.
    ///
    /// # Errors
    ///
    /// Returns the tokenizer's error if tokenization fails.
    pub fn tokenize<T: Tokenizer + ?Sized>(
        text: &str,
        tokenizer: &T,
        mode: BoundaryMode,
        case: CaseSensitivity,
    ) -> crate::error::Result<Self> {
        let tokens = tokenizer.tokenize(text)?;
        Ok(Self::from_tokens(tokens.iter().map(String::as_str), mode, case))
    }

    fn from_tokens<'a, I>(tokens: I, mode: BoundaryMode, case: CaseSensitivity) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self::from_observations(
            tokens
                .into_iter()
                .map(|word| Observation::token_with(word, case)),
            mode,
        )
    }

    /// Number of observations, boundaries included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the sequence contains no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Whether `observation` occurs in the sequence.
    #[must_use]
    pub fn contains(&self, observation: &Observation) -> bool {
        self.observations.contains(observation)
    }

    /// Iterate the observations in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.observations.iter()
    }

    /// Borrow the observations as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Observation] {
        &self.observations
    }

    /// Whether every observation compares under `case`.
    #[must_use]
    pub fn is_keyed(&self, case: CaseSensitivity) -> bool {
        self.observations.iter().all(|o| o.is_keyed(case))
    }

    /// This sequence with every token compared under `case`. Borrowed when
    /// nothing needs re-keying.
    #[must_use]
    pub fn keyed(&self, case: CaseSensitivity) -> Cow<'_, Self> {
        if self.is_keyed(case) {
            return Cow::Borrowed(self);
        }
        Cow::Owned(
            self.observations
                .iter()
                .map(|o| o.keyed(case).into_owned())
                .collect(),
        )
    }
}

impl FromIterator<Observation> for ObservationSequence {
    fn from_iter<T: IntoIterator<Item = Observation>>(iter: T) -> Self {
        Self {
            observations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ObservationSequence {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

impl IntoIterator for ObservationSequence {
    type Item = Observation;
    type IntoIter = std::vec::IntoIter<Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.into_iter()
    }
}
