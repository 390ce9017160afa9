//! Score collections.
//!
//! [`ScoreCollection`] is an unordered bag of scores that tolerates
//! concurrent [`add`](ScoreCollection::add) from many threads. The minimum
//! and maximum are cached and only recomputed after a mutation; the cache is
//! invalidated by a dirty flag so readers never see a stale extreme.
//!
//! [`TargetScoreCollection`] adds a direction: a maximizing collection
//! treats the highest score as best, a minimizing one the lowest.
//!
//! # Example
//!
//! ```
//! use textbayes::label::Label;
//! use textbayes::score::{LabeledScore, TargetScoreCollection};
//!
//! let scores = TargetScoreCollection::maximizing();
//! scores.add(LabeledScore::new(Label::new("spam"), 0.2));
//! scores.add(LabeledScore::new(Label::new("ham"), 0.8));
//!
//! let best = scores.best().expect("non-empty");
//! assert_eq!(best.label().name(), "ham");
//! ```

use crate::label::Label;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

/// A value that can be ranked.
pub trait Score: Clone + Send + Sync {
    /// The ranking value.
    fn value(&self) -> f64;
}

impl Score for f64 {
    fn value(&self) -> f64 {
        *self
    }
}

/// A score attached to the label it was computed for.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledScore {
    label: Label,
    value: f64,
}

impl LabeledScore {
    /// Pair `label` with `value`.
    #[must_use]
    pub fn new(label: Label, value: f64) -> Self {
        Self { label, value }
    }

    /// The scored label.
    #[must_use]
    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl Score for LabeledScore {
    fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for LabeledScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

fn by_value<S: Score>(a: &S, b: &S) -> Ordering {
    a.value().total_cmp(&b.value())
}

/// Unordered, thread-safe bag of scores with cached extremes.
pub struct ScoreCollection<S: Score> {
    bag: Mutex<Vec<S>>,
    dirty: AtomicBool,
    extremes: Mutex<Option<(S, S)>>,
}

impl<S: Score> ScoreCollection<S> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bag: Mutex::new(Vec::new()),
            dirty: AtomicBool::new(false),
            extremes: Mutex::new(None),
        }
    }

    /// Insert a score. Safe to call from many threads at once.
    pub fn add(&self, score: S) {
        self.bag.lock().push(score);
        self.dirty.store(true, AtomicOrdering::Release);
    }

    /// Insert a score unless the bag is contended. Returns whether it was added.
    pub fn try_add(&self, score: S) -> bool {
        match self.bag.try_lock() {
            Some(mut bag) => {
                bag.push(score);
                self.dirty.store(true, AtomicOrdering::Release);
                true
            }
            None => false,
        }
    }

    /// Remove and return an arbitrary score.
    pub fn try_take(&self) -> Option<S> {
        let taken = self.bag.lock().pop();
        if taken.is_some() {
            self.dirty.store(true, AtomicOrdering::Release);
        }
        taken
    }

    /// Number of scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bag.lock().len()
    }

    /// Whether the collection holds no scores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bag.lock().is_empty()
    }

    /// Snapshot of the scores in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<S> {
        self.bag.lock().clone()
    }

    /// The lowest score, `None` when empty.
    #[must_use]
    pub fn minimum(&self) -> Option<S> {
        self.extremes().map(|(min, _)| min)
    }

    /// The highest score, `None` when empty.
    #[must_use]
    pub fn maximum(&self) -> Option<S> {
        self.extremes().map(|(_, max)| max)
    }

    fn extremes(&self) -> Option<(S, S)> {
        let mut extremes = self.extremes.lock();
        // Clear the flag before reading the bag: a concurrent add re-sets it
        // and the next query recomputes.
        if self.dirty.swap(false, AtomicOrdering::AcqRel) {
            let bag = self.bag.lock();
            *extremes = match (
                bag.iter().min_by(|a, b| by_value(*a, *b)),
                bag.iter().max_by(|a, b| by_value(*a, *b)),
            ) {
                (Some(min), Some(max)) => Some((min.clone(), max.clone())),
                _ => None,
            };
        }
        extremes.clone()
    }

    fn sorted(&self, descending: bool) -> Vec<S> {
        let mut scores = self.to_vec();
        if descending {
            scores.sort_by(|a, b| by_value(b, a));
        } else {
            scores.sort_by(by_value);
        }
        scores
    }
}

impl<S: Score> Default for ScoreCollection<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Score + fmt::Debug> fmt::Debug for ScoreCollection<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreCollection")
            .field("scores", &*self.bag.lock())
            .finish()
    }
}

impl<S: Score> FromIterator<S> for ScoreCollection<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let scores: Vec<S> = iter.into_iter().collect();
        let dirty = !scores.is_empty();
        Self {
            bag: Mutex::new(scores),
            dirty: AtomicBool::new(dirty),
            extremes: Mutex::new(None),
        }
    }
}

/// Which end of the score range is best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// Highest score wins.
    #[default]
    Maximize,
    /// Lowest score wins.
    Minimize,
}

/// A score collection with a direction.
#[derive(Debug)]
pub struct TargetScoreCollection<S: Score> {
    inner: ScoreCollection<S>,
    target: Target,
}

impl<S: Score> TargetScoreCollection<S> {
    /// Empty collection optimizing toward `target`.
    #[must_use]
    pub fn new(target: Target) -> Self {
        Self {
            inner: ScoreCollection::new(),
            target,
        }
    }

    /// Highest score is best.
    #[must_use]
    pub fn maximizing() -> Self {
        Self::new(Target::Maximize)
    }

    /// Lowest score is best.
    #[must_use]
    pub fn minimizing() -> Self {
        Self::new(Target::Minimize)
    }

    /// The optimization direction.
    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }

    /// Insert a score. Safe to call from many threads at once.
    pub fn add(&self, score: S) {
        self.inner.add(score);
    }

    /// See [`ScoreCollection::try_add`].
    pub fn try_add(&self, score: S) -> bool {
        self.inner.try_add(score)
    }

    /// See [`ScoreCollection::try_take`].
    pub fn try_take(&self) -> Option<S> {
        self.inner.try_take()
    }

    /// Number of scores.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether the collection holds no scores.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// The lowest score.
    #[must_use]
    pub fn minimum(&self) -> Option<S> {
        self.inner.minimum()
    }

    /// The highest score.
    #[must_use]
    pub fn maximum(&self) -> Option<S> {
        self.inner.maximum()
    }

    /// The best score for this direction, `None` when empty.
    #[must_use]
    pub fn best(&self) -> Option<S> {
        match self.target {
            Target::Maximize => self.inner.maximum(),
            Target::Minimize => self.inner.minimum(),
        }
    }

    /// The worst score for this direction, `None` when empty.
    #[must_use]
    pub fn worst(&self) -> Option<S> {
        match self.target {
            Target::Maximize => self.inner.minimum(),
            Target::Minimize => self.inner.maximum(),
        }
    }

    /// Scores best-first.
    #[must_use]
    pub fn ranked(&self) -> Vec<S> {
        self.inner.sorted(self.target == Target::Maximize)
    }

    /// Iterate scores best-first over a snapshot.
    pub fn iter_ranked(&self) -> std::vec::IntoIter<S> {
        self.ranked().into_iter()
    }

    /// Iterate scores in insertion order over a snapshot.
    pub fn iter_unordered(&self) -> std::vec::IntoIter<S> {
        self.inner.to_vec().into_iter()
    }

    /// Snapshot of the scores in insertion order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<S> {
        self.inner.to_vec()
    }
}

impl TargetScoreCollection<LabeledScore> {
    /// The score for `label`, if one was added.
    #[must_use]
    pub fn score_of(&self, label: &Label) -> Option<f64> {
        self.inner
            .bag
            .lock()
            .iter()
            .find(|s| s.label() == label)
            .map(Score::value)
    }
}

impl<S: Score> IntoIterator for &TargetScoreCollection<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_ranked()
    }
}
