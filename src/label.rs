//! Labels and the label registry.
//!
//! A [`Label`] is an opaque, immutable, name-based identity. Cloning is
//! cheap (shared string storage), so labels travel freely through caches
//! and score collections.

use crate::observation::CaseSensitivity;
use crate::prior::EqualDistribution;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A named candidate class.
///
/// # Examples
///
/// ```
/// use textbayes::label::Label;
///
/// assert_eq!(Label::new("Spam"), Label::new("spam"));
/// assert_eq!(Label::new("Spam").name(), "Spam");
/// ```
#[derive(Debug, Clone)]
pub struct Label {
    name: Arc<str>,
    key: Arc<str>,
}

impl Label {
    /// Create a case-insensitive label.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_case(name, CaseSensitivity::Insensitive)
    }

    /// Create a label compared under `case`.
    #[must_use]
    pub fn with_case(name: &str, case: CaseSensitivity) -> Self {
        Self {
            name: Arc::from(name),
            key: case.key(name),
        }
    }

    /// The label name as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Label {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Label {}

impl Hash for Label {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Hands out labels under one comparison mode, deduplicating by key.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    case: CaseSensitivity,
    labels: Vec<Label>,
}

impl LabelRegistry {
    /// Create a case-insensitive registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry comparing names under `case`.
    #[must_use]
    pub fn with_case(case: CaseSensitivity) -> Self {
        Self {
            case,
            labels: Vec::new(),
        }
    }

    /// Register `name`, returning the existing label if already known.
    pub fn add(&mut self, name: &str) -> Label {
        let label = Label::with_case(name, self.case);
        if let Some(existing) = self.labels.iter().find(|l| **l == label) {
            return existing.clone();
        }
        self.labels.push(label.clone());
        label
    }

    /// Look up a label by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Label> {
        let probe = Label::with_case(name, self.case);
        self.labels.iter().find(|l| **l == probe)
    }

    /// Number of registered labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate labels in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Label> {
        self.labels.iter()
    }

    /// An equal-distribution prior over the registered labels.
    #[must_use]
    pub fn equal_distribution(&self) -> EqualDistribution {
        EqualDistribution::new(self.labels.len())
    }
}
