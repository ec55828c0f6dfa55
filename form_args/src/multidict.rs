//! Scalar-or-sequence mapping bridging parsed arguments and form data.
//!
//! Parsed command-line values are mostly scalars while the validation engine
//! treats every datum as potentially multi-valued. [`Multidict::get`] hides
//! that difference for single-valued readers and [`Multidict::get_list`]
//! exposes it for multi-valued ones.

use std::collections::BTreeMap;

/// Key of the sentinel entry added by [`Multidict::with_sentinel`].
pub const SENTINEL_KEY: &str = "_";

/// A stored entry: one string or an ordered sequence of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiValue {
    /// Single value.
    Scalar(String),
    /// Ordered values.
    Sequence(Vec<String>),
}

impl From<String> for MultiValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for MultiValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<Vec<String>> for MultiValue {
    fn from(values: Vec<String>) -> Self {
        Self::Sequence(values)
    }
}

impl From<Vec<&str>> for MultiValue {
    fn from(values: Vec<&str>) -> Self {
        Self::Sequence(values.into_iter().map(str::to_owned).collect())
    }
}

/// Form data keyed by hierarchical field name.
///
/// # Examples
///
/// ```
/// use form_args::Multidict;
///
/// let mut data = Multidict::new();
/// data.insert("a", "foo");
/// data.insert("b", vec!["bar", "baz"]);
/// assert_eq!(data.get("a"), Some("foo"));
/// assert_eq!(data.get("b"), Some("bar"));
/// assert_eq!(data.get_list("a"), vec!["foo"]);
/// assert_eq!(data.get_list("b"), vec!["bar", "baz"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Multidict {
    entries: BTreeMap<String, MultiValue>,
}

impl Multidict {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Creates a mapping holding only the non-field sentinel entry, so the
    /// engine never mistakes "no field produced data" for "no form data".
    #[must_use]
    pub fn with_sentinel() -> Self {
        let mut data = Self::new();
        data.insert(SENTINEL_KEY, MultiValue::Sequence(Vec::new()));
        data
    }

    /// Inserts or replaces an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MultiValue>) {
        self.entries.insert(key.into(), value.into());
    }

    /// First value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.entries.get(key)? {
            MultiValue::Scalar(value) => Some(value),
            MultiValue::Sequence(values) => values.first().map(String::as_str),
        }
    }

    /// Every value stored under `key`; empty when the key is missing.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        match self.entries.get(key) {
            None => Vec::new(),
            Some(MultiValue::Scalar(value)) => vec![value.as_str()],
            Some(MultiValue::Sequence(values)) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Returns `true` when `key` is present, even with an empty sequence.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries, sentinel included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Multidict
where
    K: Into<String>,
    V: Into<MultiValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (key, value) in iter {
            data.insert(key, value);
        }
        data
    }
}
