//! Short-argument tables.

use std::collections::BTreeMap;

/// Mapping from a single letter to the field name it abbreviates.
///
/// # Examples
///
/// ```
/// use form_args::ShortArguments;
///
/// let merged = ShortArguments::from([('a', "alpha"), ('c', "echo")])
///     .merge(ShortArguments::from([('c', "charlie")]));
/// let lookup = merged.invert();
/// assert_eq!(lookup.get("charlie"), Some(&'c'));
/// assert_eq!(lookup.get("echo"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortArguments(BTreeMap<char, String>);

impl ShortArguments {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Adds or replaces the field abbreviated by `short`.
    #[must_use]
    pub fn with(mut self, short: char, name: impl Into<String>) -> Self {
        self.0.insert(short, name.into());
        self
    }

    /// Field abbreviated by `short`.
    #[must_use]
    pub fn get(&self, short: char) -> Option<&str> {
        self.0.get(&short).map(String::as_str)
    }

    /// Merges `other` over `self`; `other` wins on letter collisions.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }

    /// Inverts the table into field name to letter. When two letters name
    /// the same field the later letter wins.
    #[must_use]
    pub fn invert(&self) -> BTreeMap<String, char> {
        self.0
            .iter()
            .map(|(short, name)| (name.clone(), *short))
            .collect()
    }

    /// Returns `true` when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(char, N)> for ShortArguments {
    fn from_iter<I: IntoIterator<Item = (char, N)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(short, name)| (short, name.into())).collect())
    }
}

impl<N: Into<String>, const LEN: usize> From<[(char, N); LEN]> for ShortArguments {
    fn from(entries: [(char, N); LEN]) -> Self {
        entries.into_iter().collect()
    }
}
