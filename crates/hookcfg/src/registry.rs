//! Known hook-type categories
//!
//! The validator never decides which hook types exist. The surrounding tool
//! owns that list and hands it in as a [`HookTypeRegistry`]; iteration order is
//! the order the names were supplied in, which makes completed documents and
//! audit output reproducible.

use indexmap::IndexSet;

/// Ordered, de-duplicated set of hook-type category names
///
/// # Examples
///
/// ```
/// use hookcfg::HookTypeRegistry;
///
/// let registry = HookTypeRegistry::new(["PreCommit", "CommitMsg", "PreCommit"]);
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["PreCommit", "CommitMsg"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookTypeRegistry {
    names: IndexSet<String>,
}

impl HookTypeRegistry {
    /// Build a registry from category names, keeping the first occurrence of
    /// any duplicate
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for HookTypeRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
