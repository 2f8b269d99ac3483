//! In-memory template id set

use serde::{Deserialize, Serialize};

/// Ordered list of template ids.
///
/// Order and duplicates are kept exactly as received, so the set round-trips
/// through the cache files unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateSet {
    ids: Vec<String>,
}

impl TemplateSet {
    pub fn new(ids: Vec<String>) -> Self {
        Self { ids }
    }

    /// Check whether `id` is a known template
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ids
    }
}

impl From<Vec<String>> for TemplateSet {
    fn from(ids: Vec<String>) -> Self {
        Self::new(ids)
    }
}

impl FromIterator<String> for TemplateSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a TemplateSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
