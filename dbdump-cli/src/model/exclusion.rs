//! Tables left out of a dump

use std::collections::BTreeSet;

/// Set of table names explicitly excluded from a dump
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    tables: BTreeSet<String>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, table: &str) -> bool {
        self.tables.contains(table)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.as_str())
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            tables: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.tables.extend(iter.into_iter().map(Into::into));
    }
}
