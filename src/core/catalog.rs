//! Message catalog.
//!
//! Aggregates extracted messages by identity. Two calls that differ only by
//! source location merge into one entry; a different plural form or context
//! makes a distinct entry even when the singular text is identical.

use std::collections::HashMap;

use indexmap::IndexSet;

/// Separates the context from the singular in [`MessageKey::sort_key`].
const CONTEXT_SEPARATOR: char = '\u{4}';

/// Separates the singular from the plural in [`MessageKey::sort_key`].
const PLURAL_SEPARATOR: char = '\u{0}';

/// Uniqueness key of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey {
    pub context: Option<String>,
    pub singular: String,
    pub plural: Option<String>,
}

impl MessageKey {
    /// Composite key used to order the serialized catalog.
    ///
    /// The separators sort below any printable character, so byte-wise
    /// comparison never confuses `("a", "bc")` with `("ab", "c")`.
    pub fn sort_key(&self) -> String {
        let mut key = String::new();
        key.push_str(self.context.as_deref().unwrap_or_default());
        key.push(CONTEXT_SEPARATOR);
        key.push_str(&self.singular);
        key.push(PLURAL_SEPARATOR);
        key.push_str(self.plural.as_deref().unwrap_or_default());
        key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: MessageKey,
    /// `path:line` references in first-seen order, without duplicates.
    pub references: IndexSet<String>,
    /// Translator comments in first-seen order, without duplicates.
    pub comments: IndexSet<String>,
}

impl CatalogEntry {
    fn new(key: MessageKey) -> Self {
        Self {
            key,
            references: IndexSet::new(),
            comments: IndexSet::new(),
        }
    }
}

/// Grow-only map from [`MessageKey`] to [`CatalogEntry`].
#[derive(Debug, Default)]
pub struct Catalog {
    entries: HashMap<MessageKey, CatalogEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of a message.
    ///
    /// Creates the entry on first sight, otherwise merges the reference and
    /// comment into the existing entry. Empty comments are not stored.
    pub fn add(&mut self, key: MessageKey, reference: String, comment: Option<String>) {
        let entry = self
            .entries
            .entry(key)
            .or_insert_with_key(|key| CatalogEntry::new(key.clone()));
        entry.references.insert(reference);
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            entry.comments.insert(comment);
        }
    }

    pub fn get(&self, key: &MessageKey) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by [`MessageKey::sort_key`], ties broken by the key itself.
    pub fn sorted_entries(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<(String, &CatalogEntry)> = self
            .entries
            .values()
            .map(|entry| (entry.key.sort_key(), entry))
            .collect();
        entries.sort_by(|(a, ea), (b, eb)| a.cmp(b).then_with(|| ea.key.cmp(&eb.key)));
        entries.into_iter().map(|(_, entry)| entry).collect()
    }
}
