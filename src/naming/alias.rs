use std::collections::HashMap;

/// Built-in glyph aliases. Values are complete element names, so callers
/// must not append a kind suffix to them.
pub const DEFAULT_ALIASES: &[(&str, &str)] = &[
    ("×", "close_button"),
    ("X", "close_button"),
    ("✕", "close_button"),
    ("→", "next_button"),
    ("←", "back_button"),
];

/// Exact-match lookup from symbolic label text to a semantic element name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Extend or override entries. Later entries win.
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (glyph, name) in entries {
            self.entries.insert(glyph.into(), name.into());
        }
        self
    }

    /// Canonical name for `text`, or `None`. No trimming, no fuzzy matching.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.entries.get(text).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::empty().with_entries(DEFAULT_ALIASES.iter().copied())
    }
}
