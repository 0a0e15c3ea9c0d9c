use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Tag name under which a source records the ruleset it belongs to.
pub const RULESET_TAG: &str = "ruleset";

/// An opaque token attached to a source for grouping and filtering.
///
/// Tokens built from the same string compare equal, so independent callers
/// can tag sources consistently without sharing a registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceTag(Arc<str>);

impl SourceTag {
    /// Build a token from its name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The name the token was built from.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourceTag {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for SourceTag {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A content origin: a homebrew file, a bundled package, etc.
///
/// Sources are immutable once built and shared as `Arc<Source>` between the
/// records they contribute. The set of ids a source currently contributes is
/// tracked by the indexer it was added to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    /// Stable identifier, e.g. a file path or package name.
    pub path: String,
    /// Higher priority wins conflicts.
    pub priority: i32,
    /// Grouping tokens keyed by tag name.
    pub tags: BTreeMap<String, SourceTag>,
}

impl Source {
    /// Create a source with priority 0 and no tags.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            priority: 0,
            tags: BTreeMap::new(),
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a tag.
    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<SourceTag>) -> Self {
        self.tags.insert(name.into(), value.into());
        self
    }

    /// Look up a tag by name.
    pub fn tag(&self, name: &str) -> Option<&SourceTag> {
        self.tags.get(name)
    }

    /// Finish building and wrap for sharing.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (priority {})", self.path, self.priority)
    }
}
