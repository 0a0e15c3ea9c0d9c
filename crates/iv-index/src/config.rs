//! Indexer configuration.

/// How to choose between candidates that share the highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The most recently added source wins.
    #[default]
    LastAdded,
    /// The earliest added source keeps winning.
    FirstAdded,
}

/// Configuration for a [`DataIndexer`](crate::DataIndexer).
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexConfig {
    /// Tie-break among equal-priority candidates.
    pub tie_break: TieBreak,
}

impl IndexConfig {
    /// Set the tie-break policy.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = IndexConfig::default();
        assert_eq!(cfg.tie_break, TieBreak::LastAdded);
    }

    #[test]
    fn builder_methods() {
        let cfg = IndexConfig::default().with_tie_break(TieBreak::FirstAdded);
        assert_eq!(cfg.tie_break, TieBreak::FirstAdded);
    }
}
