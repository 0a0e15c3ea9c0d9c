use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{IndexConfig, TieBreak};
use crate::error::{IndexError, IndexResult};
use crate::source::Source;
use crate::sourced::{Kinded, Sourced};

/// A registered source and the ids it last contributed.
#[derive(Debug)]
struct Registration {
    source: Arc<Source>,
    keys: BTreeSet<String>,
}

/// All candidates for one id, in insertion order, plus the current winner.
///
/// An entry is never empty: it is dropped as soon as its last candidate is.
struct Entry<V: Kinded> {
    candidates: Vec<Sourced<V>>,
    winner: usize,
}

impl<V: Kinded> Entry<V> {
    fn winner(&self) -> &Sourced<V> {
        &self.candidates[self.winner]
    }

    fn winner_kind(&self) -> Option<V::Kind> {
        self.candidates.get(self.winner).map(Sourced::kind)
    }

    fn resolve(&mut self, tie_break: TieBreak) {
        self.winner = pick_winner(&self.candidates, tie_break).unwrap_or(0);
    }
}

/// Highest priority wins; equal priorities fall back to insertion order.
fn pick_winner<V: Kinded>(candidates: &[Sourced<V>], tie_break: TieBreak) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, candidate) in candidates.iter().enumerate() {
        best = match best {
            None => Some(i),
            Some(b) => {
                let current = candidates[b].priority();
                let challenger = candidate.priority();
                let takes_over = challenger > current
                    || (challenger == current && tie_break == TieBreak::LastAdded);
                Some(if takes_over { i } else { b })
            }
        };
    }
    best
}

/// Store of records contributed by many sources, keyed by record id.
///
/// Every id may have one candidate per source. Reads always see the winner
/// chosen by priority (see [`TieBreak`] for equal priorities). Each mutation
/// updates every affected entry before returning, so reads between mutations
/// observe a consistent state. The indexer is not internally synchronized.
pub struct DataIndexer<V: Kinded> {
    config: IndexConfig,
    sources: BTreeMap<String, Registration>,
    entries: BTreeMap<String, Entry<V>>,

    // Ids whose current winner has the given kind
    by_kind: HashMap<V::Kind, BTreeSet<String>>,
}

impl<V: Kinded> Default for DataIndexer<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Kinded> fmt::Debug for DataIndexer<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataIndexer")
            .field("config", &self.config)
            .field("sources", &self.sources.len())
            .field("entries", &self.entries.len())
            .finish()
    }
}

impl<V: Kinded> DataIndexer<V> {
    /// Create an empty indexer with the default configuration.
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// Create an empty indexer with a custom configuration.
    pub fn with_config(config: IndexConfig) -> Self {
        Self {
            config,
            sources: BTreeMap::new(),
            entries: BTreeMap::new(),
            by_kind: HashMap::new(),
        }
    }

    /// The configuration this indexer was built with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Add every record contributed by `source`.
    ///
    /// Fails if the source path is still registered with records, or if a
    /// record carries a different source. The batch is validated in full
    /// before anything is touched, so a failed call leaves the index as it
    /// was. A later record replaces an earlier one with the same id.
    pub fn add_source(
        &mut self,
        source: &Arc<Source>,
        records: impl IntoIterator<Item = Sourced<V>>,
    ) -> IndexResult<()> {
        if let Some(existing) = self.sources.get(&source.path)
            && !existing.keys.is_empty()
        {
            return Err(IndexError::DuplicateSource {
                path: source.path.clone(),
            });
        }

        let mut batch: BTreeMap<String, Sourced<V>> = BTreeMap::new();
        for record in records {
            if record.source.as_ref() != source.as_ref() {
                return Err(IndexError::SourceMismatch {
                    id: record.id,
                    expected: source.path.clone(),
                    found: record.source.path.clone(),
                });
            }
            batch.insert(record.id.clone(), record);
        }

        let keys: BTreeSet<String> = batch.keys().cloned().collect();
        for (id, record) in batch {
            self.insert_candidate(id, record);
        }

        debug!(
            path = %source.path,
            priority = source.priority,
            records = keys.len(),
            "source added"
        );
        self.sources.insert(
            source.path.clone(),
            Registration {
                source: Arc::clone(source),
                keys,
            },
        );
        Ok(())
    }

    /// Remove every record contributed by the source registered at `path`.
    ///
    /// Returns the number of ids that source contributed. Removing an unknown
    /// or already removed source is a no-op returning 0.
    pub fn remove_source(&mut self, path: &str) -> usize {
        let Some(registration) = self.sources.remove(path) else {
            return 0;
        };

        let tie_break = self.config.tie_break;
        for id in &registration.keys {
            let Some(entry) = self.entries.get_mut(id) else {
                continue;
            };
            let before = entry.winner_kind();
            entry.candidates.retain(|c| c.source.path != path);
            entry.resolve(tie_break);
            let after = entry.winner_kind();
            if entry.candidates.is_empty() {
                self.entries.remove(id);
            }
            self.move_kind(id, before, after);
        }

        debug!(path, records = registration.keys.len(), "source removed");
        registration.keys.len()
    }

    fn insert_candidate(&mut self, id: String, record: Sourced<V>) {
        let tie_break = self.config.tie_break;
        let entry = self.entries.entry(id.clone()).or_insert_with(|| Entry {
            candidates: Vec::new(),
            winner: 0,
        });
        let before = entry.winner_kind();
        let previous_winner = entry.candidates.get(entry.winner).map(|c| c.source.path.clone());
        entry.candidates.push(record);
        entry.resolve(tie_break);

        if let Some(previous) = previous_winner
            && previous != entry.winner().source.path
        {
            trace!(%id, from = %previous, to = %entry.winner().source.path, "winner changed");
        }
        let after = entry.winner_kind();
        self.move_kind(&id, before, after);
    }

    fn move_kind(&mut self, id: &str, before: Option<V::Kind>, after: Option<V::Kind>) {
        if before == after {
            return;
        }
        if let Some(kind) = before
            && let Some(ids) = self.by_kind.get_mut(&kind)
        {
            ids.remove(id);
            if ids.is_empty() {
                self.by_kind.remove(&kind);
            }
        }
        if let Some(kind) = after {
            self.by_kind.entry(kind).or_default().insert(id.to_string());
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// The winning record for an id.
    pub fn get(&self, id: &str) -> Option<&Sourced<V>> {
        self.entries.get(id).map(Entry::winner)
    }

    /// Whether any source contributes the id.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// All winners of a kind, ordered by id.
    ///
    /// The iterator is `Clone`, so it can be restarted; the order is stable
    /// until the next mutation.
    pub fn by_kind(&self, kind: V::Kind) -> impl Iterator<Item = &Sourced<V>> + Clone {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .filter_map(|id| self.entries.get(id))
            .map(Entry::winner)
    }

    /// Every candidate for an id, winner first, then by descending priority.
    ///
    /// Equal priorities are listed in the order the tie-break policy prefers
    /// them. Returns an empty list for an unknown id.
    pub fn conflicts(&self, id: &str) -> Vec<&Sourced<V>> {
        let Some(entry) = self.entries.get(id) else {
            return Vec::new();
        };
        let mut ordered: Vec<&Sourced<V>> = entry.candidates.iter().collect();
        if self.config.tie_break == TieBreak::LastAdded {
            ordered.reverse();
        }
        ordered.sort_by_key(|c| std::cmp::Reverse(c.priority()));
        ordered
    }

    /// All winners, ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Sourced<V>> + Clone {
        self.entries.values().map(Entry::winner)
    }

    /// All indexed ids, in order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // -----------------------------------------------------------------------
    // Sources
    // -----------------------------------------------------------------------

    /// All registered sources, ordered by path.
    pub fn sources(&self) -> impl Iterator<Item = &Arc<Source>> {
        self.sources.values().map(|r| &r.source)
    }

    /// The source registered at a path.
    pub fn source(&self, path: &str) -> Option<&Arc<Source>> {
        self.sources.get(path).map(|r| &r.source)
    }

    /// The ids last contributed by the source registered at a path.
    pub fn keys(&self, path: &str) -> Option<&BTreeSet<String>> {
        self.sources.get(path).map(|r| &r.keys)
    }
}
