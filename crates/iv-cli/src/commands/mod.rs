pub mod check;
pub mod conflicts;
pub mod list;
pub mod oracles;
pub mod roll;
pub mod show;

use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use iv_datasworn::{Datastore, RulesPackage};
use iv_index::{IndexConfig, RULESET_TAG, Source, TieBreak};
use strsim::jaro_winkler;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "IV_LOG";

/// Tag recording whether a source is built-in or homebrew.
pub const ORIGIN_TAG: &str = "origin";

const BUILTIN: &str = "builtin";
const HOMEBREW: &str = "homebrew";

/// Minimum Jaro-Winkler score for an id suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Install the stderr log subscriber.
///
/// `-v` forces debug output; otherwise `IV_LOG` is honoured and warnings are
/// shown by default.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Which packages to load and how to rank them.
#[derive(Debug, Clone, Default)]
pub struct LoadConfig {
    sources: Vec<PathBuf>,
    homebrew: Option<PathBuf>,
    builtin_priority: i32,
    homebrew_priority: i32,
    first_wins: bool,
}

impl LoadConfig {
    pub fn new() -> Self {
        Self {
            homebrew_priority: 1,
            ..Self::default()
        }
    }

    pub fn with_sources(mut self, sources: Vec<PathBuf>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_homebrew(mut self, dir: Option<PathBuf>) -> Self {
        self.homebrew = dir;
        self
    }

    pub fn with_builtin_priority(mut self, priority: i32) -> Self {
        self.builtin_priority = priority;
        self
    }

    pub fn with_homebrew_priority(mut self, priority: i32) -> Self {
        self.homebrew_priority = priority;
        self
    }

    pub fn with_first_wins(mut self, first_wins: bool) -> Self {
        self.first_wins = first_wins;
        self
    }

    fn index_config(&self) -> IndexConfig {
        let tie_break = if self.first_wins {
            TieBreak::FirstAdded
        } else {
            TieBreak::LastAdded
        };
        IndexConfig::default().with_tie_break(tie_break)
    }
}

/// A source that made it into the datastore.
pub struct LoadedSource {
    pub path: String,
    pub origin: &'static str,
    pub priority: i32,
    pub package: String,
    pub records: usize,
}

/// Result of loading every configured package.
pub struct Loaded {
    pub store: Datastore,
    pub sources: Vec<LoadedSource>,
    pub skipped: usize,
}

/// Load built-in packages, then homebrew packages, into one datastore.
///
/// Documents that cannot be read, parsed or walked are skipped with a
/// warning. Fails only when nothing was requested or the homebrew directory
/// cannot be listed.
fn load(config: &LoadConfig) -> Result<Loaded, String> {
    if config.sources.is_empty() && config.homebrew.is_none() {
        return Err("no rules packages given; pass --source FILE or --homebrew DIR".into());
    }

    let mut loaded = Loaded {
        store: Datastore::with_config(config.index_config()),
        sources: Vec::new(),
        skipped: 0,
    };

    for path in &config.sources {
        loaded.load_file(path, BUILTIN, config.builtin_priority);
    }
    if let Some(dir) = &config.homebrew {
        for path in homebrew_files(dir)? {
            loaded.load_file(&path, HOMEBREW, config.homebrew_priority);
        }
    }

    Ok(loaded)
}

/// Every `*.json` file in a directory, sorted by path.
fn homebrew_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir)
        .map_err(|e| format!("cannot read homebrew directory {}: {e}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

impl Loaded {
    fn load_file(&mut self, path: &Path, origin: &'static str, priority: i32) {
        let shown = path.display().to_string();

        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                warn!(path = %shown, error = %e, "skipping unreadable package");
                self.skipped += 1;
                return;
            }
        };

        let package = match RulesPackage::from_json(&text) {
            Ok(package) => package,
            Err(e) => {
                warn!(path = %shown, error = %e, "skipping malformed package");
                self.skipped += 1;
                return;
            }
        };

        let ruleset = package.ruleset.as_deref().unwrap_or(&package.id);
        let source = Source::new(shown.clone())
            .with_priority(priority)
            .with_tag(RULESET_TAG, ruleset)
            .with_tag(ORIGIN_TAG, origin)
            .shared();

        match self.store.ingest(&source, &package) {
            Ok(records) => {
                debug!(path = %shown, origin, priority, records, "package loaded");
                self.sources.push(LoadedSource {
                    path: shown,
                    origin,
                    priority,
                    package: package.id.clone(),
                    records,
                });
            }
            Err(e) => {
                warn!(path = %shown, error = %e, "skipping package");
                self.skipped += 1;
            }
        }
    }
}

/// Ids close to `id`, best match first.
fn suggestions<'a>(id: &str, ids: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut scored: Vec<(f64, &str)> = ids
        .map(|candidate| (jaro_winkler(id, candidate), candidate))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(3).map(|(_, c)| c).collect()
}

/// Error message for an id with no record, with suggestions when any exist.
fn not_found(store: &Datastore, id: &str) -> String {
    let close = suggestions(id, store.index().ids());
    if close.is_empty() {
        format!("no record with id \"{id}\"")
    } else {
        format!("no record with id \"{id}\" (did you mean: {}?)", close.join(", "))
    }
}

fn plural(n: usize, word: &str) -> String {
    format!("{n} {word}{}", if n == 1 { "" } else { "s" })
}
