//! Grouping of indexed oracles for an oracle browser.
//!
//! Oracles are grouped first by ruleset, then by their collection path with
//! nested collection names collapsed into one label (`"Planets > Desert"`).
//! Rulesets, groups and oracles keep the order in which they are first seen.

use indexmap::IndexMap;

use crate::grouping::Oracle;

/// Separator between collection names in a group label.
pub const GROUP_SEPARATOR: &str = " > ";

/// Oracles grouped for browsing.
#[derive(Debug, Default)]
pub struct OracleTree<'a> {
    /// One node per ruleset.
    pub rulesets: Vec<RulesetNode<'a>>,
    /// Number of oracles in the tree.
    pub total: usize,
}

/// All groups belonging to one ruleset.
#[derive(Debug)]
pub struct RulesetNode<'a> {
    /// Ruleset id.
    pub id: String,
    /// Ruleset name.
    pub name: String,
    /// Groups, in first-seen order.
    pub groups: Vec<GroupNode<'a>>,
}

/// Oracles sharing a collection path.
#[derive(Debug)]
pub struct GroupNode<'a> {
    /// Collapsed collection path.
    pub name: String,
    /// Oracles in the group.
    pub oracles: Vec<&'a Oracle>,
}

/// Collapsed group label for an oracle.
pub fn group_label(oracle: &Oracle) -> String {
    oracle.group_path().join(GROUP_SEPARATOR)
}

/// Build the browser tree from a set of oracles.
pub fn oracle_tree<'a>(oracles: impl IntoIterator<Item = &'a Oracle>) -> OracleTree<'a> {
    let mut rulesets: IndexMap<&str, (&str, IndexMap<String, Vec<&'a Oracle>>)> = IndexMap::new();
    let mut total = 0;

    for oracle in oracles {
        let ruleset = oracle.ruleset();
        let (_, groups) = rulesets
            .entry(ruleset.id.as_str())
            .or_insert_with(|| (ruleset.name.as_str(), IndexMap::new()));
        groups.entry(group_label(oracle)).or_default().push(oracle);
        total += 1;
    }

    OracleTree {
        rulesets: rulesets
            .into_iter()
            .map(|(id, (name, groups))| RulesetNode {
                id: id.to_string(),
                name: name.to_string(),
                groups: groups
                    .into_iter()
                    .map(|(name, oracles)| GroupNode { name, oracles })
                    .collect(),
            })
            .collect(),
        total,
    }
}
