use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::types::{Rule, RuleKind};

/// Immutable index of parsed suffix rules, partitioned by kind.
///
/// Keys are lowercased rule names, giving case-insensitive O(1) lookup.
/// Built once and never mutated; share it behind an `Arc` for unlimited
/// concurrent reads.
#[derive(Debug, Default)]
pub struct RuleStore {
    normal: HashMap<String, Arc<Rule>>,
    wildcard: HashMap<String, Arc<Rule>>,
    exception: HashMap<String, Arc<Rule>>,
}

impl RuleStore {
    /// Build the index from a parsed rule sequence.
    ///
    /// Duplicate names within a kind overwrite earlier entries (the
    /// source list has one rule per name, so last write wins).
    pub fn build(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut store = Self::default();

        for rule in rules {
            let key = rule.name.to_lowercase();
            store.map_mut(rule.kind).insert(key, Arc::new(rule));
        }

        debug!(
            normal = store.normal.len(),
            wildcard = store.wildcard.len(),
            exception = store.exception.len(),
            "built rule store"
        );

        store
    }

    /// Exact-name lookup within one kind.
    ///
    /// `name` must already be lowercased; keys are stored lowercased at
    /// build time.
    pub fn lookup(&self, kind: RuleKind, name: &str) -> Option<Arc<Rule>> {
        self.map(kind).get(name).cloned()
    }

    /// Total number of indexed rules across all kinds.
    pub fn len(&self) -> usize {
        self.normal.len() + self.wildcard.len() + self.exception.len()
    }

    /// Check if the store holds no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn map(&self, kind: RuleKind) -> &HashMap<String, Arc<Rule>> {
        match kind {
            RuleKind::Normal => &self.normal,
            RuleKind::Wildcard => &self.wildcard,
            RuleKind::Exception => &self.exception,
        }
    }

    fn map_mut(&mut self, kind: RuleKind) -> &mut HashMap<String, Arc<Rule>> {
        match kind {
            RuleKind::Normal => &mut self.normal,
            RuleKind::Wildcard => &mut self.wildcard,
            RuleKind::Exception => &mut self.exception,
        }
    }
}
