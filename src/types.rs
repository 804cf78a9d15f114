use std::sync::Arc;

use serde::Serialize;

/// Rule kind from the Public Suffix List grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuleKind {
    /// A normal suffix rule (e.g. `com`, `co.uk`)
    Normal,
    /// A wildcard rule (`*.ck`): any single label under the suffix is
    /// itself a public suffix
    Wildcard,
    /// An exception rule (`!www.ck`): carves a name out of a wildcard,
    /// with absolute priority
    Exception,
}

/// A single parsed suffix rule.
///
/// `name` is stored as it appeared in the feed, minus the kind marker:
/// wildcard rules drop the leading `*.`, exception rules drop the `!`.
/// Case folding happens at store/lookup time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Suffix labels, most-significant label last (e.g. "kobe.jp")
    pub name: String,
    /// The rule kind
    pub kind: RuleKind,
}

impl Rule {
    /// Create a rule directly from its parts.
    pub fn new(name: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Number of dot-separated labels in the stored rule name.
    pub fn label_count(&self) -> usize {
        self.name.split('.').count()
    }

    /// Number of input labels this rule claims when it matches.
    ///
    /// Wildcard rules consume one label beyond their stored name, so
    /// `*.mm` (stored as `mm`) outranks the normal rule `mm`. Longest
    /// match is decided on this value, measured in labels, never in
    /// characters.
    pub fn match_precision(&self) -> usize {
        match self.kind {
            RuleKind::Wildcard => self.label_count() + 1,
            _ => self.label_count(),
        }
    }
}

/// Outcome of resolving a label sequence against the rule store.
///
/// Explicit tagged result instead of thrown "no match" control flow;
/// this is also the value memoized by the verdict cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchVerdict {
    /// An exception rule matched; beats every other candidate
    Exception(Arc<Rule>),
    /// Best normal/wildcard match by label count
    BestOf(Arc<Rule>),
    /// No rule matched
    Unlisted,
}

impl MatchVerdict {
    /// The rule behind this verdict, if any.
    pub fn rule(&self) -> Option<&Arc<Rule>> {
        match self {
            MatchVerdict::Exception(rule) | MatchVerdict::BestOf(rule) => Some(rule),
            MatchVerdict::Unlisted => None,
        }
    }
}
