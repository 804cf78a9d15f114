//! Suffix rule resolution.
//!
//! The matcher is a pure function over an immutable [`RuleStore`] and a
//! canonical (lowercased, Unicode) label sequence. Probes run shortest
//! suffix first, so for `a.b.co.uk` the lookups are `uk`, `co.uk`,
//! `b.co.uk`, `a.b.co.uk`.

use std::sync::Arc;

use crate::store::RuleStore;
use crate::types::{MatchVerdict, Rule, RuleKind};

/// Reserved non-Internet suffix, never consulted against the rule
/// tables.
const LOCAL_TLD: &str = "local";

/// Split a canonical input into the labels usable for matching.
///
/// Inputs starting with `.` and inputs whose rightmost label is
/// `local` yield no usable labels: no rule can match them and the
/// decomposition stays all-empty.
pub fn usable_labels(canonical: &str) -> Vec<String> {
    if canonical.starts_with('.') {
        return Vec::new();
    }

    let labels: Vec<String> = canonical.split('.').map(str::to_string).collect();

    if labels.last().map(String::as_str) == Some(LOCAL_TLD) {
        return Vec::new();
    }

    labels
}

/// Resolve a label sequence to its best-matching rule.
///
/// Exception rules have absolute priority: the first (shortest-suffix)
/// exception hit returns immediately. Normal and wildcard hits are
/// collected over every probe length and the one claiming the most
/// input labels wins. Ties are arbitrary: the list guarantees name
/// uniqueness within a kind, and equal-precision candidates of
/// different kinds decompose identically.
pub fn resolve(store: &RuleStore, labels: &[String]) -> MatchVerdict {
    let mut candidates: Vec<Arc<Rule>> = Vec::new();
    let mut probe = String::new();

    for label in labels.iter().rev() {
        if probe.is_empty() {
            probe = label.clone();
        } else {
            probe = format!("{label}.{probe}");
        }

        if let Some(rule) = store.lookup(RuleKind::Exception, &probe) {
            return MatchVerdict::Exception(rule);
        }

        if let Some(rule) = store.lookup(RuleKind::Normal, &probe) {
            candidates.push(rule);
        }
        if let Some(rule) = store.lookup(RuleKind::Wildcard, &probe) {
            candidates.push(rule);
        }
    }

    match candidates.into_iter().max_by_key(|rule| rule.match_precision()) {
        Some(rule) => MatchVerdict::BestOf(rule),
        None => MatchVerdict::Unlisted,
    }
}
