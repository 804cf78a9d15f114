use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::cache::{LruVerdictCache, VerdictCache};
use crate::domain::DomainName;
use crate::error::{PslError, Result};
use crate::idn;
use crate::matcher;
use crate::parser;
use crate::store::RuleStore;
use crate::types::MatchVerdict;

/// Rule feed callback: produces the current rule lines on demand.
pub type RuleFeed = Box<dyn Fn() -> Vec<String> + Send + Sync>;

/// Where the engine gets its rules from when (re)building the store.
enum RuleSource {
    /// Pre-filtered rule lines held by the engine
    Lines(Vec<String>),
    /// Raw list text; comments and blank lines are skipped at build time
    Text(String),
    /// Callback invoked on every (re)build
    Feed(RuleFeed),
}

/// Domain classification engine: rule store plus verdict cache.
///
/// This is an explicit context object; construct one and share it
/// (`SuffixEngine` is `Send + Sync`). The rule store is built lazily on
/// first lookup and then reused as an immutable snapshot, so
/// construction itself never pays the parse cost.
///
/// # Example
///
/// ```rust
/// use psl_engine::SuffixEngine;
///
/// let engine = SuffixEngine::from_text("com\nco.uk\n");
/// let name = engine.parse("www.example.co.uk").unwrap();
/// assert_eq!(name.registrable_domain().as_deref(), Some("example.co.uk"));
/// ```
pub struct SuffixEngine {
    source: RuleSource,
    store: RwLock<Option<Arc<RuleStore>>>,
    cache: Box<dyn VerdictCache>,
}

impl SuffixEngine {
    fn with_source(source: RuleSource) -> Self {
        Self {
            source,
            store: RwLock::new(None),
            cache: Box::new(LruVerdictCache::default()),
        }
    }

    /// Create an engine from an already-filtered sequence of rule
    /// lines (no blank or comment lines).
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_source(RuleSource::Lines(
            lines.into_iter().map(Into::into).collect(),
        ))
    }

    /// Create an engine from raw suffix-list text; blank lines and
    /// `//` comments are skipped.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::with_source(RuleSource::Text(text.into()))
    }

    /// Create an engine whose rule lines come from a callback, invoked
    /// on first use and again after every [`reset`](Self::reset).
    pub fn from_feed<F>(feed: F) -> Self
    where
        F: Fn() -> Vec<String> + Send + Sync + 'static,
    {
        Self::with_source(RuleSource::Feed(Box::new(feed)))
    }

    /// Substitute the verdict cache implementation.
    pub fn with_cache(mut self, cache: Box<dyn VerdictCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Use a bounded LRU verdict cache of the given capacity.
    pub fn with_cache_size(self, capacity: usize) -> Self {
        self.with_cache(Box::new(LruVerdictCache::new(capacity)))
    }

    /// Classify a domain name into its TLD / Domain / SubDomain parts.
    ///
    /// Returns [`PslError::EmptyInput`] for blank input and
    /// [`PslError::InvalidIdn`] when punycode decoding or re-encoding
    /// fails. An unrecognized TLD is not an error: the result is a
    /// best-effort decomposition (or an all-empty one) with
    /// `matched_rule() == None`.
    pub fn parse(&self, input: &str) -> Result<DomainName> {
        if input.trim().is_empty() {
            return Err(PslError::EmptyInput);
        }

        // Case folding precedes everything, including punycode
        // detection (`XN--` counts).
        let folded = input.to_lowercase();
        let punycode_origin = idn::is_punycode_origin(&folded);

        // Matching always runs on the Unicode form.
        let canonical = if punycode_origin {
            idn::to_unicode(&folded)?
        } else {
            folded
        };

        let labels = matcher::usable_labels(&canonical);
        let verdict = self.resolve_cached(&canonical, &labels);

        DomainName::from_verdict(&labels, &verdict, punycode_origin)
    }

    /// Non-throwing variant of [`parse`](Self::parse): collapses every
    /// failure to `None`, discarding the cause.
    pub fn try_parse(&self, input: &str) -> Option<DomainName> {
        self.parse(input).ok()
    }

    /// Discard the built rule store and the verdict cache.
    ///
    /// The next lookup rebuilds from the rule source, picking up a
    /// refreshed feed. Lookups already holding the old store snapshot
    /// complete against it undisturbed.
    pub fn reset(&self) {
        *self.store.write() = None;
        self.cache.clear();
        debug!("rule store and verdict cache reset");
    }

    /// Number of indexed rules; forces the lazy build.
    pub fn rule_count(&self) -> usize {
        self.store().len()
    }

    fn resolve_cached(&self, canonical: &str, labels: &[String]) -> MatchVerdict {
        if let Some(verdict) = self.cache.get(canonical) {
            trace!(domain = canonical, "verdict cache hit");
            return verdict;
        }

        let store = self.store();
        let verdict = matcher::resolve(&store, labels);
        self.cache.set(canonical, verdict.clone());
        verdict
    }

    /// Current store snapshot, building it on first use.
    fn store(&self) -> Arc<RuleStore> {
        if let Some(store) = self.store.read().as_ref() {
            return store.clone();
        }

        let mut slot = self.store.write();
        // Double-checked: another caller may have built while we
        // waited for the write lock.
        if let Some(store) = slot.as_ref() {
            return store.clone();
        }

        let store = Arc::new(self.build_store());
        *slot = Some(store.clone());
        store
    }

    fn build_store(&self) -> RuleStore {
        let rules = match &self.source {
            RuleSource::Lines(lines) => parser::parse_rule_lines(lines),
            RuleSource::Text(text) => parser::parse_rules(text),
            RuleSource::Feed(feed) => parser::parse_rule_lines(feed()),
        };

        debug!(rules = rules.len(), "building rule store");
        RuleStore::build(rules)
    }
}
