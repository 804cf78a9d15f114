//! PSL Engine - A high-performance Public Suffix List (PSL) domain
//! classification engine for Rust
//!
//! This library classifies a fully-qualified domain name into its
//! public-suffix ("TLD"), registrable second-level label, and subdomain
//! prefix, with support for:
//! - Normal, wildcard, and exception suffix rules
//! - Longest-match resolution with exception/wildcard precedence
//! - Internationalized (IDN) and punycode domain names
//! - LRU caching of resolved verdicts for high performance
//!
//! The engine never performs I/O: it consumes rule text or rule lines
//! that the caller has already acquired.
//!
//! # Example
//!
//! ```rust
//! use psl_engine::SuffixEngine;
//!
//! let rules_text = "
//! // ck : https://en.wikipedia.org/wiki/.ck
//! *.ck
//! !www.ck
//! com
//! co.uk
//! ";
//!
//! let engine = SuffixEngine::from_text(rules_text);
//!
//! let name = engine.parse("photos.dropbox.com").unwrap();
//! assert_eq!(name.registrable_domain().as_deref(), Some("dropbox.com"));
//! assert_eq!(name.sub_domain(), Some("photos"));
//!
//! // Exception rules carve names back out of wildcards
//! let name = engine.parse("www.ck").unwrap();
//! assert_eq!(name.registrable_domain().as_deref(), Some("www.ck"));
//!
//! // An unlisted TLD is not an error
//! let name = engine.parse("example.example").unwrap();
//! assert_eq!(name.registrable_domain().as_deref(), Some("example.example"));
//! assert!(name.matched_rule().is_none());
//! ```
//!
//! # Rule Syntax
//!
//! One rule per line, as published at publicsuffix.org:
//!
//! | Form | Example | Description |
//! |------|---------|-------------|
//! | Normal | `co.uk` | The suffix itself is a public suffix |
//! | Wildcard | `*.ck` | Any single label under the suffix is a public suffix |
//! | Exception | `!www.ck` | Carves a name out of a wildcard rule |
//!
//! Longest match wins, measured in labels: the wildcard `*.mm` beats
//! the normal rule `mm` for `c.mm`. Exception rules beat everything.

pub mod cache;
pub mod domain;
pub mod engine;
pub mod error;
pub mod idn;
pub mod matcher;
pub mod parser;
pub mod store;
pub mod types;

// Re-export commonly used items
pub use cache::{LruVerdictCache, NoopVerdictCache, VerdictCache, DEFAULT_CACHE_SIZE};
pub use domain::DomainName;
pub use engine::{RuleFeed, SuffixEngine};
pub use error::{PslError, Result};
pub use parser::{parse_rule_line, parse_rule_lines, parse_rules};
pub use store::RuleStore;
pub use types::{MatchVerdict, Rule, RuleKind};
