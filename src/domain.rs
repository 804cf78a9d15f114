//! Domain name decomposition.
//!
//! Turns a matched rule (or the lack of one) plus the canonical label
//! sequence into the TLD / Domain / SubDomain split. All slicing is by
//! label index; character offsets never enter the picture, so
//! multi-byte labels cannot produce boundary bugs.

use std::sync::Arc;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::error::Result;
use crate::idn;
use crate::types::{MatchVerdict, Rule, RuleKind};

/// The classified parts of a fully-qualified domain name.
///
/// Constructed once per lookup and immutable afterward. Fields are kept
/// as strings internally with empty meaning absent; the accessors
/// expose them as `Option`s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName {
    sub_domain: String,
    domain: String,
    tld: String,
    matched_rule: Option<Arc<Rule>>,
}

impl DomainName {
    /// Build the decomposition for a resolved verdict.
    ///
    /// `labels` must be the canonical (lowercased, Unicode) label
    /// sequence the verdict was resolved from. When the original input
    /// was punycode, every non-empty field is re-encoded to its
    /// ASCII-compatible form.
    pub(crate) fn from_verdict(
        labels: &[String],
        verdict: &MatchVerdict,
        punycode_origin: bool,
    ) -> Result<Self> {
        let (tld, domain, sub_domain) = decompose(labels, verdict);

        let (tld, domain, sub_domain) = if punycode_origin {
            (
                reencode(&tld)?,
                reencode(&domain)?,
                reencode(&sub_domain)?,
            )
        } else {
            (tld, domain, sub_domain)
        };

        Ok(Self {
            sub_domain,
            domain,
            tld,
            matched_rule: verdict.rule().cloned(),
        })
    }

    /// The subdomain portion, if any.
    pub fn sub_domain(&self) -> Option<&str> {
        non_empty(&self.sub_domain)
    }

    /// The registrable label, without subdomain or TLD.
    pub fn domain(&self) -> Option<&str> {
        non_empty(&self.domain)
    }

    /// The public-suffix portion.
    pub fn tld(&self) -> Option<&str> {
        non_empty(&self.tld)
    }

    /// The rule the classification was based on; `None` when the TLD
    /// was unlisted.
    pub fn matched_rule(&self) -> Option<&Arc<Rule>> {
        self.matched_rule.as_ref()
    }

    /// The domain name portion and TLD, without the subdomain.
    pub fn registrable_domain(&self) -> Option<String> {
        if self.domain.is_empty() || self.tld.is_empty() {
            return None;
        }
        Some(format!("{}.{}", self.domain, self.tld))
    }

    /// The entire combined hostname.
    pub fn hostname(&self) -> Option<String> {
        let parts: Vec<&str> = [&self.sub_domain, &self.domain, &self.tld]
            .into_iter()
            .filter(|part| !part.is_empty())
            .map(String::as_str)
            .collect();

        if parts.is_empty() {
            return None;
        }
        Some(parts.join("."))
    }
}

impl Serialize for DomainName {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("DomainName", 6)?;
        state.serialize_field("sub_domain", &self.sub_domain())?;
        state.serialize_field("domain", &self.domain())?;
        state.serialize_field("tld", &self.tld())?;
        state.serialize_field("registrable_domain", &self.registrable_domain())?;
        state.serialize_field("hostname", &self.hostname())?;
        state.serialize_field("matched_rule", &self.matched_rule.as_deref())?;
        state.end()
    }
}

fn non_empty(s: &str) -> Option<&str> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn reencode(part: &str) -> Result<String> {
    if part.is_empty() {
        return Ok(String::new());
    }
    idn::to_ascii(part)
}

/// Split the labels into (tld, domain, sub_domain) for a verdict.
fn decompose(labels: &[String], verdict: &MatchVerdict) -> (String, String, String) {
    let n = labels.len();
    let empty = || (String::new(), String::new(), String::new());

    match verdict {
        MatchVerdict::Unlisted => {
            // Unrecognized TLD: best-effort split, but only when there
            // are at least two labels to split.
            if n < 2 {
                return empty();
            }
            split_at_suffix(labels, 1)
        }
        MatchVerdict::BestOf(rule) => {
            let tld_len = match rule.kind {
                // The effective suffix extends one label left of the
                // stored wildcard name.
                RuleKind::Wildcard => rule.label_count() + 1,
                _ => rule.label_count(),
            };

            // A wildcard with nothing left of its consumed label has no
            // registrable structure at all.
            if rule.kind == RuleKind::Wildcard && n <= tld_len {
                return empty();
            }
            // A rule longer than the input yields nothing.
            if n < tld_len {
                return empty();
            }

            split_at_suffix(labels, tld_len)
        }
        MatchVerdict::Exception(rule) => {
            // Exception name is `first.rest`: `rest` is forced to be
            // the TLD and `first` the domain, overriding the wildcard.
            let k = rule.label_count();
            if n < k {
                return empty();
            }

            let tld = labels[n - (k - 1)..].join(".");
            let domain = labels[n - k].clone();
            let sub_domain = labels[..n - k].join(".");
            (tld, domain, sub_domain)
        }
    }
}

/// TLD = last `tld_len` labels; the remainder's last label is the
/// domain and everything before it the subdomain.
fn split_at_suffix(labels: &[String], tld_len: usize) -> (String, String, String) {
    let n = labels.len();
    let tld = labels[n - tld_len..].join(".");
    let remainder = &labels[..n - tld_len];

    match remainder.len() {
        0 => (tld, String::new(), String::new()),
        1 => (tld, remainder[0].clone(), String::new()),
        m => (tld, remainder[m - 1].clone(), remainder[..m - 1].join(".")),
    }
}
