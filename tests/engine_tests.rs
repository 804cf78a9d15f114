//! Engine-level integration tests: cache coherence, reset semantics,
//! concurrent access, and the serialized result shape.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use psl_engine::{NoopVerdictCache, SuffixEngine};

fn fixture_rules() -> Vec<&'static str> {
    vec![
        "com",
        "org",
        "pm",
        "uk",
        "co.uk",
        "jp",
        "*.kobe.jp",
        "!city.kobe.jp",
        "*.ck",
        "!www.ck",
        "公司.cn",
        "cn",
    ]
}

fn engine() -> SuffixEngine {
    SuffixEngine::from_lines(fixture_rules())
}

#[test]
fn test_repeated_lookup_is_field_identical() {
    let engine = engine();

    let cold = engine.parse("tutorial.keefox.org").unwrap();
    let warm = engine.parse("tutorial.keefox.org").unwrap();
    let third = engine.parse("tutorial.keefox.org").unwrap();

    assert_eq!(cold, warm);
    assert_eq!(warm, third);
    assert_eq!(cold.registrable_domain().as_deref(), Some("keefox.org"));
}

#[test]
fn test_repeated_unlisted_lookup_is_identical() {
    let engine = engine();

    let first = engine.parse("www.kee.notatld").unwrap();
    let second = engine.parse("www.kee.notatld").unwrap();

    assert_eq!(first, second);
    assert_eq!(first.registrable_domain().as_deref(), Some("kee.notatld"));
    assert!(first.matched_rule().is_none());
}

#[test]
fn test_cached_path_equals_uncached_path() {
    // The same lookups through a no-op cache must produce exactly what
    // the memoized engine produces.
    let cached = engine();
    let uncached = engine().with_cache(Box::new(NoopVerdictCache));

    for input in [
        "www.kee.pm",
        "a.b.c.kobe.jp",
        "city.kobe.jp",
        "www.ck",
        "test.ck",
        "食狮.公司.cn",
        "xn--85x722f.xn--55qx5d.cn",
        "unknown.example",
    ] {
        // Twice against the cached engine so the second hit comes from
        // the cache.
        let first = cached.parse(input).unwrap();
        let second = cached.parse(input).unwrap();
        let reference = uncached.parse(input).unwrap();
        assert_eq!(first, reference, "cold mismatch for {:?}", input);
        assert_eq!(second, reference, "cache-hit mismatch for {:?}", input);
    }
}

#[test]
fn test_reset_rebuilds_from_feed() {
    let lines = Arc::new(Mutex::new(vec!["com".to_string(), "uk".to_string()]));
    let feed_lines = lines.clone();
    let engine = SuffixEngine::from_feed(move || feed_lines.lock().clone());

    // "co.uk" is unknown, so the best match is the one-label rule "uk"
    let name = engine.parse("example.co.uk").unwrap();
    assert_eq!(name.registrable_domain().as_deref(), Some("co.uk"));

    lines.lock().push("co.uk".to_string());
    engine.reset();

    let name = engine.parse("example.co.uk").unwrap();
    assert_eq!(name.registrable_domain().as_deref(), Some("example.co.uk"));
}

#[test]
fn test_reset_clears_verdict_cache() {
    let lines = Arc::new(Mutex::new(vec!["com".to_string()]));
    let feed_lines = lines.clone();
    let engine = SuffixEngine::from_feed(move || feed_lines.lock().clone());

    // Prime the cache with an unlisted verdict
    let name = engine.parse("example.org").unwrap();
    assert!(name.matched_rule().is_none());

    lines.lock().push("org".to_string());
    engine.reset();

    // A stale cached verdict would still say unlisted
    let name = engine.parse("example.org").unwrap();
    assert_eq!(name.matched_rule().unwrap().name, "org");
}

#[test]
fn test_concurrent_lookups() {
    let engine = Arc::new(engine());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let name = engine.parse("photos.example.co.uk").unwrap();
                    assert_eq!(
                        name.registrable_domain().as_deref(),
                        Some("example.co.uk"),
                        "thread {} observed a wrong decomposition",
                        i
                    );
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_lookups_with_reset() {
    let engine = Arc::new(engine());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let name = engine.parse("www.city.kobe.jp").unwrap();
                    assert_eq!(
                        name.registrable_domain().as_deref(),
                        Some("city.kobe.jp")
                    );
                }
            })
        })
        .collect();

    let resetter = {
        let engine = engine.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                engine.reset();
            }
        })
    };

    for handle in readers {
        handle.join().unwrap();
    }
    resetter.join().unwrap();
}

#[test]
fn test_punycode_round_trip() {
    let engine = engine();

    let unicode = engine.parse("食狮.公司.cn").unwrap();
    let punycoded = engine.parse("xn--85x722f.xn--55qx5d.cn").unwrap();

    // Same rule classifies both
    assert_eq!(
        unicode.matched_rule().unwrap().name,
        punycoded.matched_rule().unwrap().name
    );

    // Unicode in, Unicode out; punycode in, punycode out
    assert_eq!(
        unicode.registrable_domain().as_deref(),
        Some("食狮.公司.cn")
    );
    assert_eq!(
        punycoded.registrable_domain().as_deref(),
        Some("xn--85x722f.xn--55qx5d.cn")
    );
}

#[test]
fn test_uppercase_punycode_detected() {
    let engine = engine();
    let name = engine.parse("XN--85X722F.XN--55QX5D.CN").unwrap();
    assert_eq!(
        name.registrable_domain().as_deref(),
        Some("xn--85x722f.xn--55qx5d.cn")
    );
}

#[test]
fn test_hostname_reassembles_input() {
    let engine = engine();
    let name = engine.parse("a.b.example.co.uk").unwrap();
    assert_eq!(name.hostname().as_deref(), Some("a.b.example.co.uk"));

    // A bare suffix still reports a hostname
    let name = engine.parse("co.uk").unwrap();
    assert_eq!(name.hostname().as_deref(), Some("co.uk"));
    assert_eq!(name.registrable_domain(), None);
}

#[test]
fn test_serialized_result_shape() {
    let engine = engine();
    let name = engine.parse("downloads.luckyrat.co.uk").unwrap();

    let json = serde_json::to_value(&name).unwrap();
    assert_eq!(json["sub_domain"], "downloads");
    assert_eq!(json["domain"], "luckyrat");
    assert_eq!(json["tld"], "co.uk");
    assert_eq!(json["registrable_domain"], "luckyrat.co.uk");
    assert_eq!(json["hostname"], "downloads.luckyrat.co.uk");
    assert_eq!(json["matched_rule"]["name"], "co.uk");
    assert_eq!(json["matched_rule"]["kind"], "Normal");

    // Absent fields serialize as null
    let name = engine.parse("com").unwrap();
    let json = serde_json::to_value(&name).unwrap();
    assert_eq!(json["domain"], serde_json::Value::Null);
    assert_eq!(json["registrable_domain"], serde_json::Value::Null);
}

#[test]
fn test_try_parse_never_errors() {
    let engine = engine();
    assert!(engine.try_parse("").is_none());
    assert!(engine.try_parse("   ").is_none());
    assert!(engine.try_parse("example.com").is_some());
    // Leading dot parses to an all-empty result, not a failure
    let name = engine.try_parse(".example.com").unwrap();
    assert_eq!(name.registrable_domain(), None);
    assert_eq!(name.hostname(), None);
}
