use crate::types::{Rule, RuleKind};

/// Parse a single rule line from the Public Suffix List.
///
/// Grammar:
/// - `!name` → exception rule, name keeps its full label sequence
/// - `*.name` → wildcard rule, name excludes the wildcard label
/// - anything else → normal rule, the whole line is the name
///
/// No further validation: malformed lines are accepted verbatim, and
/// case folding happens at lookup time, so this never fails.
pub fn parse_rule_line(line: &str) -> Rule {
    if let Some(name) = line.strip_prefix('!') {
        Rule::new(name, RuleKind::Exception)
    } else if let Some(name) = line.strip_prefix("*.") {
        Rule::new(name, RuleKind::Wildcard)
    } else {
        Rule::new(line, RuleKind::Normal)
    }
}

/// Parse an already-filtered sequence of rule lines.
pub fn parse_rule_lines<I, S>(lines: I) -> Vec<Rule>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| parse_rule_line(line.as_ref()))
        .collect()
}

/// Parse suffix rules from raw list text.
///
/// Skips blank lines and `//` comment lines, so a PSL snapshot already
/// held in memory can be fed directly.
pub fn parse_rules(text: &str) -> Vec<Rule> {
    let mut rules = Vec::new();

    for line in text.lines() {
        let line = line.trim();

        // Skip empty and comment lines
        if line.is_empty() || line.starts_with("//") {
            continue;
        }

        rules.push(parse_rule_line(line));
    }

    rules
}
