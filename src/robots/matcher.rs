//! Permission decisions for a parsed policy document
//!
//! Group selection picks the first group naming the agent, falling back to the
//! first `*` group. Within that group the matching rule with the longest pattern
//! wins, Allow wins ties, and a path no rule matches is allowed.

use crate::robots::model::{PolicyDocument, Rule};
use crate::url::{encode_path, request_path};
use crate::UrlResult;

/// Outcome of evaluating one path for one agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision<'a> {
    pub allowed: bool,

    /// The rule that decided the outcome, or `None` for the default allow
    pub matched: Option<&'a Rule>,
}

/// Returns whether `agent` may crawl `path` under `document`
///
/// `path` is a request path; anything after `?` or `#` is ignored. Paths and rule
/// patterns are compared percent-encoded, so `/a b` and `/a%20b` are the same path.
pub fn decide(document: &PolicyDocument, agent: &str, path: &str) -> bool {
    evaluate(document, agent, path).allowed
}

/// Like [`decide`], but accepts absolute URLs as well as paths
///
/// # Returns
///
/// * `Ok(bool)` - The decision
/// * `Err(UrlError)` - The URL could not be reduced to a request path
pub fn is_allowed(document: &PolicyDocument, agent: &str, url: &str) -> UrlResult<bool> {
    let path = request_path(url)?;
    Ok(decide(document, agent, &path))
}

/// Evaluates `path` for `agent` and reports which rule decided it
pub fn evaluate<'a>(document: &'a PolicyDocument, agent: &str, path: &str) -> Decision<'a> {
    let path = encode_path(strip_query(path));
    let Some(group) = document.select_group(agent) else {
        return Decision {
            allowed: true,
            matched: None,
        };
    };

    let mut best: Option<(usize, &Rule)> = None;
    for rule in group.rules() {
        if !pattern_matches(&encode_path(&rule.pattern), &path) {
            continue;
        }
        let length = rule.pattern.chars().count();
        let wins = match best {
            None => true,
            Some((best_length, best_rule)) => {
                length > best_length || (length == best_length && rule.is_allow && !best_rule.is_allow)
            }
        };
        if wins {
            best = Some((length, rule));
        }
    }

    match best {
        Some((_, rule)) => Decision {
            allowed: rule.is_allow,
            matched: Some(rule),
        },
        None => Decision {
            allowed: true,
            matched: None,
        },
    }
}

fn strip_query(path: &str) -> &str {
    path.find(|c: char| c == '?' || c == '#')
        .map_or(path, |end| &path[..end])
}

/// Checks whether a rule pattern matches a request path
///
/// Matching is a prefix match where `*` stands for any run of characters and a
/// trailing `$` requires the path to end where the pattern ends. Wildcards at the
/// very end of the pattern (before any `$`) add nothing and are dropped, so
/// `/private/*$` anchors on `/private/`. An empty pattern matches nothing.
pub fn pattern_matches(pattern: &str, path: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }

    let (body, anchored) = match pattern.strip_suffix('$') {
        Some(body) => (body, true),
        None => (pattern, false),
    };
    let body = body.trim_end_matches('*');
    let path = path.as_bytes();

    // Every offset in `path` at which the pattern consumed so far can end.
    let mut ends: Vec<usize> = vec![0];
    for &byte in body.as_bytes() {
        if byte == b'*' {
            let start = ends[0];
            ends = (start..=path.len()).collect();
        } else {
            ends = ends
                .into_iter()
                .filter(|&end| path.get(end) == Some(&byte))
                .map(|end| end + 1)
                .collect();
        }
        if ends.is_empty() {
            return false;
        }
    }

    !anchored || ends.contains(&path.len())
}
