//! Structured model of a parsed policy document

use serde::ser::Serializer;
use serde::Serialize;
use std::collections::HashSet;

/// A single Allow or Disallow rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rule {
    /// Path pattern, possibly containing `*` wildcards and a trailing `$` anchor
    #[serde(rename = "path")]
    pub pattern: String,

    /// `true` for `Allow`, `false` for `Disallow`
    #[serde(rename = "allowance")]
    pub is_allow: bool,

    /// Position of the rule among all rules of the document (diagnostics only)
    pub source_index: usize,
}

impl Rule {
    /// Directive keyword this rule was declared with
    pub fn keyword(&self) -> &'static str {
        if self.is_allow {
            "Allow"
        } else {
            "Disallow"
        }
    }
}

/// Agent tokens that share one ordered list of rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentGroup {
    #[serde(rename = "user_agent")]
    agents: Vec<String>,
    rules: Vec<Rule>,
    rule_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    crawl_delay: Option<f64>,
}

impl AgentGroup {
    pub(crate) fn new(agents: Vec<String>, rules: Vec<Rule>, crawl_delay: Option<f64>) -> Self {
        let rule_count = rules.len();
        Self {
            agents,
            rules,
            rule_count,
            crawl_delay,
        }
    }

    /// Agent tokens declared for this group, in declaration order
    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    /// Rules of this group, in document order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Last valid `Crawl-delay` declared for this group, in seconds
    pub fn crawl_delay(&self) -> Option<f64> {
        self.crawl_delay
    }

    /// Checks whether the group declares `token` (case-insensitive, exact)
    pub fn has_agent(&self, token: &str) -> bool {
        let token = token.trim().to_lowercase();
        self.agents.iter().any(|agent| agent.to_lowercase() == token)
    }

    /// Checks whether the group is a default (`*`) group
    pub fn is_wildcard(&self) -> bool {
        self.agents.iter().any(|agent| agent == "*")
    }
}

/// Reachability of a declared sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapStatus {
    /// HTTP status code returned by the liveness probe
    Status(u16),
    /// The probe failed at the transport level
    Error,
}

impl Serialize for SitemapStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SitemapStatus::Status(code) => serializer.serialize_u16(*code),
            SitemapStatus::Error => serializer.serialize_str("error"),
        }
    }
}

/// A `Sitemap:` declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub url: String,

    /// `None` until liveness has been checked
    pub status: Option<SitemapStatus>,
}

/// Summary statistics derived from a finished document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_agent_groups: usize,
    pub total_rules: usize,
    pub total_disallow: usize,
    pub unique_disallow: usize,
    pub total_allow: usize,
    pub unique_allow: usize,
}

impl Stats {
    /// Computes statistics over all groups of a document
    ///
    /// Unique counts deduplicate patterns across groups, per rule kind.
    pub fn compute(groups: &[AgentGroup]) -> Self {
        let mut disallow = HashSet::new();
        let mut allow = HashSet::new();
        let mut stats = Stats {
            total_agent_groups: groups.len(),
            ..Stats::default()
        };

        for rule in groups.iter().flat_map(|group| group.rules()) {
            stats.total_rules += 1;
            if rule.is_allow {
                stats.total_allow += 1;
                allow.insert(rule.pattern.as_str());
            } else {
                stats.total_disallow += 1;
                disallow.insert(rule.pattern.as_str());
            }
        }

        stats.unique_disallow = disallow.len();
        stats.unique_allow = allow.len();
        stats
    }
}

/// A parsed policy document
///
/// Built only by the parser; immutable afterwards except for attaching sitemap
/// liveness results, which consumes and returns the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyDocument {
    #[serde(rename = "agent_groups")]
    groups: Vec<AgentGroup>,
    sitemaps: Vec<SitemapEntry>,
    stats: Stats,
}

impl PolicyDocument {
    pub(crate) fn new(groups: Vec<AgentGroup>, sitemaps: Vec<SitemapEntry>) -> Self {
        let stats = Stats::compute(&groups);
        Self {
            groups,
            sitemaps,
            stats,
        }
    }

    /// Agent groups in document order
    pub fn groups(&self) -> &[AgentGroup] {
        &self.groups
    }

    /// Sitemap declarations in document order
    pub fn sitemaps(&self) -> &[SitemapEntry] {
        &self.sitemaps
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// Selects the group that governs `agent`
    ///
    /// The first group naming the agent (case-insensitive, exact) wins; otherwise
    /// the first `*` group; otherwise none.
    pub fn select_group(&self, agent: &str) -> Option<&AgentGroup> {
        self.groups
            .iter()
            .find(|group| group.has_agent(agent))
            .or_else(|| self.groups.iter().find(|group| group.is_wildcard()))
    }

    /// Crawl delay that applies to `agent`, if its group declares one
    pub fn crawl_delay(&self, agent: &str) -> Option<f64> {
        self.select_group(agent).and_then(AgentGroup::crawl_delay)
    }

    /// Attaches liveness results to the sitemap entries, in order
    ///
    /// Entries without a matching status keep `None`.
    pub fn with_sitemap_statuses(mut self, statuses: Vec<SitemapStatus>) -> Self {
        for (entry, status) in self.sitemaps.iter_mut().zip(statuses) {
            entry.status = Some(status);
        }
        self
    }
}
