//! Robots.txt parser implementation
//!
//! Single pass over the significant lines of a document, building agent groups with an
//! explicit builder. Consecutive `User-agent` lines share one group; a `User-agent`
//! line that follows a rule always opens a new group.

use crate::robots::directive::{significant_lines, Directive};
use crate::robots::model::{AgentGroup, PolicyDocument, Rule, SitemapEntry};

/// Parses policy text into a [`PolicyDocument`]
///
/// Parsing never fails: unrecognized lines are ignored here and reported by
/// [`lint`](crate::robots::lint) instead. Sitemap liveness is left unresolved.
///
/// # Example
///
/// ```
/// use robots_lens::robots::parse_policy;
///
/// let doc = parse_policy("User-agent: *\nDisallow: /admin");
/// assert_eq!(doc.groups().len(), 1);
/// assert_eq!(doc.stats().total_disallow, 1);
/// ```
pub fn parse_policy(content: &str) -> PolicyDocument {
    let mut builder = DocumentBuilder::default();

    for (line_number, line) in significant_lines(content) {
        let Some((directive, value)) = Directive::recognize(line) else {
            continue;
        };

        match directive {
            Directive::UserAgent => builder.user_agent(value),
            Directive::Disallow => builder.rule(value, false),
            Directive::Allow => builder.rule(value, true),
            Directive::Sitemap => builder.sitemap(value),
            Directive::CrawlDelay => match value.parse::<f64>() {
                Ok(delay) if delay.is_finite() && delay >= 0.0 => builder.crawl_delay(delay),
                _ => tracing::debug!("Ignoring invalid Crawl-delay on line {}", line_number),
            },
        }
    }

    builder.finish()
}

/// Group still accepting agents and rules
#[derive(Debug, Default)]
struct PendingGroup {
    agents: Vec<String>,
    rules: Vec<Rule>,
    crawl_delay: Option<f64>,
}

impl PendingGroup {
    fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.rules.is_empty() && self.crawl_delay.is_none()
    }

    fn add_agent(&mut self, token: &str) {
        let lowered = token.to_lowercase();
        if !self.agents.iter().any(|agent| agent.to_lowercase() == lowered) {
            self.agents.push(token.to_string());
        }
    }

    fn close(self) -> AgentGroup {
        AgentGroup::new(self.agents, self.rules, self.crawl_delay)
    }
}

#[derive(Debug, Default)]
struct DocumentBuilder {
    groups: Vec<AgentGroup>,
    pending: PendingGroup,
    sitemaps: Vec<SitemapEntry>,
    rule_count: usize,
}

impl DocumentBuilder {
    fn user_agent(&mut self, token: &str) {
        if !self.pending.rules.is_empty() {
            self.close_pending();
        }
        self.pending.add_agent(token);
    }

    fn rule(&mut self, pattern: &str, is_allow: bool) {
        self.pending.rules.push(Rule {
            pattern: pattern.to_string(),
            is_allow,
            source_index: self.rule_count,
        });
        self.rule_count += 1;
    }

    fn crawl_delay(&mut self, delay: f64) {
        self.pending.crawl_delay = Some(delay);
    }

    fn sitemap(&mut self, url: &str) {
        self.sitemaps.push(SitemapEntry {
            url: url.to_string(),
            status: None,
        });
    }

    fn close_pending(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        self.groups.push(pending.close());
    }

    fn finish(mut self) -> PolicyDocument {
        if !self.pending.is_empty() {
            self.close_pending();
        }
        PolicyDocument::new(self.groups, self.sitemaps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_group() {
        let doc = parse_policy("User-agent: *\nDisallow: /admin\nAllow: /admin/public");
        assert_eq!(doc.groups().len(), 1);

        let group = &doc.groups()[0];
        assert_eq!(group.agents(), ["*"]);
        assert_eq!(group.rules().len(), 2);
        assert_eq!(group.rules()[0].pattern, "/admin");
        assert!(!group.rules()[0].is_allow);
        assert_eq!(group.rules()[1].pattern, "/admin/public");
        assert!(group.rules()[1].is_allow);
        assert_eq!(group.rules()[1].source_index, 1);
    }

    #[test]
    fn test_consecutive_agents_share_group() {
        let doc = parse_policy("User-agent: A\nUser-agent: B\nDisallow: /x\nUser-agent: C\nAllow: /");
        assert_eq!(doc.groups().len(), 2);
        assert_eq!(doc.groups()[0].agents(), ["A", "B"]);
        assert_eq!(doc.groups()[0].rules().len(), 1);
        assert_eq!(doc.groups()[1].agents(), ["C"]);
    }

    #[test]
    fn test_repeated_agent_after_rule_starts_new_group() {
        let doc = parse_policy("User-agent: A\nDisallow: /x\nUser-agent: A\nDisallow: /y");
        assert_eq!(doc.groups().len(), 2);
        assert_eq!(doc.groups()[1].rules()[0].pattern, "/y");
    }

    #[test]
    fn test_blank_lines_do_not_split_groups() {
        let doc = parse_policy("User-agent: A\n\n# note\nUser-agent: B\nDisallow: /x");
        assert_eq!(doc.groups().len(), 1);
        assert_eq!(doc.groups()[0].agents().len(), 2);
    }

    #[test]
    fn test_trailing_agents_without_rules_kept() {
        let doc = parse_policy("User-agent: A\nDisallow: /x\nUser-agent: B");
        assert_eq!(doc.groups().len(), 2);
        assert!(doc.groups()[1].rules().is_empty());
    }

    #[test]
    fn test_rules_before_any_agent_form_their_own_group() {
        let doc = parse_policy("Disallow: /orphan\nUser-agent: A\nDisallow: /x");
        assert_eq!(doc.groups().len(), 2);
        assert!(doc.groups()[0].agents().is_empty());
        assert_eq!(doc.groups()[1].agents(), ["A"]);
    }

    #[test]
    fn test_empty_disallow_is_recorded() {
        let doc = parse_policy("User-agent: *\nDisallow:");
        assert_eq!(doc.groups()[0].rules()[0].pattern, "");
    }

    #[test]
    fn test_sitemaps_collected_unresolved() {
        let doc = parse_policy(
            "Sitemap: https://example.com/sitemap.xml\nUser-agent: *\nDisallow:\nSitemap: /s2.xml",
        );
        assert_eq!(doc.sitemaps().len(), 2);
        assert_eq!(doc.sitemaps()[0].url, "https://example.com/sitemap.xml");
        assert_eq!(doc.sitemaps()[0].status, None);
        assert_eq!(doc.groups().len(), 1);
    }

    #[test]
    fn test_crawl_delay_wildcard() {
        let doc = parse_policy("User-agent: *\nCrawl-delay: 10\nDisallow: /admin");
        assert_eq!(doc.crawl_delay("TestBot"), Some(10.0));
        assert_eq!(doc.crawl_delay("AnyBot"), Some(10.0));
    }

    #[test]
    fn test_crawl_delay_specific_agent() {
        let content = "User-agent: TestBot\nCrawl-delay: 5\nDisallow: /a\n\nUser-agent: *\nCrawl-delay: 10";
        let doc = parse_policy(content);
        assert_eq!(doc.crawl_delay("testbot"), Some(5.0));
        assert_eq!(doc.crawl_delay("OtherBot"), Some(10.0));
    }

    #[test]
    fn test_crawl_delay_invalid_ignored() {
        let doc = parse_policy("User-agent: *\nCrawl-delay: soon\nDisallow: /");
        assert_eq!(doc.crawl_delay("TestBot"), None);
    }

    #[test]
    fn test_crawl_delay_decimal() {
        let doc = parse_policy("User-agent: *\nCrawl-delay: 2.5");
        assert_eq!(doc.crawl_delay("TestBot"), Some(2.5));
    }

    #[test]
    fn test_unknown_lines_ignored() {
        let doc = parse_policy("User-agent: *\nNoindex: /x\nDisallow: /y\n<html>");
        assert_eq!(doc.stats().total_rules, 1);
    }

    #[test]
    fn test_stats_on_parsed_document() {
        let content = "User-agent: A\nDisallow: /x\nAllow: /x/y\n\nUser-agent: B\nDisallow: /x\nDisallow: /z";
        let stats = *parse_policy(content).stats();
        assert_eq!(stats.total_agent_groups, 2);
        assert_eq!(stats.total_rules, 4);
        assert_eq!(stats.total_disallow, 3);
        assert_eq!(stats.unique_disallow, 2);
        assert_eq!(stats.total_allow, 1);
        assert_eq!(stats.unique_allow, 1);
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_policy("");
        assert!(doc.groups().is_empty());
        assert_eq!(doc.stats().total_agent_groups, 0);
    }
}
