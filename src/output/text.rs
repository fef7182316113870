//! Human-readable text rendering

use crate::robots::{AgentVerdicts, PolicyDocument, SitemapStatus, Stats, UrlMatrix, UrlVerdicts, Verdict};
use crate::service::{AnalyzeResponse, CheckUrlResponse};

/// Renders summary statistics
pub fn render_stats(stats: &Stats) -> String {
    let mut out = String::new();
    out.push_str("Statistics:\n");
    out.push_str(&format!("  Agent groups: {}\n", stats.total_agent_groups));
    out.push_str(&format!("  Rules: {}\n", stats.total_rules));
    out.push_str(&format!(
        "  Disallow rules: {} ({} unique)\n",
        stats.total_disallow, stats.unique_disallow
    ));
    out.push_str(&format!(
        "  Allow rules: {} ({} unique)\n",
        stats.total_allow, stats.unique_allow
    ));
    out
}

fn render_document(document: &PolicyDocument, out: &mut String) {
    out.push_str(&format!("Agent groups ({}):\n", document.groups().len()));
    for group in document.groups() {
        let agents = if group.agents().is_empty() {
            "(no user-agent)".to_string()
        } else {
            group.agents().join(", ")
        };
        out.push_str(&format!("  [{}]\n", agents));
        if let Some(delay) = group.crawl_delay() {
            out.push_str(&format!("    Crawl-delay: {}\n", delay));
        }
        for rule in group.rules() {
            out.push_str(&format!("    {}: {}\n", rule.keyword(), rule.pattern));
        }
    }

    if !document.sitemaps().is_empty() {
        out.push_str(&format!("Sitemaps ({}):\n", document.sitemaps().len()));
        for sitemap in document.sitemaps() {
            let status = match sitemap.status {
                Some(SitemapStatus::Status(code)) => code.to_string(),
                Some(SitemapStatus::Error) => "error".to_string(),
                None => "unchecked".to_string(),
            };
            out.push_str(&format!("  - {} [{}]\n", sitemap.url, status));
        }
    }
}

/// Renders an Analyze response
pub fn render_analysis(response: &AnalyzeResponse) -> String {
    let mut out = String::new();
    match response {
        AnalyzeResponse::Analyzed(report) => {
            out.push_str("=== robots.txt Analysis ===\n\n");
            if let Some(status) = report.fetch_status {
                out.push_str(&format!("Fetch status: {}\n\n", status));
            }

            if report.errors.is_empty() {
                out.push_str("No syntax issues found\n\n");
            } else {
                out.push_str(&format!("Syntax issues ({}):\n", report.errors.len()));
                for issue in &report.errors {
                    out.push_str(&format!("  {}\n", issue));
                }
                out.push('\n');
            }

            render_document(&report.parsed_data, &mut out);
            out.push('\n');
            out.push_str(&render_stats(report.parsed_data.stats()));
        }
        AnalyzeResponse::FetchRejected {
            fetch_status,
            error,
            ..
        } => {
            out.push_str(&format!("Fetch status: {}\n", fetch_status));
            out.push_str(&format!("Error: {}\n", error));
        }
        AnalyzeResponse::FormatRejected { error, .. } => {
            out.push_str(&format!("Error: {}\n", error));
        }
    }
    out
}

fn verdict_label(verdict: &Verdict) -> String {
    match verdict {
        Verdict::Decided(true) => "allowed".to_string(),
        Verdict::Decided(false) => "disallowed".to_string(),
        Verdict::Failed { error } => format!("error ({})", error),
    }
}

fn render_agents(results: &AgentVerdicts, indent: &str, out: &mut String) {
    for (agent, verdict) in results.iter() {
        out.push_str(&format!("{}{}: {}\n", indent, agent, verdict_label(verdict)));
    }
}

/// Renders TestURL results
pub fn render_url_verdicts(results: &[UrlVerdicts]) -> String {
    let mut out = String::new();
    for entry in results {
        out.push_str(&format!("{}\n", entry.url));
        render_agents(&entry.results, "  ", &mut out);
    }
    out
}

/// Renders MultiTest results
pub fn render_matrix(results: &[UrlMatrix]) -> String {
    let mut out = String::new();
    for entry in results {
        out.push_str(&format!("{}\n", entry.url));
        for document in &entry.robots_results {
            out.push_str(&format!("  robots #{}\n", document.robots_index));
            render_agents(&document.results, "    ", &mut out);
        }
    }
    out
}

/// Renders a CheckUrl response
pub fn render_check(response: &CheckUrlResponse) -> String {
    format!("Status code: {}\n", response.status_code)
}
