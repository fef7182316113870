//! Cross-product evaluation of documents, agents and URLs
//!
//! Results nest URL first, then document, then agent. Every (document, agent, url)
//! decision is independent; a URL that cannot be reduced to a path yields a
//! [`Verdict::Failed`] for each of its cells and the rest of the batch continues.

use crate::robots::matcher::decide;
use crate::robots::model::PolicyDocument;
use crate::url::request_path;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// The agent used when a caller supplies none
pub const DEFAULT_AGENT: &str = "*";

/// Decision for one (document, agent, url) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Verdict {
    Decided(bool),
    Failed { error: String },
}

impl Verdict {
    /// The decision, if one was reached
    pub fn allowed(&self) -> Option<bool> {
        match self {
            Verdict::Decided(allowed) => Some(*allowed),
            Verdict::Failed { .. } => None,
        }
    }
}

/// Agent → verdict mapping that keeps the caller's agent order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentVerdicts(Vec<(String, Verdict)>);

impl AgentVerdicts {
    pub fn get(&self, agent: &str) -> Option<&Verdict> {
        self.0
            .iter()
            .find(|(name, _)| name == agent)
            .map(|(_, verdict)| verdict)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Verdict)> {
        self.0.iter().map(|(agent, verdict)| (agent.as_str(), verdict))
    }
}

impl Serialize for AgentVerdicts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (agent, verdict) in &self.0 {
            map.serialize_entry(agent, verdict)?;
        }
        map.end()
    }
}

/// Results for one URL against a single document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlVerdicts {
    pub url: String,
    pub results: AgentVerdicts,
}

/// Results for one document, within one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentVerdicts {
    pub robots_index: usize,
    pub results: AgentVerdicts,
}

/// Results for one URL against every document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMatrix {
    pub url: String,
    pub robots_results: Vec<DocumentVerdicts>,
}

/// Normalizes the agent list for a batch
///
/// Blank tokens are dropped, duplicates collapse to their first occurrence and an
/// empty list becomes `["*"]`.
pub fn normalize_agents(agents: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(agents.len());
    for agent in agents.iter().map(|agent| agent.trim()) {
        if !agent.is_empty() && !normalized.iter().any(|seen| seen == agent) {
            normalized.push(agent.to_string());
        }
    }
    if normalized.is_empty() {
        normalized.push(DEFAULT_AGENT.to_string());
    }
    normalized
}

/// Number of decisions a batch will compute
pub fn evaluation_count(documents: usize, agents: usize, urls: usize) -> usize {
    documents.saturating_mul(agents).saturating_mul(urls)
}

fn verdicts_for(document: &PolicyDocument, agents: &[String], path: &Result<String, String>) -> AgentVerdicts {
    AgentVerdicts(
        agents
            .iter()
            .map(|agent| {
                let verdict = match path {
                    Ok(path) => Verdict::Decided(decide(document, agent, path)),
                    Err(error) => Verdict::Failed {
                        error: error.clone(),
                    },
                };
                (agent.clone(), verdict)
            })
            .collect(),
    )
}

fn resolve_path(url: &str) -> Result<String, String> {
    request_path(url).map_err(|e| {
        tracing::debug!("Cannot evaluate {}: {}", url, e);
        e.to_string()
    })
}

/// Evaluates every URL for every agent against a single document
pub fn evaluate_single(document: &PolicyDocument, agents: &[String], urls: &[String]) -> Vec<UrlVerdicts> {
    let agents = normalize_agents(agents);
    urls.iter()
        .map(|url| UrlVerdicts {
            url: url.clone(),
            results: verdicts_for(document, &agents, &resolve_path(url)),
        })
        .collect()
}

/// Evaluates every URL for every agent against every document
pub fn evaluate_all(documents: &[PolicyDocument], agents: &[String], urls: &[String]) -> Vec<UrlMatrix> {
    let agents = normalize_agents(agents);
    urls.iter()
        .map(|url| {
            let path = resolve_path(url);
            UrlMatrix {
                url: url.clone(),
                robots_results: documents
                    .iter()
                    .enumerate()
                    .map(|(robots_index, document)| DocumentVerdicts {
                        robots_index,
                        results: verdicts_for(document, &agents, &path),
                    })
                    .collect(),
            }
        })
        .collect()
}
