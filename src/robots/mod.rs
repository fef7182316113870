//! Robots.txt handling module
//!
//! This module validates, lints, parses and evaluates robots exclusion policy
//! documents.
//!
//! - [`is_policy_document`] is a cheap gate that rejects HTML pages and other text
//! - [`lint`] reports unrecognized lines without failing
//! - [`parse_policy`] builds the [`PolicyDocument`] model
//! - [`decide`] and the [`batch`] functions answer allow/deny questions

pub mod batch;
mod directive;
mod matcher;
mod model;
mod parser;
mod validate;

pub use batch::{evaluate_all, evaluate_single, AgentVerdicts, UrlMatrix, UrlVerdicts, Verdict};
pub use directive::Directive;
pub use matcher::{decide, evaluate, is_allowed, pattern_matches, Decision};
pub use model::{AgentGroup, PolicyDocument, Rule, SitemapEntry, SitemapStatus, Stats};
pub use parser::parse_policy;
pub use validate::{is_policy_document, lint, ValidationIssue};
