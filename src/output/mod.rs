//! Output rendering for the command-line interface
//!
//! Responses are rendered either as pretty JSON (the wire shapes) or as
//! human-readable text.

mod text;

pub use text::{render_analysis, render_check, render_matrix, render_stats, render_url_verdicts};

use serde::Serialize;

/// Output format selected on the command line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Renders any response as pretty-printed JSON
pub fn render_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
