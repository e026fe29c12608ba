//! Report assembly and output rendering
//!
//! Global invariants enforced:
//! - Exactly one variant per analysis: error or success, never partial
//! - Deterministic rendering: identical reports yield identical output

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of one analysis call.
///
/// The serialized form is tagged with `kind`, so JSON consumers see either
/// `"SyntaxError"` or `"Success"` and the matching fields, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Report {
    /// The submission failed to parse.
    SyntaxError { message: String },
    /// Full metrics bundle for a successfully parsed submission.
    Success {
        total_lines: usize,
        total_characters: usize,
        max_nesting_level: usize,
        function_complexities: BTreeMap<String, i64>,
        readability_score: u32,
    },
}

impl Report {
    pub fn is_syntax_error(&self) -> bool {
        matches!(self, Report::SyntaxError { .. })
    }
}

/// Render a report as human-readable text.
pub fn render_text(report: &Report) -> String {
    let mut output = String::new();
    match report {
        Report::SyntaxError { message } => {
            output.push_str("Error: SyntaxError\n");
            output.push_str(&format!("Message: {}\n", message));
        }
        Report::Success {
            total_lines,
            total_characters,
            max_nesting_level,
            function_complexities,
            readability_score,
        } => {
            output.push_str(&format!("Total lines of code: {}\n", total_lines));
            output.push_str(&format!("Total characters: {}\n", total_characters));
            output.push_str(&format!("Max nesting level: {}\n", max_nesting_level));
            output.push_str("Function complexities:\n");
            for (name, score) in function_complexities {
                output.push_str(&format!(" - {}: {}\n", name, score));
            }
            output.push_str(&format!("Readability score: {}\n", readability_score));
        }
    }
    output
}

/// Render a report as JSON output.
pub fn render_json(report: &Report) -> String {
    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
}
