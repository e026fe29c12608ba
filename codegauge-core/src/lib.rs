//! Codegauge core library - size and complexity metrics for Python source submissions

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Analysis is a pure function of the submitted source text
// - No global mutable state
// - No randomness, clocks, threads, or async
// - Exactly one report variant per call; no partial reports
// - Identical input yields structurally identical reports

pub mod ast;
pub mod metrics;
pub mod parser;
pub mod report;

pub use report::{render_json, render_text, Report};

use anyhow::Result;
use parser::ParseOutcome;

/// Analyze one source submission and produce its report.
///
/// Malformed input is recovered into [`Report::SyntaxError`]; only parser
/// infrastructure failures surface as `Err`, and no report is produced for
/// those.
pub fn analyze(source: &str) -> Result<Report> {
    let tree = match parser::parse_source(source)? {
        ParseOutcome::Tree(tree) => tree,
        ParseOutcome::SyntaxError(message) => return Ok(Report::SyntaxError { message }),
    };

    let total_lines = metrics::total_lines(source);
    let total_characters = metrics::total_characters(source);
    let max_nesting_level = metrics::max_nesting_level(&tree);
    let function_complexities = metrics::function_complexities(&tree);
    let readability_score =
        metrics::readability_score(total_lines, max_nesting_level, function_complexities.len());

    Ok(Report::Success {
        total_lines,
        total_characters,
        max_nesting_level,
        function_complexities,
        readability_score,
    })
}
