// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Output rendering for parsed outlines

use std::fmt::Write;

use tap_outline::TapError;
use tap_outline::lsp::{self, LineIndex};
use tap_outline::{Outline, Status};

use crate::config::OutputFormat;

/// Render an outline in the requested format
///
/// `text` is the parsed document, needed to compute line ranges for the
/// LSP formats.
///
/// # Errors
///
/// Returns `TapError::Json` if JSON serialization fails.
pub fn render(outline: &Outline, text: &str, format: OutputFormat) -> Result<String, TapError> {
    match format {
        OutputFormat::Tree => Ok(render_tree(outline)),
        OutputFormat::Json => render_json(outline),
        OutputFormat::Symbols => render_symbols(outline, text),
        OutputFormat::Diagnostics => render_diagnostics(outline, text),
    }
}

/// Indented outline with 1-based line numbers, then the failure list
#[must_use]
pub fn render_tree(outline: &Outline) -> String {
    let mut out = String::new();
    for (depth, node) in outline.nodes() {
        let label = match (node.label.is_empty(), node.status) {
            (true, Status::Group) => "(group)",
            _ => node.label.as_str(),
        };
        let _ = writeln!(out, "{}{label}  [{}]", "  ".repeat(depth), node.line + 1);
    }

    if outline.is_passing() {
        out.push_str("\nNo failures\n");
    } else {
        let _ = writeln!(out, "\n{} failure(s):", outline.failure_count());
        for diag in &outline.diagnostics {
            let _ = writeln!(out, "  line {}: {}", diag.line + 1, diag.message);
        }
    }
    out
}

/// Outline and diagnostics as pretty JSON
///
/// # Errors
///
/// Returns `TapError::Json` if serialization fails.
pub fn render_json(outline: &Outline) -> Result<String, TapError> {
    Ok(serde_json::to_string_pretty(outline)?)
}

/// LSP document symbols as pretty JSON
///
/// # Errors
///
/// Returns `TapError::Json` if serialization fails.
pub fn render_symbols(outline: &Outline, text: &str) -> Result<String, TapError> {
    let symbols = lsp::document_symbols(outline, &LineIndex::new(text));
    Ok(serde_json::to_string_pretty(&symbols)?)
}

/// LSP diagnostics as pretty JSON
///
/// # Errors
///
/// Returns `TapError::Json` if serialization fails.
pub fn render_diagnostics(outline: &Outline, text: &str) -> Result<String, TapError> {
    let diagnostics = lsp::diagnostics(outline, &LineIndex::new(text));
    Ok(serde_json::to_string_pretty(&diagnostics)?)
}
