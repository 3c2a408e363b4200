// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Editor protocol output
//!
//! Maps an [`Outline`] onto `lsp-types` document symbols and diagnostics so
//! an editor host can serve a "jump to test" view and failure markers. Each
//! node or diagnostic covers the full extent of its anchor line.

use lsp_types::{
    Diagnostic as LspDiagnostic, DiagnosticSeverity, DocumentSymbol, Position, Range, SymbolKind,
};

use crate::outline::{Outline, OutlineNode, Status};

/// Diagnostic source reported to the editor
pub const DIAGNOSTIC_SOURCE: &str = "tap";

/// Symbol name for anonymous groups; editors reject empty names
pub const ANONYMOUS_GROUP_NAME: &str = "⤷ (group)";

/// Per-line lengths of a document, in UTF-16 code units
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    lengths: Vec<u32>,
}

impl LineIndex {
    /// Index the lines of `text`
    #[must_use]
    pub fn new(text: &str) -> Self {
        let lengths = text
            .lines()
            .map(|line| u32::try_from(line.encode_utf16().count()).unwrap_or(u32::MAX))
            .collect();
        Self { lengths }
    }

    /// Number of indexed lines
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lengths.len()
    }

    /// Range covering a whole line, clamped to the last line of the document
    #[must_use]
    pub fn line_range(&self, line: usize) -> Range {
        let Some(last) = self.lengths.len().checked_sub(1) else {
            return Range::default();
        };
        let line = line.min(last);
        let number = u32::try_from(line).unwrap_or(u32::MAX);
        Range::new(
            Position::new(number, 0),
            Position::new(number, self.lengths[line]),
        )
    }
}

/// Symbol kind used to pick the outline icon for a status
#[must_use]
pub fn symbol_kind(status: Status) -> SymbolKind {
    match status {
        Status::Group => SymbolKind::NAMESPACE,
        Status::Pass => SymbolKind::FILE,
        Status::Fail => SymbolKind::EVENT,
    }
}

/// Build the document symbol tree for an outline
#[must_use]
pub fn document_symbols(outline: &Outline, index: &LineIndex) -> Vec<DocumentSymbol> {
    outline
        .roots
        .iter()
        .map(|node| document_symbol(node, index))
        .collect()
}

#[allow(deprecated)]
fn document_symbol(node: &OutlineNode, index: &LineIndex) -> DocumentSymbol {
    let range = index.line_range(node.line);
    let children: Vec<DocumentSymbol> = node
        .children
        .iter()
        .map(|child| document_symbol(child, index))
        .collect();
    let name = if node.label.is_empty() {
        ANONYMOUS_GROUP_NAME.to_string()
    } else {
        node.label.clone()
    };

    DocumentSymbol {
        name,
        detail: None,
        kind: symbol_kind(node.status),
        tags: None,
        deprecated: None,
        range,
        selection_range: range,
        children: (!children.is_empty()).then_some(children),
    }
}

/// Build error markers for every failure in an outline
#[must_use]
pub fn diagnostics(outline: &Outline, index: &LineIndex) -> Vec<LspDiagnostic> {
    outline
        .diagnostics
        .iter()
        .map(|diag| LspDiagnostic {
            range: index.line_range(diag.line),
            severity: Some(DiagnosticSeverity::ERROR),
            source: Some(DIAGNOSTIC_SOURCE.to_string()),
            message: diag.message.clone(),
            ..Default::default()
        })
        .collect()
}
