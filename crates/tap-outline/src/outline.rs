// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Outline tree and diagnostic types produced by the parser

use serde::{Deserialize, Serialize};

/// Whether an outline node is a concluded assertion or a group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Assertion (or group summary) passed
    Pass,
    /// Assertion (or group summary) failed
    Fail,
    /// Nested group whose own result is not (yet) known
    Group,
}

impl Status {
    /// Status for an `ok` / `not ok` verdict
    #[must_use]
    pub fn from_ok(ok: bool) -> Self {
        if ok { Status::Pass } else { Status::Fail }
    }

    /// Check if this is a concluded result
    #[must_use]
    pub fn is_concluded(self) -> bool {
        !matches!(self, Status::Group)
    }
}

/// One entry in the navigation tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineNode {
    /// Text shown to the user (verdict glyph + name, or group marker)
    pub label: String,
    /// Zero-based source line the node is anchored to
    pub line: usize,
    /// Pass, fail, or group
    pub status: Status,
    /// Child nodes in document order
    pub children: Vec<OutlineNode>,
}

impl OutlineNode {
    /// Create a concluded assertion leaf
    #[must_use]
    pub fn leaf(label: String, line: usize, ok: bool) -> Self {
        Self {
            label,
            line,
            status: Status::from_ok(ok),
            children: Vec::new(),
        }
    }

    /// Create an empty group
    #[must_use]
    pub fn group(label: String, line: usize) -> Self {
        Self {
            label,
            line,
            status: Status::Group,
            children: Vec::new(),
        }
    }

    /// Check if the node is still an unresolved group
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.status == Status::Group
    }
}

/// A line-anchored failure record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Zero-based line of the failing assertion or group summary
    pub line: usize,
    /// Failure text
    pub message: String,
}

/// Result of parsing one TAP document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    /// Top-level forest in document order
    pub roots: Vec<OutlineNode>,
    /// One entry per failing node, in the order failures were resolved
    pub diagnostics: Vec<Diagnostic>,
}

impl Outline {
    /// Split into the root forest and diagnostics
    #[must_use]
    pub fn into_parts(self) -> (Vec<OutlineNode>, Vec<Diagnostic>) {
        (self.roots, self.diagnostics)
    }

    /// Check if no failures were found
    #[must_use]
    pub fn is_passing(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of failing nodes
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Total number of nodes in the tree
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Pre-order traversal yielding each node with its tree depth
    pub fn nodes(&self) -> Nodes<'_> {
        Nodes {
            stack: self.roots.iter().rev().map(|n| (0, n)).collect(),
        }
    }
}

/// Pre-order iterator over an [`Outline`]
pub struct Nodes<'a> {
    stack: Vec<(usize, &'a OutlineNode)>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = (usize, &'a OutlineNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|c| (depth + 1, c)));
        Some((depth, node))
    }
}
