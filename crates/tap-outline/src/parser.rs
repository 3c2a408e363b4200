// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! TAP to outline parsing
//!
//! A single pass over the document's lines drives an ancestry stack of open
//! groups. Two nesting modes are supported:
//!
//! - [`NestingMode::Explicit`]: only `# Subtest:` markers open groups, and
//!   every non-blank line closes groups deeper than its own indentation.
//! - [`NestingMode::Inferred`] (default): depth changes come from assertion
//!   and marker lines only. Deeper-indented assertions with no open group
//!   get an anonymous group synthesized for them, and the shallower
//!   assertion that follows such a block is folded into the group as its
//!   summary instead of becoming a sibling leaf.
//!
//! # Example
//!
//! ```
//! use tap_outline::{Status, parse};
//!
//! let outline = parse("    ok 1 - a\n    ok 2 - b\nnot ok 1 - both\n");
//! assert_eq!(outline.roots.len(), 1);
//! assert_eq!(outline.roots[0].status, Status::Fail);
//! assert_eq!(outline.roots[0].children.len(), 2);
//! assert_eq!(outline.diagnostics[0].line, 2);
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::classify::{Assertion, Line, Subtest, classify, indent_width};
use crate::error::TapError;
use crate::outline::{Diagnostic, Outline, OutlineNode, Status};

/// How nesting is derived from indentation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NestingMode {
    /// Groups come from `# Subtest:` markers only
    Explicit,
    /// Groups are also inferred from indented assertions, with summary lines
    /// resolved onto the group they conclude
    #[default]
    Inferred,
}

/// Parser configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Nesting strategy
    pub mode: NestingMode,
    /// Use the `message:` key of a YAML block following a failing assertion
    /// as its diagnostic message
    pub yaml_messages: bool,
}

impl ParseOptions {
    /// Set the nesting mode
    #[must_use]
    pub fn mode(mut self, mode: NestingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable YAML message reuse
    #[must_use]
    pub fn with_yaml_messages(mut self) -> Self {
        self.yaml_messages = true;
        self
    }
}

/// TAP outline parser
///
/// Holds configuration only; every call to [`Parser::parse`] starts from
/// fresh state, so a parser can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    /// Create a parser with default options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the given options
    #[must_use]
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parser options
    #[must_use]
    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse a complete TAP document
    #[must_use]
    pub fn parse(&self, text: &str) -> Outline {
        let mut builder = Builder::new(self.options.mode);
        let mut yaml = YamlBlock::Idle;
        let mut line_count = 0;

        for (idx, raw) in text.lines().enumerate() {
            line_count = idx + 1;

            if self.options.yaml_messages && yaml.consume(raw, &mut builder.diagnostics) {
                continue;
            }

            match classify(raw) {
                Line::Assertion(assertion) => {
                    let diagnostic = builder.assertion(idx, &assertion);
                    if self.options.yaml_messages {
                        yaml = YamlBlock::Expecting { diagnostic };
                    }
                }
                Line::Subtest(subtest) => builder.subtest(idx, &subtest),
                Line::Other { depth } => builder.other(depth),
                Line::Blank => {}
            }
        }

        let outline = builder.finish();
        debug!(
            lines = line_count,
            roots = outline.roots.len(),
            diagnostics = outline.diagnostics.len(),
            "Parsed TAP outline"
        );
        outline
    }

    /// Read and parse a TAP file
    ///
    /// # Errors
    ///
    /// Returns `TapError::Io` if the file cannot be read or is not UTF-8.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Outline, TapError> {
        let text = std::fs::read_to_string(path)?;
        Ok(self.parse(&text))
    }
}

/// Parse a TAP document with default options
#[must_use]
pub fn parse(text: &str) -> Outline {
    Parser::new().parse(text)
}

/// Read and parse a TAP file with default options
///
/// # Errors
///
/// Returns `TapError::Io` if the file cannot be read or is not UTF-8.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Outline, TapError> {
    Parser::new().parse_file(path)
}

// ============================================================================
// Tree builder
// ============================================================================

/// An open ancestor: its index among its parent's children
#[derive(Debug, Clone, Copy)]
struct Frame {
    index: usize,
    /// Opened by a `# Subtest:` marker rather than inferred
    named: bool,
}

/// Index path from the root forest to a node
type NodePath = Vec<usize>;

struct Builder {
    mode: NestingMode,
    roots: Vec<OutlineNode>,
    diagnostics: Vec<Diagnostic>,
    stack: Vec<Frame>,
    /// Anonymous groups just closed by an assertion at the keyed depth,
    /// innermost first; emptied once that assertion has been placed
    pending: HashMap<usize, Vec<NodePath>>,
}

impl Builder {
    fn new(mode: NestingMode) -> Self {
        Self {
            mode,
            roots: Vec::new(),
            diagnostics: Vec::new(),
            stack: Vec::new(),
            pending: HashMap::new(),
        }
    }

    fn finish(self) -> Outline {
        Outline {
            roots: self.roots,
            diagnostics: self.diagnostics,
        }
    }

    /// Handle an assertion line; returns the index of the diagnostic it
    /// produced, if any
    fn assertion(&mut self, line: usize, assertion: &Assertion<'_>) -> Option<usize> {
        match self.mode {
            NestingMode::Explicit => {
                self.pop_to(assertion.depth);
                self.leaf(line, assertion)
            }
            NestingMode::Inferred => {
                let closed = self.pop_to(assertion.depth);
                let anonymous = closed.into_iter().filter(|(_, named)| !named);
                let pending = self.pending.entry(assertion.depth).or_default();
                pending.extend(anonymous.map(|(path, _)| path));
                self.fill_to(assertion.depth, line);

                let claimed = self.pending.get_mut(&assertion.depth).and_then(Vec::pop);
                // A summary only concludes the block directly above it; the
                // deeper groups of a multi-level close stay unresolved.
                self.pending.clear();
                match claimed {
                    Some(path) => self.resolve(&path, line, assertion),
                    None => self.leaf(line, assertion),
                }
            }
        }
    }

    fn subtest(&mut self, line: usize, subtest: &Subtest<'_>) {
        // Groups closed by a marker are never summary targets.
        self.pop_to(subtest.depth);
        self.pending.clear();
        self.open(OutlineNode::group(subtest.label(), line), true);
    }

    fn other(&mut self, depth: usize) {
        if self.mode == NestingMode::Explicit {
            self.pop_to(depth);
        }
    }

    fn leaf(&mut self, line: usize, assertion: &Assertion<'_>) -> Option<usize> {
        self.append(OutlineNode::leaf(assertion.label(), line, assertion.ok));
        (!assertion.ok).then(|| self.fail(line, assertion.message()))
    }

    /// Conclude a pending group with the summary assertion's verdict
    fn resolve(
        &mut self,
        path: &[usize],
        line: usize,
        assertion: &Assertion<'_>,
    ) -> Option<usize> {
        trace!(
            line,
            depth = assertion.depth,
            ok = assertion.ok,
            "Resolving group summary"
        );
        let node = node_at(&mut self.roots, path);
        node.status = Status::from_ok(assertion.ok);
        node.label = assertion.label();
        node.line = line;
        (!assertion.ok).then(|| self.fail(line, assertion.message()))
    }

    fn fail(&mut self, line: usize, message: String) -> usize {
        self.diagnostics.push(Diagnostic { line, message });
        self.diagnostics.len() - 1
    }

    /// Close open groups deeper than `depth`, returning their paths and
    /// whether each was named, innermost first
    fn pop_to(&mut self, depth: usize) -> Vec<(NodePath, bool)> {
        let mut closed = Vec::new();
        while self.stack.len() > depth {
            let path = self.path();
            if let Some(frame) = self.stack.pop() {
                closed.push((path, frame.named));
            }
        }
        closed
    }

    /// Open anonymous groups until the stack reaches `depth`
    fn fill_to(&mut self, depth: usize, line: usize) {
        while self.stack.len() < depth {
            trace!(line, depth = self.stack.len(), "Synthesizing anonymous group");
            self.open(OutlineNode::group(String::new(), line), false);
        }
    }

    fn open(&mut self, node: OutlineNode, named: bool) {
        let index = self.append(node);
        self.stack.push(Frame { index, named });
    }

    /// Append under the innermost open group (or the root forest)
    fn append(&mut self, node: OutlineNode) -> usize {
        let path = self.path();
        let children = children_at(&mut self.roots, &path);
        children.push(node);
        children.len() - 1
    }

    fn path(&self) -> NodePath {
        self.stack.iter().map(|frame| frame.index).collect()
    }
}

fn children_at<'a>(roots: &'a mut Vec<OutlineNode>, path: &[usize]) -> &'a mut Vec<OutlineNode> {
    path.iter()
        .fold(roots, |children, &index| &mut children[index].children)
}

fn node_at<'a>(roots: &'a mut Vec<OutlineNode>, path: &[usize]) -> &'a mut OutlineNode {
    let (last, parent) = path
        .split_last()
        .map_or((0, &[][..]), |(last, parent)| (*last, parent));
    &mut children_at(roots, parent)[last]
}

// ============================================================================
// YAML diagnostic blocks
// ============================================================================

#[derive(Debug, Clone, Copy)]
enum YamlBlock {
    Idle,
    /// The previous structural line was an assertion
    Expecting { diagnostic: Option<usize> },
    Inside {
        indent: usize,
        diagnostic: Option<usize>,
        found: bool,
    },
}

impl YamlBlock {
    /// Track YAML block boundaries; returns `true` if `raw` belongs to a
    /// block and must not be classified
    fn consume(&mut self, raw: &str, diagnostics: &mut [Diagnostic]) -> bool {
        let trimmed = raw.trim();
        match *self {
            YamlBlock::Idle => false,
            YamlBlock::Expecting { diagnostic } => {
                if trimmed.is_empty() {
                    return false;
                }
                if trimmed == "---" {
                    *self = YamlBlock::Inside {
                        indent: indent_width(raw),
                        diagnostic,
                        found: false,
                    };
                    return true;
                }
                *self = YamlBlock::Idle;
                false
            }
            YamlBlock::Inside {
                indent,
                diagnostic,
                found,
            } => {
                if trimmed.is_empty() {
                    return true;
                }
                if indent_width(raw) < indent {
                    *self = YamlBlock::Idle;
                    return false;
                }
                if trimmed == "..." {
                    *self = YamlBlock::Idle;
                    return true;
                }
                if !found {
                    if let (Some(index), Some(message)) = (diagnostic, yaml_message(trimmed)) {
                        if let Some(diag) = diagnostics.get_mut(index) {
                            diag.message = message;
                        }
                        *self = YamlBlock::Inside {
                            indent,
                            diagnostic,
                            found: true,
                        };
                    }
                }
                true
            }
        }
    }
}

/// Extract the value of a `message:` key, unquoted
fn yaml_message(trimmed: &str) -> Option<String> {
    let value = trimmed.strip_prefix("message:")?.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| value.strip_prefix(*q).and_then(|v| v.strip_suffix(*q)))
        .unwrap_or(value);
    (!unquoted.is_empty()).then(|| unquoted.to_string())
}
