// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Line classification for TAP streams
//!
//! Each physical line is inspected on its own: leading whitespace gives the
//! nesting depth, and the remaining text decides whether the line is an
//! assertion (`ok` / `not ok`), a `# Subtest:` marker, blank, or anything
//! else (comments, YAML, plan lines, free text).

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Number of columns one level of nesting occupies
pub const INDENT_WIDTH: usize = 4;

/// Glyph prefixed to passing assertion labels
pub const PASS_GLYPH: &str = "✓";
/// Glyph prefixed to failing assertion labels
pub const FAIL_GLYPH: &str = "✗";
/// Glyph prefixed to named sub-test group labels
pub const SUBTEST_GLYPH: &str = "⤷";

// Verdict, optional test number, optional dash. Keywords fold ASCII case only.
static ASSERTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i-u:(ok|not ok))\b\s*\d*\s*-?\s*").expect("assertion pattern is valid")
});

static SUBTEST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#\s*(?i-u:subtest):\s*(.+)").expect("subtest pattern is valid")
});

/// A classified physical line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// An `ok` / `not ok` result line
    Assertion(Assertion<'a>),
    /// A `# Subtest: <name>` marker opening a named group
    Subtest(Subtest<'a>),
    /// Empty or whitespace-only; carries no indentation information
    Blank,
    /// Any other line
    Other {
        /// Nesting depth implied by the line's indentation
        depth: usize,
    },
}

impl Line<'_> {
    /// Nesting depth of the line, `None` for blank lines
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        match self {
            Line::Assertion(a) => Some(a.depth),
            Line::Subtest(s) => Some(s.depth),
            Line::Other { depth } => Some(*depth),
            Line::Blank => None,
        }
    }
}

/// A pass/fail result line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion<'a> {
    /// Nesting depth implied by the line's indentation
    pub depth: usize,
    /// `true` for `ok`, `false` for `not ok`
    pub ok: bool,
    /// Test description with verdict, number and dash stripped (may be empty)
    pub text: Cow<'a, str>,
    /// The whole line, tab-normalized and trimmed
    pub raw: Cow<'a, str>,
}

impl Assertion<'_> {
    /// Outline label: verdict glyph followed by the description
    #[must_use]
    pub fn label(&self) -> String {
        let glyph = if self.ok { PASS_GLYPH } else { FAIL_GLYPH };
        if self.text.is_empty() {
            glyph.to_string()
        } else {
            format!("{glyph} {}", self.text)
        }
    }

    /// Failure message: the description, or the raw line if there is none
    #[must_use]
    pub fn message(&self) -> String {
        if self.text.is_empty() {
            self.raw.to_string()
        } else {
            self.text.to_string()
        }
    }
}

/// A `# Subtest:` marker line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtest<'a> {
    /// Nesting depth implied by the line's indentation
    pub depth: usize,
    /// Sub-test name, trimmed
    pub name: Cow<'a, str>,
}

impl Subtest<'_> {
    /// Outline label for the group this marker opens
    #[must_use]
    pub fn label(&self) -> String {
        if self.name.is_empty() {
            SUBTEST_GLYPH.to_string()
        } else {
            format!("{SUBTEST_GLYPH} {}", self.name)
        }
    }
}

/// Convert an indentation width in columns to a nesting depth
#[must_use]
pub fn depth_for_width(width: usize) -> usize {
    width / INDENT_WIDTH
}

/// Count leading whitespace columns, with tabs expanded
#[must_use]
pub fn indent_width(raw: &str) -> usize {
    raw.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum()
}

/// Classify one physical line
#[must_use]
pub fn classify(raw: &str) -> Line<'_> {
    if raw.trim().is_empty() {
        return Line::Blank;
    }

    let depth = depth_for_width(indent_width(raw));
    let line = normalize_tabs(raw);

    if let Some(assertion) = classify_assertion(&line, depth) {
        return Line::Assertion(assertion);
    }

    let trimmed = line.trim_start();
    if let Some(caps) = SUBTEST_RE.captures(trimmed) {
        let name = caps.get(1).map_or("", |m| m.as_str()).trim();
        return Line::Subtest(Subtest {
            depth,
            name: Cow::Owned(name.to_string()),
        });
    }

    Line::Other { depth }
}

fn classify_assertion<'a>(line: &Cow<'a, str>, depth: usize) -> Option<Assertion<'a>> {
    match line {
        Cow::Borrowed(s) => assertion_parts(*s).map(|(ok, text, raw)| Assertion {
            depth,
            ok,
            text: Cow::Borrowed(text),
            raw: Cow::Borrowed(raw),
        }),
        Cow::Owned(s) => assertion_parts(s).map(|(ok, text, raw)| Assertion {
            depth,
            ok,
            text: Cow::Owned(text.to_string()),
            raw: Cow::Owned(raw.to_string()),
        }),
    }
}

/// Split an assertion line into (verdict, description, trimmed line)
fn assertion_parts(line: &str) -> Option<(bool, &str, &str)> {
    let trimmed = line.trim_start();
    let caps = ASSERTION_RE.captures(trimmed)?;
    let ok = caps.get(1).is_some_and(|m| m.as_str().eq_ignore_ascii_case("ok"));
    let rest = caps.get(0).map_or(trimmed, |m| &trimmed[m.end()..]);
    Some((ok, rest.trim(), trimmed.trim_end()))
}

/// TAP allows tabs or spaces for sub-test indentation; tabs count as four spaces
fn normalize_tabs(raw: &str) -> Cow<'_, str> {
    if raw.contains('\t') {
        Cow::Owned(raw.replace('\t', &" ".repeat(INDENT_WIDTH)))
    } else {
        Cow::Borrowed(raw)
    }
}
