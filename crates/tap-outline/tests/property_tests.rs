// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Property-based tests for tap-outline
//!
//! These tests use proptest to check the parser's structural invariants over
//! generated TAP streams and arbitrary text.

use proptest::prelude::*;
use tap_outline::classify::{Line, classify};
use tap_outline::{NestingMode, Outline, OutlineNode, ParseOptions, Parser, Status, parse};

// ============================================================================
// Strategies
// ============================================================================

/// One generated TAP line
#[derive(Debug, Clone)]
enum GenLine {
    Assertion { depth: usize, ok: bool, name: String },
    Subtest { depth: usize, name: String },
    Comment { depth: usize },
    Blank,
}

impl GenLine {
    fn render(&self) -> String {
        let pad = |depth: usize| " ".repeat(depth * 4);
        match self {
            GenLine::Assertion { depth, ok, name } => {
                let verdict = if *ok { "ok" } else { "not ok" };
                format!("{}{verdict} 1 - {name}", pad(*depth))
            }
            GenLine::Subtest { depth, name } => format!("{}# Subtest: {name}", pad(*depth)),
            GenLine::Comment { depth } => format!("{}# diagnostic", pad(*depth)),
            GenLine::Blank => String::new(),
        }
    }
}

fn gen_line() -> impl Strategy<Value = GenLine> {
    prop_oneof![
        6 => (0usize..4, any::<bool>(), "[a-z]{1,8}")
            .prop_map(|(depth, ok, name)| GenLine::Assertion { depth, ok, name }),
        1 => (0usize..3, "[a-z]{1,8}").prop_map(|(depth, name)| GenLine::Subtest { depth, name }),
        1 => (0usize..4).prop_map(|depth| GenLine::Comment { depth }),
        1 => Just(GenLine::Blank),
    ]
}

fn tap_stream() -> impl Strategy<Value = Vec<GenLine>> {
    prop::collection::vec(gen_line(), 0..40)
}

fn any_mode() -> impl Strategy<Value = NestingMode> {
    prop_oneof![Just(NestingMode::Inferred), Just(NestingMode::Explicit)]
}

fn render(lines: &[GenLine]) -> String {
    lines
        .iter()
        .map(GenLine::render)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line a node was opened on; a resolved group keeps its summary line, so
/// its opening is that of its first child
fn opening_line(node: &OutlineNode) -> usize {
    match node.children.first() {
        Some(first) if node.status.is_concluded() => opening_line(first),
        _ => node.line,
    }
}

fn postorder<'a>(nodes: &'a [OutlineNode], out: &mut Vec<&'a OutlineNode>) {
    for node in nodes {
        postorder(&node.children, out);
        out.push(node);
    }
}

fn failing_lines(outline: &Outline) -> Vec<usize> {
    outline
        .nodes()
        .filter(|(_, n)| n.status == Status::Fail)
        .map(|(_, n)| n.line)
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_parse_never_panics(text in "[a-z0-9 #:\t\n.-]{0,400}") {
        let _ = parse(&text);
    }

    #[test]
    fn prop_reparse_is_identical(lines in tap_stream(), mode in any_mode()) {
        let text = render(&lines);
        let parser = Parser::with_options(ParseOptions::default().mode(mode));
        prop_assert_eq!(parser.parse(&text), parser.parse(&text));
    }

    #[test]
    fn prop_one_diagnostic_per_failing_node(lines in tap_stream(), mode in any_mode()) {
        let text = render(&lines);
        let outline = Parser::with_options(ParseOptions::default().mode(mode)).parse(&text);
        let mut failing = failing_lines(&outline);
        let mut diagnosed: Vec<usize> = outline.diagnostics.iter().map(|d| d.line).collect();
        failing.sort_unstable();
        diagnosed.sort_unstable();
        prop_assert_eq!(failing, diagnosed);
    }

    #[test]
    fn prop_diagnostics_in_document_order(lines in tap_stream()) {
        let outline = parse(&render(&lines));
        let diagnosed: Vec<usize> = outline.diagnostics.iter().map(|d| d.line).collect();
        prop_assert!(diagnosed.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_blank_lines_are_transparent(lines in tap_stream()) {
        let without: Vec<GenLine> = lines
            .iter()
            .filter(|l| !matches!(l, GenLine::Blank))
            .cloned()
            .collect();
        // Compare shapes with line numbers erased, since blanks shift them.
        let shape = |outline: &Outline| -> Vec<(usize, String, Status)> {
            outline
                .nodes()
                .map(|(depth, n)| (depth, n.label.clone(), n.status))
                .collect()
        };
        let with_blanks = parse(&render(&lines));
        let stripped = parse(&render(&without));
        prop_assert_eq!(shape(&with_blanks), shape(&stripped));
        let messages = |outline: &Outline| -> Vec<String> {
            outline.diagnostics.iter().map(|d| d.message.clone()).collect()
        };
        prop_assert_eq!(messages(&with_blanks), messages(&stripped));
    }

    #[test]
    fn prop_concluded_nodes_anchor_on_assertions(lines in tap_stream()) {
        let text = render(&lines);
        let source: Vec<&str> = text.lines().collect();
        let outline = parse(&text);
        for (depth, node) in outline.nodes() {
            if node.status == Status::Group {
                continue;
            }
            let line = classify(source[node.line]);
            prop_assert!(matches!(line, Line::Assertion(_)));
            prop_assert_eq!(Some(depth), line.depth());
        }
    }

    #[test]
    fn prop_summary_follows_its_block(lines in tap_stream()) {
        fn leaf_lines(node: &OutlineNode, out: &mut Vec<usize>) {
            for child in &node.children {
                if child.children.is_empty() {
                    out.push(child.line);
                }
                leaf_lines(child, out);
            }
        }

        let outline = parse(&render(&lines));
        for (_, node) in outline.nodes() {
            if node.status.is_concluded() && !node.children.is_empty() {
                let mut leaves = Vec::new();
                leaf_lines(node, &mut leaves);
                prop_assert!(leaves.iter().all(|&l| l < node.line));
            }
        }
    }

    #[test]
    fn prop_preorder_leaf_lines_increase(lines in tap_stream(), mode in any_mode()) {
        let outline = Parser::with_options(ParseOptions::default().mode(mode)).parse(&render(&lines));
        let leaves: Vec<usize> = outline
            .nodes()
            .filter(|(_, n)| n.children.is_empty())
            .map(|(_, n)| n.line)
            .collect();
        prop_assert!(leaves.windows(2).all(|w| w[0] < w[1]), "leaf lines {:?}", leaves);
    }

    #[test]
    fn prop_postorder_verdict_lines_increase(lines in tap_stream(), mode in any_mode()) {
        let outline = Parser::with_options(ParseOptions::default().mode(mode)).parse(&render(&lines));
        let mut nodes = Vec::new();
        postorder(&outline.roots, &mut nodes);
        let verdicts: Vec<usize> = nodes
            .iter()
            .filter(|n| n.status.is_concluded())
            .map(|n| n.line)
            .collect();
        prop_assert!(verdicts.windows(2).all(|w| w[0] < w[1]), "verdict lines {:?}", verdicts);
    }

    #[test]
    fn prop_children_open_after_parent(lines in tap_stream(), mode in any_mode()) {
        let outline = Parser::with_options(ParseOptions::default().mode(mode)).parse(&render(&lines));
        for (_, parent) in outline.nodes() {
            let opened = opening_line(parent);
            for child in &parent.children {
                prop_assert!(opening_line(child) >= opened);
                if parent.status.is_concluded() {
                    prop_assert!(child.line < parent.line);
                }
            }
        }
    }

    #[test]
    fn prop_flat_stream_has_no_groups(
        results in prop::collection::vec((any::<bool>(), "[a-z]{1,8}"), 0..30)
    ) {
        let lines: Vec<GenLine> = results
            .into_iter()
            .map(|(ok, name)| GenLine::Assertion { depth: 0, ok, name })
            .collect();
        let outline = parse(&render(&lines));
        prop_assert_eq!(outline.roots.len(), lines.len());
        prop_assert!(outline.roots.iter().all(|n| n.children.is_empty()));
        prop_assert!(outline.roots.iter().all(|n| n.status != Status::Group));
    }
}

#[test]
fn test_multi_level_close_keeps_document_order() {
    let outline = parse("        ok 1 - deep\nok 1 - top\n# Subtest: x\n    ok 1 - y\nok 2 - z");
    let order: Vec<(usize, &str, usize)> = outline
        .nodes()
        .map(|(depth, n)| (depth, n.label.as_str(), n.line))
        .collect();
    assert_eq!(
        order,
        vec![
            (0, "✓ top", 1),
            (1, "", 0),
            (2, "✓ deep", 0),
            (0, "⤷ x", 2),
            (1, "✓ y", 3),
            (0, "✓ z", 4),
        ]
    );
}

#[test]
fn test_summary_resolution_scenario() {
    let pass = parse("    ok 1\n    ok 2\nok 3");
    assert_eq!(pass.roots.len(), 1);
    assert_eq!(pass.roots[0].status, Status::Pass);
    assert_eq!(pass.roots[0].children.len(), 2);
    assert!(pass.diagnostics.is_empty());

    let fail = parse("    ok 1\n    ok 2\nnot ok 3");
    assert_eq!(fail.roots.len(), 1);
    assert_eq!(fail.roots[0].status, Status::Fail);
    assert_eq!(fail.diagnostics.len(), 1);
    assert_eq!(fail.diagnostics[0].line, 2);
    assert_eq!(fail.roots[0].line, 2);
}
