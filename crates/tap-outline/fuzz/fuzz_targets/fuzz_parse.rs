// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for the TAP outline parser
//!
//! Parsing must never panic, and every failing node must be matched by
//! exactly one diagnostic in both nesting modes.

#![no_main]

use libfuzzer_sys::fuzz_target;

use tap_outline::{NestingMode, ParseOptions, Parser, Status};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        for mode in [NestingMode::Inferred, NestingMode::Explicit] {
            let parser = Parser::with_options(ParseOptions::default().mode(mode));
            let outline = parser.parse(input);

            let failing = outline
                .nodes()
                .filter(|(_, n)| n.status == Status::Fail)
                .count();
            assert_eq!(failing, outline.diagnostics.len());
        }

        // YAML block tracking must not panic either
        let yaml = Parser::with_options(ParseOptions::default().with_yaml_messages());
        let _ = yaml.parse(input);
    }
});
