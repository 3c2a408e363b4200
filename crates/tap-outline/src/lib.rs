// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tap-outline: Test Anything Protocol outline parsing
//!
//! This library crate turns a TAP stream into a navigation tree of
//! assertions and sub-test groups, plus one line-anchored diagnostic for
//! every failure. Parsing is a pure function of the input text: no I/O, no
//! shared state, no error path.

#![warn(missing_docs)]

//! # Example
//!
//! ```
//! use tap_outline::{Status, parse};
//!
//! let outline = parse("ok 1 - a\nnot ok 2 - b\nok 3 - c\n");
//! let statuses: Vec<Status> = outline.roots.iter().map(|n| n.status).collect();
//! assert_eq!(statuses, [Status::Pass, Status::Fail, Status::Pass]);
//! assert_eq!(outline.diagnostics[0].line, 1);
//! assert_eq!(outline.diagnostics[0].message, "b");
//! ```

pub mod classify;
pub mod error;
pub mod lsp;
pub mod outline;
pub mod parser;

pub use error::TapError;
pub use outline::{Diagnostic, Outline, OutlineNode, Status};
pub use parser::{NestingMode, ParseOptions, Parser, parse, parse_file};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::TapError;
    pub use crate::outline::{Diagnostic, Outline, OutlineNode, Status};
    pub use crate::parser::{NestingMode, ParseOptions, Parser, parse};
}
