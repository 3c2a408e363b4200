// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for tap-outline

use thiserror::Error;

/// Errors that can occur while reading TAP input or serializing an outline
///
/// Parsing itself never fails; malformed TAP degrades into ignored lines and
/// unresolved groups instead.
#[derive(Debug, Error)]
pub enum TapError {
    /// Error reading TAP input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error serializing an outline to JSON
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
