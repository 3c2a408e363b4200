// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Configuration for the tap-outline command
//!
//! This module provides the command-line options, including the input
//! source, output format, nesting mode, and logging options.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tap_outline::{NestingMode, ParseOptions};

/// TAP outline - show the test tree and failures of a TAP stream
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "tap-outline")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// TAP file to read
    ///
    /// Reads standard input when omitted or `-`.
    pub input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, env = "TAP_OUTLINE_FORMAT", default_value_t)]
    pub format: OutputFormat,

    /// How nesting is derived from indentation
    ///
    /// `inferred` groups indented assertions and folds the following summary
    /// line into the group; `explicit` only nests under `# Subtest:` markers.
    #[arg(short, long, value_enum, env = "TAP_OUTLINE_MODE", default_value_t)]
    pub mode: Mode,

    /// Use the `message:` of a failing test's YAML block as its diagnostic
    #[arg(long, default_value = "false")]
    pub yaml_messages: bool,

    /// Exit with status 1 if any test failed
    #[arg(long, default_value = "false")]
    pub check: bool,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so stdout stays machine-readable.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented outline followed by the failure list
    #[default]
    Tree,
    /// Outline and diagnostics as JSON
    Json,
    /// LSP document symbols as JSON
    Symbols,
    /// LSP diagnostics as JSON
    Diagnostics,
}

/// Nesting modes
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Infer groups from indentation and resolve summary lines
    #[default]
    Inferred,
    /// Nest only under `# Subtest:` markers
    Explicit,
}

impl From<Mode> for NestingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Inferred => NestingMode::Inferred,
            Mode::Explicit => NestingMode::Explicit,
        }
    }
}

impl Config {
    /// Get the input file, or `None` when reading stdin
    #[must_use]
    pub fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    /// Build parser options from the flags
    #[must_use]
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            mode: self.mode.into(),
            yaml_messages: self.yaml_messages,
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the input path is given but doesn't exist or is
    /// not a regular file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(input) = self.input_path() {
            if !input.exists() {
                return Err(ConfigError::InputNotFound(input.to_path_buf()));
            }
            if !input.is_file() {
                return Err(ConfigError::InputNotFile(input.to_path_buf()));
            }
        }
        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Input path not found
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path is not a regular file
    #[error("Input path is not a file: {0}")]
    InputNotFile(PathBuf),
}
