// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tap-outline: show the test tree and failures of a TAP stream
//!
//! Reads a TAP document from a file or stdin and prints its outline in one
//! of several formats. Logs go to stderr.

use std::io::{Read, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser as _;
use tap_outline::Parser;
use tap_outline_cli::config::Config;
use tap_outline_cli::render;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_level().into()),
        )
        .init();

    match run(&config) {
        Ok(code) => code,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> anyhow::Result<ExitCode> {
    config.validate()?;

    let text = read_input(config)?;
    let parser = Parser::with_options(config.parse_options());
    debug!(options = ?parser.options(), "Parsing TAP input");
    let outline = parser.parse(&text);
    info!(
        nodes = outline.node_count(),
        failures = outline.failure_count(),
        "Parsed TAP input"
    );

    let output = render::render(&outline, &text, config.format)
        .context("Failed to render outline")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output.trim_end()).context("Failed to write output")?;

    if config.check && !outline.is_passing() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}

fn read_input(config: &Config) -> anyhow::Result<String> {
    match config.input_path() {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read TAP from stdin")?;
            Ok(text)
        }
    }
}
