// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! tap-outline-cli library
//!
//! This module exports the command-line configuration and output renderers
//! for use in integration tests and by the `tap-outline` binary.

pub mod config;
pub mod render;
