// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Flowsketch — terminal text-to-diagram client.
//!
//! Turns free-form process descriptions into rendered Mermaid flow diagrams:
//! direct typing or `.txt` file ingestion, keyword-based template suggestion,
//! remote diagram-code generation over HTTP, and SVG/PNG/PDF export.

pub mod export;
pub mod generate;
pub mod ingest;
pub mod model;
pub mod render;
pub mod template;
pub mod tui;

#[cfg(test)]
pub(crate) mod test_utils;
