// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Render trigger and target.
//!
//! The rendering engine is external. [`RenderTarget`] is the diagram
//! container: generated markup is committed into it, and the engine scans it
//! and renders an SVG in place. The engine only runs after a commit returns,
//! which replaces the original fixed-delay re-render timer with an explicit
//! markup-committed signal. Engine faults are not caught here; they propagate
//! to the caller.

use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

const MARKUP_FILENAME: &str = "diagram.mmd";
const RENDERED_SVG_FILENAME: &str = "rendered.svg";

pub const DEFAULT_RENDER_COMMAND: &str = "mmdc";

#[derive(Debug)]
pub enum RenderError {
    Io { path: PathBuf, source: io::Error },
    EngineLaunch { command: String, source: io::Error },
    EngineFailed { command: String, status: ExitStatus },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::EngineLaunch { command, source } => {
                write!(f, "cannot launch rendering engine {command:?}: {source}")
            }
            Self::EngineFailed { command, status } => {
                write!(f, "rendering engine {command:?} failed: {status}")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::EngineLaunch { source, .. } => Some(source),
            Self::EngineFailed { .. } => None,
        }
    }
}

/// The on-disk region the diagram lives in: one committed markup file and,
/// once the engine has run, one rendered SVG next to it.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    dir: PathBuf,
}

impl RenderTarget {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn markup_path(&self) -> PathBuf {
        self.dir.join(MARKUP_FILENAME)
    }

    pub fn rendered_svg_path(&self) -> PathBuf {
        self.dir.join(RENDERED_SVG_FILENAME)
    }

    /// Writes the markup into the target. The engine must only run after this
    /// returns.
    pub fn commit(&self, markup: &str) -> Result<(), RenderError> {
        fs::create_dir_all(&self.dir)
            .map_err(|source| RenderError::Io { path: self.dir.clone(), source })?;
        let path = self.markup_path();
        fs::write(&path, markup).map_err(|source| RenderError::Io { path, source })
    }

    pub fn has_committed_markup(&self) -> bool {
        self.markup_path().is_file()
    }

    /// The rendered SVG markup, if the engine has produced one.
    pub fn rendered_svg(&self) -> Option<String> {
        fs::read_to_string(self.rendered_svg_path()).ok()
    }
}

/// Seam to the external rendering engine.
pub trait RenderEngine {
    /// Scans the target for committed markup and renders it in place. Doing
    /// nothing when no markup is committed mirrors render-on-load being
    /// disabled at startup.
    fn run(&self, target: &RenderTarget) -> Result<(), RenderError>;
}

/// Production engine: the Mermaid CLI invoked as a subprocess. Construction
/// performs no rendering.
#[derive(Debug, Clone)]
pub struct MermaidCli {
    command: String,
}

impl MermaidCli {
    pub fn new(command: impl Into<String>) -> Self {
        Self { command: command.into() }
    }
}

impl Default for MermaidCli {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_COMMAND)
    }
}

impl RenderEngine for MermaidCli {
    fn run(&self, target: &RenderTarget) -> Result<(), RenderError> {
        if !target.has_committed_markup() {
            return Ok(());
        }

        let status = Command::new(&self.command)
            .arg("-i")
            .arg(target.markup_path())
            .arg("-o")
            .arg(target.rendered_svg_path())
            .status()
            .map_err(|source| RenderError::EngineLaunch {
                command: self.command.clone(),
                source,
            })?;

        if !status.success() {
            return Err(RenderError::EngineFailed { command: self.command.clone(), status });
        }
        Ok(())
    }
}
