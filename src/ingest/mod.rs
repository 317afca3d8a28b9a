// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Text-file ingestion.
//!
//! The terminal analogue of the drop zone: a path arrives from the file
//! prompt, and only names ending in the literal `.txt` suffix are accepted.
//! Accepted files are read as UTF-8 text and replace the source text
//! wholesale.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum IngestError {
    /// The file name does not end in `.txt`. No state changes.
    UnsupportedExtension,
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedExtension => write!(f, "Only .txt files are supported"),
            Self::Io { path, source } => write!(f, "cannot read {path:?}: {source}"),
        }
    }
}

impl std::error::Error for IngestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnsupportedExtension => None,
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Reads the whole file as UTF-8 text after the `.txt` suffix check.
pub fn load_text_file(path: &Path) -> Result<String, IngestError> {
    let file_name = path.file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    if !file_name.ends_with(".txt") {
        return Err(IngestError::UnsupportedExtension);
    }
    fs::read_to_string(path).map_err(|source| IngestError::Io { path: path.to_path_buf(), source })
}
