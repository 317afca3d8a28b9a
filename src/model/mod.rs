// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

//! Application state and transitions.
//!
//! All session state lives in one explicit, serializable struct owned by the
//! TUI app. Nothing mutates it except the discrete transition functions below,
//! one per user action, so every state change has a single named cause.

use serde::{Deserialize, Serialize};

use crate::generate::GenerateError;
use crate::template::{detect, TemplateKey};

/// The one user-visible generation failure message, regardless of cause.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate diagram.";

/// Transient single-session state: the source text, the advisor's suggestion,
/// the last generated diagram markup, and the request/prompt status flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppState {
    source_text: String,
    suggestion: Option<TemplateKey>,
    markup: String,
    loading: bool,
    error: String,
    prompt_active: bool,
}

impl AppState {
    pub fn source_text(&self) -> &str {
        &self.source_text
    }

    pub fn suggestion(&self) -> Option<TemplateKey> {
        self.suggestion
    }

    /// The diagram markup returned by the last successful generation, or empty.
    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// The current inline error message, or empty.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn prompt_active(&self) -> bool {
        self.prompt_active
    }

    /// Replaces the source text from a keystroke. Detection re-runs
    /// synchronously; there is no debounce.
    pub fn edit_source(&mut self, text: String) {
        self.replace_source(text);
    }

    /// Replaces the source text with the decoded content of an accepted file.
    pub fn load_file_text(&mut self, text: String) {
        self.replace_source(text);
    }

    /// Replaces the source text wholesale with the canned template for the
    /// current suggestion. Returns `false` when there is no suggestion.
    ///
    /// Detection re-runs on the inserted template text, keeping the invariant
    /// that the suggestion is always a pure function of the source text. The
    /// order template mentions payment, so applying it legitimately flips the
    /// suggestion to PAYMENT.
    pub fn apply_template(&mut self) -> bool {
        let Some(key) = self.suggestion else {
            return false;
        };
        self.replace_source(key.template().to_owned());
        true
    }

    /// Starts a generation request. A no-op returning `false` when the source
    /// text is empty or whitespace-only; otherwise flags loading and clears
    /// the previous error and markup.
    pub fn begin_generation(&mut self) -> bool {
        if self.source_text.trim().is_empty() {
            return false;
        }
        self.loading = true;
        self.error.clear();
        self.markup.clear();
        true
    }

    /// Applies the outcome of a generation request. Success stores the markup
    /// verbatim; failure of any kind sets the fixed error message and leaves
    /// the markup empty. Loading is cleared last on both paths.
    pub fn finish_generation(&mut self, outcome: Result<String, GenerateError>) {
        match outcome {
            Ok(markup) => {
                self.markup = markup;
                self.error.clear();
            }
            Err(_) => {
                self.markup.clear();
                self.error = GENERATION_FAILED_MESSAGE.to_owned();
            }
        }
        self.loading = false;
    }

    /// Reports an input error inline; no other state changes.
    pub fn set_input_error(&mut self, message: String) {
        self.error = message;
    }

    /// Marks the file prompt (the drop zone) active.
    pub fn open_prompt(&mut self) {
        self.prompt_active = true;
    }

    /// Clears the prompt flag, regardless of whether a read followed or how
    /// it went.
    pub fn close_prompt(&mut self) {
        self.prompt_active = false;
    }

    fn replace_source(&mut self, text: String) {
        self.source_text = text;
        self.suggestion = detect(&self.source_text);
    }
}
