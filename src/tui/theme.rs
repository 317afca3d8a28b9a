// SPDX-FileCopyrightText: 2026 Flowsketch Authors
// SPDX-License-Identifier: MIT

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, Default)]
pub(crate) struct TuiTheme;

impl TuiTheme {
    pub(crate) fn base_style(&self) -> Style {
        Style::default()
    }

    pub(crate) fn panel_border_style(&self, focused: bool) -> Style {
        if focused {
            self.base_style().fg(Color::Yellow)
        } else {
            self.base_style()
        }
    }

    /// Distinct style for the drop zone while the file prompt is active.
    pub(crate) fn drop_zone_style(&self, active: bool) -> Style {
        if active {
            self.base_style().fg(Color::LightBlue).add_modifier(Modifier::BOLD)
        } else {
            self.base_style().fg(Color::DarkGray)
        }
    }

    pub(crate) fn error_style(&self) -> Style {
        self.base_style().fg(Color::Red)
    }

    pub(crate) fn loading_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub(crate) fn suggestion_style(&self) -> Style {
        self.base_style().fg(Color::LightGreen).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn footer_key_style(&self) -> Style {
        self.base_style().fg(Color::Cyan)
    }

    pub(crate) fn footer_label_style(&self) -> Style {
        self.base_style().fg(Color::Gray)
    }

    pub(crate) fn toast_style(&self) -> Style {
        self.base_style().fg(Color::White).add_modifier(Modifier::BOLD)
    }
}
