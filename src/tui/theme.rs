//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeChoice;
use crate::scanner::{CheckStatus, Grade};

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Status colors
    pub passed: Color,
    pub warning: Color,
    pub failed: Color,
    pub pending: Color,
    pub running: Color,

    // Styles
    pub title_style: Style,
    pub header_style: Style,
    pub row_active: Style,

    // General colors
    pub muted: Color,
    pub accent: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            passed: Color::Green,
            warning: Color::Yellow,
            failed: Color::Red,
            pending: Color::DarkGray,
            running: Color::Cyan,
            title_style: Style::new().fg(Color::Cyan).bold(),
            header_style: Style::new().fg(Color::Gray).bold(),
            row_active: Style::new().bg(Color::Indexed(236)),
            muted: Color::Gray,
            accent: Color::Cyan,
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
        }
    }

    pub fn light() -> Self {
        Self {
            passed: Color::Rgb(0, 128, 0),
            warning: Color::Rgb(176, 112, 0),
            failed: Color::Rgb(192, 0, 0),
            pending: Color::Gray,
            running: Color::Blue,
            title_style: Style::new().fg(Color::Blue).bold(),
            header_style: Style::new().fg(Color::DarkGray).bold(),
            row_active: Style::new().bg(Color::Indexed(254)),
            muted: Color::DarkGray,
            accent: Color::Blue,
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
        }
    }

    pub fn status_color(&self, status: CheckStatus) -> Color {
        match status {
            CheckStatus::Pending => self.pending,
            CheckStatus::Running => self.running,
            CheckStatus::Passed => self.passed,
            CheckStatus::Warning => self.warning,
            CheckStatus::Failed => self.failed,
        }
    }

    /// Traffic light: A/B green, C yellow, D/F red
    pub fn grade_color(&self, grade: Grade) -> Color {
        match grade {
            Grade::A | Grade::B => self.passed,
            Grade::C => self.warning,
            Grade::D | Grade::F => self.failed,
        }
    }
}

/// Pick a palette. `Auto` asks the terminal for its background luma and
/// falls back to dark when the terminal does not answer.
pub fn resolve_theme(choice: ThemeChoice) -> ThemeColors {
    match choice {
        ThemeChoice::Dark => ThemeColors::dark(),
        ThemeChoice::Light => ThemeColors::light(),
        ThemeChoice::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            _ => ThemeColors::dark(),
        },
    }
}
