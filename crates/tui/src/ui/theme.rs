//! Theme styling for the dashboard.
//!
//! Two palettes are provided: Dracula for truecolor terminals and an ANSI
//! 256-color fallback. Widgets ask for semantic roles instead of hard-coding
//! colors. Set `PROVADMIN_THEME=dracula|ansi256` to force a palette.

use std::env;

use provadmin_types::Severity;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders};
use tracing::debug;

pub const THEME_ENV: &str = "PROVADMIN_THEME";

/// Semantic color roles used throughout the UI.
#[derive(Debug, Clone)]
pub struct ThemeRoles {
    pub surface: Color,
    pub surface_muted: Color,
    pub border: Color,

    pub text: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub accent_primary: Color,
    pub accent_secondary: Color,

    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    pub selection_bg: Color,
    pub selection_fg: Color,
    pub focus: Color,
    pub modal_bg: Color,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    roles: ThemeRoles,
}

impl Theme {
    pub fn dracula() -> Self {
        // https://draculatheme.com/contribute
        let background = Color::Rgb(0x28, 0x2A, 0x36);
        let current_line = Color::Rgb(0x44, 0x47, 0x5A);
        let foreground = Color::Rgb(0xF8, 0xF8, 0xF2);
        let comment = Color::Rgb(0x62, 0x72, 0xA4);
        let cyan = Color::Rgb(0x8B, 0xE9, 0xFD);
        Self {
            name: "dracula",
            roles: ThemeRoles {
                surface: background,
                surface_muted: current_line,
                border: current_line,
                text: foreground,
                text_secondary: comment,
                text_muted: comment,
                accent_primary: Color::Rgb(0xFF, 0x79, 0xC6),
                accent_secondary: cyan,
                info: cyan,
                success: Color::Rgb(0x50, 0xFA, 0x7B),
                warning: Color::Rgb(0xFF, 0xB8, 0x6C),
                error: Color::Rgb(0xFF, 0x55, 0x55),
                selection_bg: current_line,
                selection_fg: foreground,
                focus: cyan,
                modal_bg: Color::Rgb(0x1D, 0x1F, 0x27),
            },
        }
    }

    pub fn ansi256() -> Self {
        Self {
            name: "ansi256",
            roles: ThemeRoles {
                surface: Color::Indexed(235),
                surface_muted: Color::Indexed(237),
                border: Color::Indexed(240),
                text: Color::Indexed(252),
                text_secondary: Color::Indexed(246),
                text_muted: Color::Indexed(243),
                accent_primary: Color::Indexed(212),
                accent_secondary: Color::Indexed(117),
                info: Color::Indexed(117),
                success: Color::Indexed(114),
                warning: Color::Indexed(215),
                error: Color::Indexed(203),
                selection_bg: Color::Indexed(238),
                selection_fg: Color::Indexed(255),
                focus: Color::Indexed(117),
                modal_bg: Color::Indexed(233),
            },
        }
    }

    pub fn roles(&self) -> &ThemeRoles {
        &self.roles
    }

    pub fn text_primary_style(&self) -> Style {
        Style::default().fg(self.roles.text)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.roles.text_secondary)
    }

    pub fn text_muted_style(&self) -> Style {
        Style::default().fg(self.roles.text_muted)
    }

    pub fn accent_emphasis_style(&self) -> Style {
        Style::default()
            .fg(self.roles.accent_primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self, focused: bool) -> Style {
        let color = if focused { self.roles.focus } else { self.roles.border };
        Style::default().fg(color)
    }

    pub fn panel_style(&self) -> Style {
        Style::default().bg(self.roles.surface).fg(self.roles.text)
    }

    pub fn selection_style(&self) -> Style {
        Style::default()
            .fg(self.roles.selection_fg)
            .bg(self.roles.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn table_header_style(&self) -> Style {
        Style::default()
            .bg(self.roles.surface_muted)
            .fg(self.roles.text_secondary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn modal_background_style(&self) -> Style {
        Style::default().bg(self.roles.modal_bg)
    }

    pub fn severity_style(&self, severity: Severity) -> Style {
        let color = match severity {
            Severity::Info => self.roles.info,
            Severity::Success => self.roles.success,
            Severity::Warning => self.roles.warning,
            Severity::Error => self.roles.error,
        };
        Style::default().fg(color)
    }

    /// Standard bordered block with an optional bold title.
    pub fn block<'a>(&self, title: Option<&'a str>, focused: bool) -> Block<'a> {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(self.border_style(focused))
            .style(self.panel_style());
        if let Some(title) = title {
            block = block.title(Span::styled(
                format!(" {title} "),
                self.text_secondary_style().add_modifier(Modifier::BOLD),
            ));
        }
        block
    }
}

/// Picks a palette from `PROVADMIN_THEME`, falling back on terminal color support.
pub fn load() -> Theme {
    if let Ok(name) = env::var(THEME_ENV) {
        match name.trim().to_ascii_lowercase().as_str() {
            "dracula" => return Theme::dracula(),
            "ansi256" => return Theme::ansi256(),
            other => debug!(theme = other, "unknown theme override; detecting"),
        }
    }
    let truecolor = env::var("COLORTERM")
        .map(|value| {
            let value = value.to_ascii_lowercase();
            value.contains("truecolor") || value.contains("24bit")
        })
        .unwrap_or(false);
    if truecolor { Theme::dracula() } else { Theme::ansi256() }
}
