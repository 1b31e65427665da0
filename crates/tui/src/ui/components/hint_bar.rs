//! Single-line strip of key bindings for the current mode.

use provadmin_types::FormTab;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, Focus};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = Vec::new();
    for (key, action) in hints(app) {
        spans.push(Span::styled(*key, theme.accent_emphasis_style()));
        spans.push(Span::styled(format!(" {action}  "), theme.text_muted_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn hints(app: &App) -> &'static [(&'static str, &'static str)] {
    if app.confirmation.is_some() {
        return &[("y/Enter", "confirm"), ("n/Esc", "decline")];
    }
    match app.focus {
        Focus::Search => &[("Enter", "done"), ("Esc", "clear")],
        Focus::Table => &[
            ("n", "new"),
            ("e/Enter", "edit"),
            ("d", "delete"),
            ("b", "block/unblock"),
            ("/", "search"),
            ("r", "reload"),
            ("q", "quit"),
        ],
        Focus::Form if app.dashboard.editor().active_tab() == FormTab::Billing => &[
            ("Ctrl+S", "save"),
            ("Esc", "cancel"),
            ("←/→", "change"),
            ("Ctrl+F", "filter"),
            ("PgUp/PgDn", "payment"),
            ("Ctrl+Y", "confirm pay"),
            ("Ctrl+X", "cancel pay"),
            ("Ctrl+K", "copy code"),
            ("Ctrl+↑/↓", "installments"),
            ("Ctrl+G", "generate"),
            ("Ctrl+R", "refresh"),
        ],
        Focus::Form => &[
            ("Ctrl+S", "save"),
            ("Esc", "cancel"),
            ("Tab/Shift+Tab", "tab"),
            ("↑/↓", "field"),
            ("Ctrl+P", "show password"),
        ],
    }
}
