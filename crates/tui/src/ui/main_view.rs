//! Top-level frame layout: header, body and hint bar, with the toast and
//! confirmation overlays drawn last.

use provadmin_engine::EditMode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::ui::components::{confirmation, hint_bar, provider_form, provider_table, toasts};

const THROBBER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Paragraph::new("").style(app.theme.panel_style()), area);

    let [header, body, hints] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3), Constraint::Length(1)]).areas(area);

    render_header(frame, header, app);
    if app.dashboard.mode().is_editing() {
        provider_form::render(frame, body, app);
    } else {
        provider_table::render(frame, body, app);
    }
    hint_bar::render(frame, hints, app);

    toasts::render(frame, area, app);
    if app.confirmation.is_some() {
        confirmation::render(frame, area, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let list = app.dashboard.list();
    let mode = match app.dashboard.mode() {
        EditMode::Listing => format!("{} providers", list.records().len()),
        EditMode::Creating => "New provider".to_string(),
        EditMode::Updating { id } => match list.find(id) {
            Some(record) => format!("Editing {}", record.name),
            None => format!("Editing {id}"),
        },
    };

    let mut spans = vec![
        Span::styled(" Provider admin ", theme.accent_emphasis_style()),
        Span::styled("│ ", theme.text_muted_style()),
        Span::styled(mode, theme.text_secondary_style()),
    ];
    if app.is_busy() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            THROBBER_FRAMES[app.throbber_idx % THROBBER_FRAMES.len()],
            theme.accent_emphasis_style(),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use provadmin_engine::{Dashboard, Msg};
    use provadmin_types::ProviderRecord;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use crate::ui::theme::Theme;

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).expect("terminal");
        terminal.draw(|frame| draw(frame, app)).expect("draw");
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn app() -> App {
        let mut app = App::new(Dashboard::new(), Theme::ansi256());
        let tickets = app.apply(Msg::LoadRequested);
        let ticket = tickets.into_iter().next().expect("load ticket");
        let mut record = ProviderRecord::new("p-1", "Alpha Net");
        record.email = "ops@alpha.net".into();
        let completion = provadmin_engine::Completion {
            ticket,
            outcome: Ok(provadmin_engine::Response::Providers(vec![record])),
        };
        app.apply(completion.into_msg());
        app
    }

    #[test]
    fn listing_shows_rows_and_hints() {
        let text = screen(&app());
        assert!(text.contains("Alpha Net"));
        assert!(text.contains("1 providers"));
        assert!(text.contains("search"));
    }

    #[test]
    fn new_provider_shows_form_tabs() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        let text = screen(&app);
        assert!(text.contains("New provider"));
        assert!(text.contains("Logins"));
    }
}
