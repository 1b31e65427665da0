//! Search box and provider table shown while listing.

use provadmin_types::Severity;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use crate::app::{App, Focus};

const COLUMNS: [&str; 5] = ["Name", "Email", "CNPJ", "City/State", "Status"];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let [search_area, table_area] = Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);
    render_search(frame, search_area, app);
    render_table(frame, table_area, app);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Search;
    let block = theme.block(Some("Search (name, email or CNPJ)"), focused);
    let inner = block.inner(area);

    let content = if app.search.input().is_empty() && !focused {
        Line::from(Span::styled("press / to search", theme.text_muted_style()))
    } else {
        Line::from(Span::styled(app.search.input().to_string(), theme.text_primary_style()))
    };
    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused {
        frame.set_cursor_position(Position::new(inner.x + app.search.cursor_column(), inner.y));
    }
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let list = app.dashboard.list();
    let visible = list.visible();
    let title = format!("Providers ({}/{})", visible.len(), list.records().len());

    let header = Row::new(COLUMNS.iter().map(|column| Cell::from(*column))).style(theme.table_header_style());
    let rows = visible.iter().map(|record| {
        let status_style = if record.is_blocked || !record.is_active {
            theme.severity_style(Severity::Error)
        } else {
            theme.severity_style(Severity::Success)
        };
        Row::new(vec![
            Cell::from(record.name.clone()),
            Cell::from(record.email.clone()),
            Cell::from(record.cnpj.clone().unwrap_or_else(|| "-".to_string())),
            Cell::from(record.location_label()),
            Cell::from(Span::styled(record.status_label(), status_style)),
        ])
    });

    let widths = [
        Constraint::Percentage(26),
        Constraint::Percentage(28),
        Constraint::Percentage(18),
        Constraint::Percentage(16),
        Constraint::Percentage(12),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(theme.block(Some(title.as_str()), app.focus == Focus::Table))
        .row_highlight_style(theme.selection_style())
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(list.selected_visible_index());
    frame.render_stateful_widget(table, area, &mut state);

    if visible.is_empty() && area.height > 3 && area.width > 4 {
        let message = if list.is_loading() {
            "Loading providers…"
        } else {
            "No providers found"
        };
        let inner = Rect {
            x: area.x + 2,
            y: area.y + 2,
            width: area.width.saturating_sub(4),
            height: 1,
        };
        frame.render_widget(Paragraph::new(Span::styled(message, theme.text_muted_style())), inner);
    }
}
