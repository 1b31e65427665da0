//! Billing history of the provider being edited.

use chrono::{DateTime, Utc};
use provadmin_types::{PaymentFilter, PaymentStatus, ProviderPayment, Severity};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};

use crate::app::App;
use crate::ui::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let panel = app.dashboard.payments();
    let now = app.dashboard.now();
    let block = theme.block(Some("Payments"), false);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [filter_area, table_area] = Layout::vertical([Constraint::Length(1), Constraint::Min(1)]).areas(inner);

    let mut spans = vec![Span::styled("Filter: ", theme.text_secondary_style())];
    for filter in PaymentFilter::ALL {
        let style = if filter == panel.filter() {
            theme.accent_emphasis_style()
        } else {
            theme.text_muted_style()
        };
        spans.push(Span::styled(format!("{filter} "), style));
    }
    spans.push(Span::styled(
        format!(" Installments: {}", panel.installments()),
        theme.text_secondary_style(),
    ));
    if panel.is_loading() {
        spans.push(Span::styled(" loading…", theme.text_muted_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), filter_area);

    let visible = app.dashboard.visible_payments();
    if visible.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No payments", theme.text_muted_style())),
            table_area,
        );
        return;
    }

    let header = Row::new(["Description", "Amount", "Due", "Paid", "Status", "Document"]).style(theme.table_header_style());
    let rows = visible.iter().map(|payment| payment_row(payment, now, theme));
    let widths = [
        Constraint::Percentage(26),
        Constraint::Percentage(12),
        Constraint::Percentage(12),
        Constraint::Percentage(12),
        Constraint::Percentage(10),
        Constraint::Percentage(28),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .row_highlight_style(theme.selection_style());
    let mut state = TableState::default().with_selected(Some(panel.cursor()));
    frame.render_stateful_widget(table, table_area, &mut state);
}

fn payment_row<'a>(payment: &'a ProviderPayment, now: DateTime<Utc>, theme: &Theme) -> Row<'a> {
    let (status, style) = status_cell(payment, now, theme);
    Row::new(vec![
        Cell::from(payment.description.as_deref().unwrap_or("-")),
        Cell::from(payment.amount.map(|amount| format!("{amount:.2}")).unwrap_or_else(|| "-".into())),
        Cell::from(format_date(payment.expires_at)),
        Cell::from(format_date(payment.paid_at)),
        Cell::from(Span::styled(status, style)),
        Cell::from(payment.document_link().unwrap_or("not available")),
    ])
}

fn status_cell(payment: &ProviderPayment, now: DateTime<Utc>, theme: &Theme) -> (String, Style) {
    if payment.is_overdue(now) {
        return ("overdue".to_string(), theme.severity_style(Severity::Error));
    }
    let style = match payment.status {
        PaymentStatus::Paid => theme.severity_style(Severity::Success),
        PaymentStatus::Pending => theme.severity_style(Severity::Warning),
        PaymentStatus::Waiting => theme.severity_style(Severity::Info),
        _ => theme.text_muted_style(),
    };
    (payment.status.as_str().to_string(), style)
}

fn format_date(instant: Option<DateTime<Utc>>) -> String {
    instant
        .map(|instant| instant.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}
