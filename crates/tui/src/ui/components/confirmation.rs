use provadmin_engine::PendingAction;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};

use crate::app::App;
use crate::ui::utils::centered_rect;

/// Yes/no prompt guarding destructive actions.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(confirmation) = app.confirmation.as_ref() else {
        return;
    };
    let theme = &app.theme;
    let title = match confirmation.action {
        PendingAction::DeleteProvider { .. } => "Delete provider",
        PendingAction::ConfirmPayment { .. } => "Confirm payment",
        PendingAction::CancelPayment { .. } => "Cancel payment",
        PendingAction::GeneratePayments { .. } => "Generate payments",
    };

    frame.render_widget(Paragraph::new("").style(theme.modal_background_style()), area);
    let rect = centered_rect(50, 25, area);
    frame.render_widget(Clear, rect);
    let block = theme.block(Some(title), true);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);

    let [message_area, _, buttons_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)]).areas(inner);
    frame.render_widget(
        Paragraph::new(confirmation.prompt.as_str())
            .style(theme.text_primary_style())
            .wrap(Wrap { trim: false }),
        message_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("[y]", theme.accent_emphasis_style()),
            Span::styled(" Yes   ", theme.text_secondary_style()),
            Span::styled("[n]", theme.accent_emphasis_style()),
            Span::styled(" No", theme.text_secondary_style()),
        ])),
        buttons_area,
    );
}
