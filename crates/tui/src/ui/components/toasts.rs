use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};

use crate::app::App;

const TOAST_WIDTH: u16 = 44;

/// Stacks pending notifications in the top-right corner.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let width = TOAST_WIDTH.min(area.width);
    for (row, toast) in app.toasts.iter().enumerate() {
        let y = area.y + 1 + (row as u16) * 3;
        if y + 3 > area.bottom() {
            break;
        }
        let rect = Rect::new(area.right().saturating_sub(width + 1), y, width, 3);
        let style = theme.severity_style(toast.notification.severity);
        let block = theme
            .block(None, false)
            .border_style(style)
            .title(Span::styled(format!(" {} ", toast.notification.severity), style));
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                toast.notification.message.as_str(),
                theme.text_primary_style(),
            )))
            .block(block),
            rect,
        );
    }
}
