//! Six-tab edit form for the draft being created or updated.

use provadmin_engine::EditMode;
use provadmin_types::{DraftField, FieldKind, FormTab};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Position, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};

use crate::app::App;
use crate::ui::components::payments_panel;

const LABEL_WIDTH: u16 = 18;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editor = app.dashboard.editor();
    let title = match editor.mode() {
        EditMode::Creating => "New provider".to_string(),
        EditMode::Updating { id } => format!("Edit provider {id}"),
        EditMode::Listing => "Provider".to_string(),
    };
    let block = theme.block(Some(title.as_str()), true);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let show_payments = editor.active_tab() == FormTab::Billing && editor.mode().updating_id().is_some();
    let [tabs_area, fields_area, payments_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(editor.active_tab().fields().len() as u16 + 1),
        Constraint::Min(if show_payments { 6 } else { 0 }),
    ])
    .areas(inner);

    let titles = FormTab::ALL
        .iter()
        .map(|tab| Span::raw(format!(" {} ", tab.title())))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(editor.active_tab().index())
        .style(theme.text_secondary_style())
        .highlight_style(
            theme
                .text_primary_style()
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::UNDERLINED),
        );
    frame.render_widget(tabs, tabs_area);

    render_fields(frame, fields_area, app);

    if show_payments {
        payments_panel::render(frame, payments_area, app);
    }
}

fn render_fields(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let editor = app.dashboard.editor();
    let Some(draft) = editor.draft() else {
        return;
    };
    let focused = app.focused_field();

    let lines = editor
        .active_tab()
        .fields()
        .iter()
        .map(|field| {
            let is_focused = *field == focused;
            let marker = if field.is_required() { "*" } else { " " };
            let label = format!("{:<width$}", format!("{}{}", field.label(), marker), width = LABEL_WIDTH as usize);
            let label_style = if is_focused {
                theme.accent_emphasis_style()
            } else {
                theme.text_secondary_style()
            };
            let value_style = if is_focused {
                theme.selection_style()
            } else {
                theme.text_primary_style()
            };
            let value = if is_focused && !matches!(field.kind(), FieldKind::Choice(_)) {
                field_value(*field, app.field_input.input(), editor.show_password())
            } else {
                field_value(*field, draft.get(*field), editor.show_password())
            };
            Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(value, value_style),
            ])
        })
        .collect::<Vec<_>>();
    frame.render_widget(Paragraph::new(lines), area);

    if !matches!(focused.kind(), FieldKind::Choice(_) | FieldKind::Secret)
        && let Some(row) = editor.active_tab().fields().iter().position(|field| *field == focused)
    {
        let x = area.x + LABEL_WIDTH + app.field_input.cursor_column();
        let y = area.y + row as u16;
        if x < area.right() && y < area.bottom() {
            frame.set_cursor_position(Position::new(x, y));
        }
    }
}

/// Text shown for a field value: masked secrets, labelled choices.
pub fn field_value(field: DraftField, raw: &str, reveal_secret: bool) -> String {
    match field.kind() {
        FieldKind::Secret if !reveal_secret => {
            if raw.is_empty() {
                "(unchanged)".to_string()
            } else {
                "•".repeat(raw.chars().count())
            }
        }
        FieldKind::Choice(_) => format!("◀ {} ▶", field.display_value(raw)),
        _ => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_are_masked_until_revealed() {
        assert_eq!(field_value(DraftField::Password, "abc", false), "•••");
        assert_eq!(field_value(DraftField::Password, "abc", true), "abc");
        assert_eq!(field_value(DraftField::Password, "", false), "(unchanged)");
    }

    #[test]
    fn choices_show_labels() {
        let shown = field_value(DraftField::PaymentMethod, "pix", false);
        assert!(shown.starts_with("◀ "));
        assert_ne!(shown, "◀ pix ▶");
        assert_eq!(field_value(DraftField::City, "Recife", false), "Recife");
    }
}
