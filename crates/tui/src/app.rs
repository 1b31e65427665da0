//! Application state and key routing for the provider dashboard TUI.
//!
//! `App` wraps the engine's [`Dashboard`] with terminal-only concerns: which
//! pane has the keyboard, the text buffers behind the search box and the
//! focused form field, the open confirmation prompt and the toast queue.
//! Every user intent becomes a [`Msg`]; the gateway tickets it produces are
//! handed back to the runtime to be spawned.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use provadmin_engine::{Confirmation, Dashboard, Effect, Msg, Ticket};
use provadmin_types::{DraftField, FieldKind, FormTab, Notification};
use tracing::warn;

use crate::ui::components::TextInputState;
use crate::ui::theme::Theme;

/// How long a toast stays on screen.
pub const TOAST_TTL: Duration = Duration::from_secs(4);
const MAX_TOASTS: usize = 4;

/// Which pane receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Table,
    Search,
    Form,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub expires_at: Instant,
}

pub struct App {
    pub dashboard: Dashboard,
    pub theme: Theme,
    pub focus: Focus,
    /// Search box buffer
    pub search: TextInputState,
    /// Buffer mirroring the focused draft field
    pub field_input: TextInputState,
    /// Open yes/no prompt, if any
    pub confirmation: Option<Confirmation>,
    pub toasts: VecDeque<Toast>,
    pub should_quit: bool,
    /// Animation frame for the activity throbber
    pub throbber_idx: usize,
}

impl App {
    pub fn new(dashboard: Dashboard, theme: Theme) -> Self {
        Self {
            dashboard,
            theme,
            focus: Focus::Table,
            search: TextInputState::new(),
            field_input: TextInputState::new(),
            confirmation: None,
            toasts: VecDeque::new(),
            should_quit: false,
            throbber_idx: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.dashboard.in_flight() > 0 || self.dashboard.list().is_loading()
    }

    /// Feeds a message to the dashboard and returns the calls to spawn.
    ///
    /// Confirmation requests open the modal instead of leaving the app.
    pub fn apply(&mut self, msg: Msg) -> Vec<Ticket> {
        let effects = self.dashboard.update(msg);
        let mut tickets = Vec::new();
        for effect in effects {
            match effect {
                Effect::Dispatch(ticket) => tickets.push(ticket),
                Effect::Confirm(confirmation) => self.confirmation = Some(confirmation),
            }
        }
        self.sync_focus();
        self.collect_toasts(Instant::now());
        tickets
    }

    /// Advances animations and expires toasts. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at > now);
        let busy = self.is_busy();
        if busy {
            self.throbber_idx = (self.throbber_idx + 1) % 10;
        }
        busy || before != self.toasts.len()
    }

    fn collect_toasts(&mut self, now: Instant) {
        for notification in self.dashboard.drain_notifications() {
            self.push_toast(notification, now);
        }
    }

    fn push_toast(&mut self, notification: Notification, now: Instant) {
        self.toasts.push_back(Toast {
            notification,
            expires_at: now + TOAST_TTL,
        });
        while self.toasts.len() > MAX_TOASTS {
            self.toasts.pop_front();
        }
    }

    /// Keeps the keyboard focus consistent with the editing mode.
    fn sync_focus(&mut self) {
        let editing = self.dashboard.mode().is_editing();
        match (editing, self.focus) {
            (true, Focus::Table | Focus::Search) => {
                self.focus = Focus::Form;
                self.load_field_input();
            }
            (false, Focus::Form) => self.focus = Focus::Table,
            _ => {}
        }
    }

    pub fn focused_field(&self) -> DraftField {
        self.dashboard.editor().focused_field()
    }

    fn load_field_input(&mut self) {
        let value = self
            .dashboard
            .editor()
            .draft()
            .map(|draft| draft.get(self.focused_field()).to_string())
            .unwrap_or_default();
        self.field_input.reset(value);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Ticket> {
        if let Some(confirmation) = self.confirmation.take() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.apply(Msg::Confirmed(confirmation.action))
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.apply(Msg::Declined(confirmation.action)),
                _ => {
                    self.confirmation = Some(confirmation);
                    Vec::new()
                }
            };
        }

        match self.focus {
            Focus::Table => self.handle_table_key(key),
            Focus::Search => self.handle_search_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    fn selected_id(&self) -> Option<String> {
        self.dashboard.list().selected_id().map(str::to_string)
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> Vec<Ticket> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('/') => {
                self.focus = Focus::Search;
                Vec::new()
            }
            KeyCode::Char('n') => self.apply(Msg::NewRequested),
            KeyCode::Char('e') | KeyCode::Enter => self.with_selection(Msg::EditRequested),
            KeyCode::Char('d') => self.with_selection(Msg::DeleteRequested),
            KeyCode::Char('b') => self.with_selection(Msg::BlockToggleRequested),
            KeyCode::Char('r') => self.apply(Msg::LoadRequested),
            KeyCode::Up | KeyCode::Char('k') => self.apply(Msg::MoveSelection(-1)),
            KeyCode::Down | KeyCode::Char('j') => self.apply(Msg::MoveSelection(1)),
            KeyCode::PageUp => self.apply(Msg::MoveSelection(-10)),
            KeyCode::PageDown => self.apply(Msg::MoveSelection(10)),
            KeyCode::Esc => self.apply(Msg::ClearSelection),
            _ => Vec::new(),
        }
    }

    fn with_selection(&mut self, build: impl FnOnce(String) -> Msg) -> Vec<Ticket> {
        match self.selected_id() {
            Some(id) => self.apply(build(id)),
            None => Vec::new(),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Vec<Ticket> {
        match key.code {
            KeyCode::Enter => {
                self.focus = Focus::Table;
                return Vec::new();
            }
            KeyCode::Esc => {
                self.search.clear();
                self.focus = Focus::Table;
            }
            KeyCode::Left => self.search.move_left(),
            KeyCode::Right => self.search.move_right(),
            KeyCode::Home => self.search.move_home(),
            KeyCode::End => self.search.move_end(),
            KeyCode::Backspace => self.search.backspace(),
            KeyCode::Delete => self.search.delete(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => self.search.insert_char(c),
            _ => return Vec::new(),
        }
        self.apply(Msg::SearchChanged(self.search.input().to_string()))
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Vec<Ticket> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let field = self.focused_field();
        let choice = matches!(field.kind(), FieldKind::Choice(_));

        match key.code {
            KeyCode::Char('s') if ctrl => self.apply(Msg::SaveRequested),
            KeyCode::Char('p') if ctrl => self.apply(Msg::TogglePasswordVisibility),
            KeyCode::Char('f') if ctrl => {
                let next = self.dashboard.payments().filter().next();
                self.apply(Msg::PaymentFilterChanged(next))
            }
            KeyCode::Char('r') if ctrl => self.apply(Msg::PaymentsRefreshRequested),
            KeyCode::Char('y') if ctrl => self.with_payment(Msg::ConfirmPaymentRequested),
            KeyCode::Char('x') if ctrl => self.with_payment(Msg::CancelPaymentRequested),
            KeyCode::Char('k') if ctrl => {
                self.copy_payment_code();
                Vec::new()
            }
            KeyCode::Char('g') if ctrl => self.on_billing(Msg::GeneratePaymentsRequested),
            KeyCode::Up if ctrl => {
                let installments = self.dashboard.payments().installments().saturating_add(1);
                self.on_billing(Msg::InstallmentsChanged(installments))
            }
            KeyCode::Down if ctrl => {
                let installments = self.dashboard.payments().installments().saturating_sub(1);
                self.on_billing(Msg::InstallmentsChanged(installments))
            }
            KeyCode::Esc => self.apply(Msg::CancelRequested),
            KeyCode::Tab => self.switch_tab(self.dashboard.editor().active_tab().next()),
            KeyCode::BackTab => self.switch_tab(self.dashboard.editor().active_tab().previous()),
            KeyCode::Up => self.move_field(-1),
            KeyCode::Down | KeyCode::Enter => self.move_field(1),
            KeyCode::PageUp => {
                self.dashboard.move_payment_cursor(-1);
                Vec::new()
            }
            KeyCode::PageDown => {
                self.dashboard.move_payment_cursor(1);
                Vec::new()
            }
            KeyCode::Left if choice => self.cycle(field, -1),
            KeyCode::Right if choice => self.cycle(field, 1),
            KeyCode::Left => {
                self.field_input.move_left();
                Vec::new()
            }
            KeyCode::Right => {
                self.field_input.move_right();
                Vec::new()
            }
            KeyCode::Home => {
                self.field_input.move_home();
                Vec::new()
            }
            KeyCode::End => {
                self.field_input.move_end();
                Vec::new()
            }
            KeyCode::Backspace if !choice => {
                self.field_input.backspace();
                self.commit_field(field)
            }
            KeyCode::Delete if !choice => {
                self.field_input.delete();
                self.commit_field(field)
            }
            KeyCode::Char(c) if !ctrl && !choice => {
                self.field_input.insert_char(c);
                self.commit_field(field)
            }
            _ => Vec::new(),
        }
    }

    fn with_payment(&mut self, build: impl FnOnce(String) -> Msg) -> Vec<Ticket> {
        let on_billing = self.dashboard.editor().active_tab() == FormTab::Billing;
        match self.dashboard.selected_payment().map(|payment| payment.id.clone()) {
            Some(id) if on_billing => self.apply(build(id)),
            _ => Vec::new(),
        }
    }

    fn on_billing(&mut self, msg: Msg) -> Vec<Ticket> {
        if self.dashboard.editor().active_tab() == FormTab::Billing {
            self.apply(msg)
        } else {
            Vec::new()
        }
    }

    /// Puts the highlighted payment's PIX code (or slip barcode) on the system clipboard.
    fn copy_payment_code(&mut self) {
        if self.dashboard.editor().active_tab() != FormTab::Billing {
            return;
        }
        let Some(code) = self
            .dashboard
            .selected_payment()
            .and_then(|payment| payment.payable_code())
            .map(str::to_string)
        else {
            self.push_toast(Notification::warning("No payment code to copy"), Instant::now());
            return;
        };
        let notification = match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(code)) {
            Ok(()) => Notification::success("Payment code copied"),
            Err(error) => {
                warn!(error = %error, "clipboard unavailable");
                Notification::error(format!("Clipboard error: {error}"))
            }
        };
        self.push_toast(notification, Instant::now());
    }

    fn commit_field(&mut self, field: DraftField) -> Vec<Ticket> {
        self.apply(Msg::FieldChanged(field, self.field_input.input().to_string()))
    }

    fn cycle(&mut self, field: DraftField, step: isize) -> Vec<Ticket> {
        let tickets = self.apply(Msg::FieldCycled(field, step));
        self.load_field_input();
        tickets
    }

    fn switch_tab(&mut self, tab: FormTab) -> Vec<Ticket> {
        let tickets = self.apply(Msg::TabChanged(tab));
        self.load_field_input();
        tickets
    }

    fn move_field(&mut self, delta: isize) -> Vec<Ticket> {
        let tickets = self.apply(Msg::FieldFocusMoved(delta));
        self.load_field_input();
        tickets
    }
}
