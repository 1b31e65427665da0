use chrono::NaiveDate;
use provadmin_types::{DraftField, FieldKind, FormDraft, FormTab, ProviderRecord};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Listing,
    Creating,
    Updating {
        id: String,
    },
}

impl EditMode {
    pub fn is_editing(&self) -> bool {
        !matches!(self, Self::Listing)
    }

    pub fn updating_id(&self) -> Option<&str> {
        match self {
            Self::Updating { id } => Some(id),
            _ => None,
        }
    }
}

/// Draft editing state machine.
///
/// `Listing` has no draft. Every transition into or out of an editing session
/// bumps the session generation so late save outcomes can be recognised.
#[derive(Debug, Default)]
pub struct DraftEditor {
    mode: EditMode,
    draft: Option<FormDraft>,
    active_tab: FormTab,
    focused_field: usize,
    generation: u64,
    show_password: bool,
}

impl DraftEditor {
    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn draft(&self) -> Option<&FormDraft> {
        self.draft.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active_tab(&self) -> FormTab {
        self.active_tab
    }

    pub fn show_password(&self) -> bool {
        self.show_password
    }

    pub fn start_new(&mut self, today: NaiveDate) {
        self.begin(EditMode::Creating, FormDraft::for_new(today));
    }

    pub fn start_edit(&mut self, record: &ProviderRecord) {
        self.begin(
            EditMode::Updating {
                id: record.id.clone(),
            },
            FormDraft::from_record(record),
        );
    }

    fn begin(&mut self, mode: EditMode, draft: FormDraft) {
        self.generation += 1;
        self.mode = mode;
        self.draft = Some(draft);
        self.active_tab = FormTab::Client;
        self.focused_field = 0;
        self.show_password = false;
    }

    /// Drops the draft and returns to `Listing`.
    pub fn close(&mut self) {
        self.generation += 1;
        self.mode = EditMode::Listing;
        self.draft = None;
        self.active_tab = FormTab::Client;
        self.focused_field = 0;
        self.show_password = false;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.mode.is_editing() && generation == self.generation
    }

    /// Overwrites one draft field. Ignored outside an editing session.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) -> bool {
        match self.draft.as_mut() {
            Some(draft) => {
                draft.set(field, value);
                true
            }
            None => false,
        }
    }

    pub fn select_tab(&mut self, tab: FormTab) {
        if self.active_tab != tab {
            self.active_tab = tab;
            self.focused_field = 0;
        }
    }

    pub fn toggle_password(&mut self) {
        self.show_password = !self.show_password;
    }

    pub fn focused_field(&self) -> DraftField {
        let fields = self.active_tab.fields();
        fields[self.focused_field.min(fields.len() - 1)]
    }

    pub fn move_focus(&mut self, delta: isize) {
        let last = self.active_tab.fields().len() - 1;
        self.focused_field = self.focused_field.saturating_add_signed(delta).min(last);
    }

    /// Cycles a choice field to the neighbouring wire value.
    pub fn cycle_choice(&mut self, field: DraftField, step: isize) -> bool {
        let FieldKind::Choice(choices) = field.kind() else {
            return false;
        };
        let Some(draft) = self.draft.as_mut() else {
            return false;
        };
        let current = choices.iter().position(|choice| *choice == draft.get(field));
        let len = choices.len() as isize;
        let next = match current {
            Some(index) => (index as isize + step).rem_euclid(len),
            None => 0,
        };
        draft.set(field, choices[next as usize]);
        true
    }
}
