// 🧭 Session - one interactive usage period
//
// Owns the record store, the entry form, the clear-all confirmation and the
// record selector. Every user action maps to exactly one handler; a handler
// mutates state and leaves a notice for the next render.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::bmi::BmiReading;
use crate::config::FormDefaults;
use crate::form::EntryForm;
use crate::record::HealthRecord;
use crate::store::RecordStore;

pub const EMPTY_STATE_MESSAGE: &str = "No records yet. Enter your measurements above!";

// ============================================================================
// CLEAR-ALL CONFIRMATION
// ============================================================================

/// Two-step gate in front of `RecordStore::clear`
///
/// Idle → ConfirmPending on request; ConfirmPending → Idle on confirm (store
/// cleared) or cancel (store untouched). Not a lock: other operations keep
/// working while a confirmation is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearState {
    #[default]
    Idle,
    ConfirmPending,
}

impl ClearState {
    pub fn is_pending(&self) -> bool {
        *self == ClearState::ConfirmPending
    }
}

// ============================================================================
// NOTICES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Feedback line shown after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

// ============================================================================
// SESSION
// ============================================================================

pub struct Session {
    pub store: RecordStore,
    pub form: EntryForm,
    clear_state: ClearState,
    /// Selector position, an index into insertion order
    selected: Option<usize>,
    notice: Option<Notice>,
}

impl Session {
    pub fn new(date: NaiveDate, defaults: &FormDefaults) -> Self {
        Self {
            store: RecordStore::new(),
            form: EntryForm::new(date, defaults),
            clear_state: ClearState::Idle,
            selected: None,
            notice: None,
        }
    }

    pub fn clear_state(&self) -> ClearState {
        self.clear_state
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Live BMI of the form values
    pub fn live_reading(&self) -> BmiReading {
        self.form.reading()
    }

    /// Records sorted by date for the table and charts
    pub fn view(&self) -> Vec<HealthRecord> {
        self.store.render_view()
    }

    // ------------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------------

    /// Save the form as a new record
    pub fn save(&mut self) {
        self.form.commit_edit();
        // The notice reports the live reading; the record keeps the rounded BMI
        let reading = self.form.reading();
        let record = self.form.to_record();
        info!(date = %record.date, bmi = record.bmi, status = reading.status.label(), "record saved");

        let message = format!("Saved! BMI: {} ({})", reading.display_value(), reading.status);
        self.store.append(record);
        if self.selected.is_none() {
            self.selected = Some(0);
        }
        self.notice = Some(Notice::success(message));
    }

    /// Remove the most recently saved record
    pub fn remove_last(&mut self) {
        match self.store.remove_last() {
            Ok(record) => {
                info!(date = %record.date, "last record removed");
                self.clamp_selection();
                self.notice = Some(Notice::warning("Removed the last record."));
            }
            Err(err) => {
                warn!(%err, "remove last rejected");
                self.notice = Some(Notice::warning("No records to remove."));
            }
        }
    }

    /// Remove the record under the selector
    pub fn delete_selected(&mut self) {
        let Some(index) = self.selected else {
            debug!("delete requested without a selection");
            self.notice = Some(Notice::warning("No record selected."));
            return;
        };

        match self.store.remove_at(index) {
            Ok(record) => {
                info!(index, date = %record.date, "selected record removed");
                self.clamp_selection();
                self.notice = Some(Notice::warning("Removed the selected record."));
            }
            Err(err) => {
                warn!(%err, "delete selected rejected");
                self.clamp_selection();
                self.notice = Some(Notice::warning("The selected record no longer exists."));
            }
        }
    }

    /// First step of clear-all
    pub fn request_clear(&mut self) {
        if self.store.is_empty() {
            debug!("clear requested on empty store");
            self.notice = Some(Notice::warning("There are no records to clear."));
            return;
        }

        debug!("clear confirmation pending");
        self.clear_state = ClearState::ConfirmPending;
        self.notice = Some(Notice::error("Really delete all records? (y: yes / n: cancel)"));
    }

    /// Second step of clear-all. Does nothing unless a request is pending.
    pub fn confirm_clear(&mut self) {
        if !self.clear_state.is_pending() {
            debug!("confirm without pending clear ignored");
            return;
        }

        let dropped = self.store.len();
        self.store.clear();
        self.clear_state = ClearState::Idle;
        self.selected = None;
        info!(dropped, "all records cleared");
        self.notice = Some(Notice::success("All records cleared."));
    }

    /// Abandon a pending clear-all; the store is not touched
    pub fn cancel_clear(&mut self) {
        if !self.clear_state.is_pending() {
            return;
        }

        self.clear_state = ClearState::Idle;
        debug!("clear cancelled");
        self.notice = Some(Notice::info("Clear cancelled."));
    }

    // ------------------------------------------------------------------------
    // Selector
    // ------------------------------------------------------------------------

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&HealthRecord> {
        self.selected.and_then(|i| self.store.get(i))
    }

    pub fn select_next(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        };
        self.selected = Some(i);
    }

    pub fn select_previous(&mut self) {
        let len = self.store.len();
        if len == 0 {
            return;
        }
        let i = match self.selected {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
    }

    fn clamp_selection(&mut self) {
        let len = self.store.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) if i >= len => Some(len - 1),
            Some(i) => Some(i),
            None => Some(0),
        };
    }
}

// ============================================================================
// TESTS
// ============================================================================
