// 📝 Entry Form
// The five inputs of today's record.
//
// Numeric fields clamp silently: whatever the user types or steps to ends up
// inside the field's bounds. There is no visible validation error.

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::bmi::{round_one_decimal, BmiReading};
use crate::config::FormDefaults;
use crate::record::{Bounds, HealthRecord, DIASTOLIC, HEIGHT_CM, SYSTOLIC, WEIGHT_KG};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ============================================================================
// FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldId {
    Date,
    Height,
    Weight,
    Systolic,
    Diastolic,
}

impl FieldId {
    pub const ALL: [FieldId; 5] = [
        FieldId::Date,
        FieldId::Height,
        FieldId::Weight,
        FieldId::Systolic,
        FieldId::Diastolic,
    ];

    pub fn next(&self) -> Self {
        match self {
            FieldId::Date => FieldId::Height,
            FieldId::Height => FieldId::Weight,
            FieldId::Weight => FieldId::Systolic,
            FieldId::Systolic => FieldId::Diastolic,
            FieldId::Diastolic => FieldId::Date,
        }
    }

    pub fn previous(&self) -> Self {
        match self {
            FieldId::Date => FieldId::Diastolic,
            FieldId::Height => FieldId::Date,
            FieldId::Weight => FieldId::Height,
            FieldId::Systolic => FieldId::Weight,
            FieldId::Diastolic => FieldId::Systolic,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            FieldId::Date => "Date",
            FieldId::Height => "Height (cm)",
            FieldId::Weight => "Weight (kg)",
            FieldId::Systolic => "Systolic",
            FieldId::Diastolic => "Diastolic",
        }
    }
}

/// A bounded number with a fixed step and precision
#[derive(Debug, Clone, PartialEq)]
pub struct NumericField {
    value: f64,
    bounds: Bounds,
    step: f64,
    decimals: u8,
}

impl NumericField {
    pub fn float(value: f64, bounds: Bounds) -> Self {
        let mut field = NumericField {
            value: bounds.min,
            bounds,
            step: 0.1,
            decimals: 1,
        };
        field.set(value);
        field
    }

    pub fn integer(value: f64, bounds: Bounds) -> Self {
        let mut field = NumericField {
            value: bounds.min,
            bounds,
            step: 1.0,
            decimals: 0,
        };
        field.set(value);
        field
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// Value as a whole number; only meaningful for integer fields
    pub fn as_u16(&self) -> u16 {
        self.value.round() as u16
    }

    /// Clamp into bounds and snap to precision. Non-finite input is ignored.
    pub fn set(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        let clamped = self.bounds.clamp(value);
        self.value = match self.decimals {
            0 => clamped.round(),
            _ => round_one_decimal(clamped),
        };
    }

    pub fn step_up(&mut self) {
        self.set(self.value + self.step);
    }

    pub fn step_down(&mut self) {
        self.set(self.value - self.step);
    }

    pub fn display(&self) -> String {
        match self.decimals {
            0 => format!("{:.0}", self.value),
            _ => format!("{:.1}", self.value),
        }
    }
}

// ============================================================================
// FORM
// ============================================================================

#[derive(Debug, Clone)]
pub struct EntryForm {
    pub date: NaiveDate,
    pub height: NumericField,
    pub weight: NumericField,
    pub systolic: NumericField,
    pub diastolic: NumericField,
    focus: FieldId,
    edit_buffer: Option<String>,
}

impl EntryForm {
    pub fn new(date: NaiveDate, defaults: &FormDefaults) -> Self {
        Self {
            date,
            height: NumericField::float(defaults.height_cm, HEIGHT_CM),
            weight: NumericField::float(defaults.weight_kg, WEIGHT_KG),
            systolic: NumericField::integer(f64::from(defaults.systolic), SYSTOLIC),
            diastolic: NumericField::integer(f64::from(defaults.diastolic), DIASTOLIC),
            focus: FieldId::Date,
            edit_buffer: None,
        }
    }

    pub fn focus(&self) -> FieldId {
        self.focus
    }

    /// Moving focus commits any pending edit first
    pub fn focus_next(&mut self) {
        self.commit_edit();
        self.focus = self.focus.next();
    }

    pub fn focus_previous(&mut self) {
        self.commit_edit();
        self.focus = self.focus.previous();
    }

    pub fn is_editing(&self) -> bool {
        self.edit_buffer.is_some()
    }

    pub fn edit_buffer(&self) -> Option<&str> {
        self.edit_buffer.as_deref()
    }

    /// Current value of a field as shown in the form
    pub fn display(&self, field: FieldId) -> String {
        if field == self.focus {
            if let Some(buffer) = &self.edit_buffer {
                return buffer.clone();
            }
        }

        match field {
            FieldId::Date => self.date.format(DATE_FORMAT).to_string(),
            FieldId::Height => self.height.display(),
            FieldId::Weight => self.weight.display(),
            FieldId::Systolic => self.systolic.display(),
            FieldId::Diastolic => self.diastolic.display(),
        }
    }

    pub fn step_up(&mut self) {
        self.commit_edit();
        match self.focus {
            FieldId::Date => {
                if let Some(date) = self.date.checked_add_days(Days::new(1)) {
                    self.date = date;
                }
            }
            FieldId::Height => self.height.step_up(),
            FieldId::Weight => self.weight.step_up(),
            FieldId::Systolic => self.systolic.step_up(),
            FieldId::Diastolic => self.diastolic.step_up(),
        }
    }

    pub fn step_down(&mut self) {
        self.commit_edit();
        match self.focus {
            FieldId::Date => {
                if let Some(date) = self.date.checked_sub_days(Days::new(1)) {
                    self.date = date;
                }
            }
            FieldId::Height => self.height.step_down(),
            FieldId::Weight => self.weight.step_down(),
            FieldId::Systolic => self.systolic.step_down(),
            FieldId::Diastolic => self.diastolic.step_down(),
        }
    }

    /// Append a typed character to the edit buffer.
    /// Returns false if the character is not accepted by the focused field.
    pub fn push_char(&mut self, c: char) -> bool {
        let accepted = match self.focus {
            FieldId::Date => c.is_ascii_digit() || c == '-',
            FieldId::Height | FieldId::Weight => c.is_ascii_digit() || c == '.',
            FieldId::Systolic | FieldId::Diastolic => c.is_ascii_digit(),
        };
        if accepted {
            self.edit_buffer.get_or_insert_with(String::new).push(c);
        }
        accepted
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = &mut self.edit_buffer {
            buffer.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.edit_buffer = None;
    }

    /// Apply the edit buffer to the focused field.
    /// Returns true when a value was applied; unparseable input is discarded.
    pub fn commit_edit(&mut self) -> bool {
        let Some(buffer) = self.edit_buffer.take() else {
            return false;
        };
        let text = buffer.trim();
        let focus = self.focus;

        let applied = match focus {
            FieldId::Date => match NaiveDate::parse_from_str(text, DATE_FORMAT) {
                Ok(date) => {
                    self.date = date;
                    true
                }
                Err(_) => false,
            },
            field => match (text.parse::<f64>(), self.numeric_mut(field)) {
                (Ok(value), Some(numeric)) if value.is_finite() => {
                    numeric.set(value);
                    true
                }
                _ => false,
            },
        };

        if !applied {
            debug!(field = focus.title(), input = text, "discarded unparseable edit");
        }
        applied
    }

    fn numeric_mut(&mut self, field: FieldId) -> Option<&mut NumericField> {
        match field {
            FieldId::Date => None,
            FieldId::Height => Some(&mut self.height),
            FieldId::Weight => Some(&mut self.weight),
            FieldId::Systolic => Some(&mut self.systolic),
            FieldId::Diastolic => Some(&mut self.diastolic),
        }
    }

    /// Live BMI for the values currently in the form
    pub fn reading(&self) -> BmiReading {
        BmiReading::from_measurements(self.height.value(), self.weight.value())
    }

    /// Snapshot the form into a record
    pub fn to_record(&self) -> HealthRecord {
        HealthRecord::new(
            self.date,
            self.height.value(),
            self.weight.value(),
            self.systolic.as_u16(),
            self.diastolic.as_u16(),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bmi::BmiStatus;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()
    }

    fn form() -> EntryForm {
        EntryForm::new(today(), &FormDefaults::default())
    }

    fn type_text(form: &mut EntryForm, text: &str) {
        for c in text.chars() {
            form.push_char(c);
        }
    }

    #[test]
    fn test_defaults() {
        let form = form();
        assert_eq!(form.height.value(), 170.0);
        assert_eq!(form.weight.value(), 65.0);
        assert_eq!(form.systolic.as_u16(), 120);
        assert_eq!(form.diastolic.as_u16(), 80);
        assert_eq!(form.focus(), FieldId::Date);
        assert_eq!(form.reading().status, BmiStatus::Normal);
    }

    #[test]
    fn test_numeric_field_clamps_silently() {
        let mut field = NumericField::float(500.0, WEIGHT_KG);
        assert_eq!(field.value(), 200.0);

        field.set(1.0);
        assert_eq!(field.value(), 30.0);

        field.set(f64::NAN);
        assert_eq!(field.value(), 30.0);

        field.step_down();
        assert_eq!(field.value(), 30.0);
    }

    #[test]
    fn test_float_steps_do_not_drift() {
        let mut field = NumericField::float(65.0, WEIGHT_KG);
        for _ in 0..10 {
            field.step_up();
        }
        assert_eq!(field.value(), 66.0);
        assert_eq!(field.display(), "66.0");
    }

    #[test]
    fn test_integer_field_rounds() {
        let mut field = NumericField::integer(120.0, SYSTOLIC);
        field.set(130.6);
        assert_eq!(field.as_u16(), 131);
        assert_eq!(field.display(), "131");
        field.step_up();
        assert_eq!(field.as_u16(), 132);
    }

    #[test]
    fn test_focus_wraps() {
        let mut form = form();
        form.focus_previous();
        assert_eq!(form.focus(), FieldId::Diastolic);
        form.focus_next();
        assert_eq!(form.focus(), FieldId::Date);
    }

    #[test]
    fn test_date_steps_by_day() {
        let mut form = form();
        form.step_up();
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        form.step_down();
        form.step_down();
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2024, 2, 27).unwrap());
    }

    #[test]
    fn test_typed_edit_is_clamped_on_commit() {
        let mut form = form();
        form.focus_next(); // height
        type_text(&mut form, "300");
        assert_eq!(form.display(FieldId::Height), "300");

        assert!(form.commit_edit());
        assert_eq!(form.height.value(), 250.0);
        assert!(!form.is_editing());
    }

    #[test]
    fn test_typed_date_edit() {
        let mut form = form();
        type_text(&mut form, "2023-12-31");
        assert!(form.commit_edit());
        assert_eq!(form.date, NaiveDate::from_ymd_opt(2023, 12, 31).unwrap());
    }

    #[test]
    fn test_unparseable_edit_keeps_previous_value() {
        let mut form = form();
        type_text(&mut form, "2023-13");
        assert!(!form.commit_edit());
        assert_eq!(form.date, today());

        form.focus_next();
        type_text(&mut form, "1.2.3");
        assert!(!form.commit_edit());
        assert_eq!(form.height.value(), 170.0);
    }

    #[test]
    fn test_field_rejects_foreign_characters() {
        let mut form = form();
        form.focus_next();
        form.focus_next();
        form.focus_next(); // systolic
        assert!(!form.push_char('.'));
        assert!(!form.push_char('x'));
        assert!(form.push_char('9'));
        form.backspace();
        assert_eq!(form.edit_buffer(), Some(""));
        form.cancel_edit();
        assert!(!form.is_editing());
    }

    #[test]
    fn test_focus_change_commits_edit() {
        let mut form = form();
        form.focus_next(); // height
        form.focus_next(); // weight
        type_text(&mut form, "85");
        form.focus_next();

        assert_eq!(form.weight.value(), 85.0);
        assert_eq!(form.focus(), FieldId::Systolic);
    }

    #[test]
    fn test_to_record_snapshots_current_values() {
        let mut form = form();
        form.height.set(160.0);
        form.weight.set(85.0);

        let record = form.to_record();
        assert_eq!(record.bmi, 33.2);
        assert_eq!(record.date, today());

        form.weight.set(50.0);
        assert_eq!(record.bmi, 33.2);
    }
}
