use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{RecordDraft, RecordId, ServiceRecord};

/// Form state for entering a new service record. The form only collects and
/// focuses text; validation belongs to the store, which names the first
/// missing or invalid field so we can echo it back here.
#[derive(Default, Clone)]
pub(crate) struct RecordForm {
    pub(crate) date: String,
    pub(crate) customer_name: String,
    pub(crate) phone_number: String,
    pub(crate) vehicle_info: String,
    pub(crate) work_done: String,
    pub(crate) amount_due: String,
    pub(crate) active: RecordField,
    pub(crate) error: Option<String>,
}

/// Enumerates the fields within the record form to drive focus management.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum RecordField {
    #[default]
    Date,
    Customer,
    Phone,
    Vehicle,
    Work,
    Amount,
}

/// Field order used by Tab/BackTab cycling and by the rendered form rows.
pub(crate) const RECORD_FIELDS: [(RecordField, &str); 6] = [
    (RecordField::Date, "Date"),
    (RecordField::Customer, "Customer"),
    (RecordField::Phone, "Phone"),
    (RecordField::Vehicle, "Vehicle"),
    (RecordField::Work, "Work done"),
    (RecordField::Amount, "Amount due"),
];

impl RecordForm {
    fn field_value(&self, field: RecordField) -> &String {
        match field {
            RecordField::Date => &self.date,
            RecordField::Customer => &self.customer_name,
            RecordField::Phone => &self.phone_number,
            RecordField::Vehicle => &self.vehicle_info,
            RecordField::Work => &self.work_done,
            RecordField::Amount => &self.amount_due,
        }
    }

    fn field_value_mut(&mut self, field: RecordField) -> &mut String {
        match field {
            RecordField::Date => &mut self.date,
            RecordField::Customer => &mut self.customer_name,
            RecordField::Phone => &mut self.phone_number,
            RecordField::Vehicle => &mut self.vehicle_info,
            RecordField::Work => &mut self.work_done,
            RecordField::Amount => &mut self.amount_due,
        }
    }

    fn field_index(field: RecordField) -> usize {
        RECORD_FIELDS
            .iter()
            .position(|(candidate, _)| *candidate == field)
            .unwrap_or(0)
    }

    /// Move focus to the next field, wrapping past the last one.
    pub(crate) fn next_field(&mut self) {
        let index = Self::field_index(self.active);
        self.active = RECORD_FIELDS[(index + 1) % RECORD_FIELDS.len()].0;
    }

    /// Move focus to the previous field, wrapping before the first one.
    pub(crate) fn prev_field(&mut self) {
        let index = Self::field_index(self.active);
        self.active = RECORD_FIELDS[(index + RECORD_FIELDS.len() - 1) % RECORD_FIELDS.len()].0;
    }

    /// Append a character to the active field, restricting the amount field
    /// to digits so an unparseable amount cannot be typed in the first place.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        let accepted = match self.active {
            RecordField::Amount => ch.is_ascii_digit(),
            _ => !ch.is_control(),
        };
        if accepted {
            self.field_value_mut(self.active).push(ch);
        }
        accepted
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        self.field_value_mut(self.active).pop();
    }

    /// Package the trimmed inputs for the store to validate and persist.
    pub(crate) fn draft(&self) -> RecordDraft {
        RecordDraft {
            date: self.date.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            phone_number: self.phone_number.trim().to_string(),
            vehicle_info: self.vehicle_info.trim().to_string(),
            work_done: self.work_done.trim().to_string(),
            amount_due: self.amount_due.trim().to_string(),
        }
    }

    /// Render a single line for the form widget.
    pub(crate) fn build_line(&self, field_name: &str, field: RecordField) -> Line<'static> {
        let value = self.field_value(field);
        let is_active = self.active == field;

        let display = if value.is_empty() {
            "<required>".to_string()
        } else {
            value.clone()
        };

        let style = if is_active {
            Style::default().fg(Color::Yellow)
        } else if value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::raw(format!("{field_name}: ")),
            Span::styled(display, style),
        ])
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: RecordField) -> usize {
        self.field_value(field).chars().count()
    }
}

/// Form state for recording a payment against one record.
#[derive(Clone)]
pub(crate) struct PaymentForm {
    pub(crate) amount: String,
    pub(crate) summary: String,
    pub(crate) remaining: Option<i64>,
    pub(crate) error: Option<String>,
}

impl PaymentForm {
    /// Build the payment dialog state from the record being paid down.
    pub(crate) fn for_record(record: &ServiceRecord) -> Self {
        Self {
            amount: String::new(),
            summary: record.summary(),
            remaining: record.amount_remaining(),
            error: None,
        }
    }

    /// Append a digit to the amount being entered.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_ascii_digit() {
            self.amount.push(ch);
            true
        } else {
            false
        }
    }

    pub(crate) fn backspace(&mut self) {
        self.amount.pop();
    }
}

/// Confirmation state for deleting a record. Carries a rendered summary so
/// the dialog stays meaningful even though the record itself may move while
/// the question is on screen.
#[derive(Clone)]
pub(crate) struct ConfirmRecordDelete {
    pub(crate) id: RecordId,
    pub(crate) summary: String,
}

impl ConfirmRecordDelete {
    pub(crate) fn from(record: &ServiceRecord) -> Self {
        Self {
            id: record.id,
            summary: record.summary(),
        }
    }
}
