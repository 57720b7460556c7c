//! Domain models that mirror the on-disk ledger rows and get passed
//! throughout the TUI. The intent is that these types stay light-weight data
//! holders so other layers can focus on presentation and persistence logic.

use std::fmt;

use crate::codec;

/// Session-stable identifier assigned by the store when a record is loaded or
/// appended. It is never written to the backing file: on-disk identity is
/// positional, and positions shift whenever a row is deleted, so every layer
/// above the file addresses records through this key instead of a row number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
/// One customer service transaction, i.e. one line of the ledger file.
pub struct ServiceRecord {
    /// Store-assigned key used by edit/delete flows. Kept on the struct even
    /// though the file never stores it, so views can bubble it back to the
    /// persistence layer.
    pub id: RecordId,
    /// Service date as entered, expected `DD/MM/YYYY` but stored verbatim.
    pub date: String,
    /// Customer display name. Repeats across records when the same customer
    /// comes back for another visit; there is no separate customer entity.
    pub customer_name: String,
    /// Contact phone, free-form text.
    pub phone_number: String,
    /// Vehicle description (make, model, plate — whatever was entered).
    pub vehicle_info: String,
    /// Description of the work performed.
    pub work_done: String,
    /// Amount charged, kept as the raw on-disk text. Old ledgers contain rows
    /// whose amount never parses; keeping the text lets those rows load and
    /// display while `total_due` reports them as the typed error they are.
    pub amount_due: String,
    /// Amount collected so far. Absent or unreadable on old rows, in which
    /// case it defaults to zero.
    pub amount_paid: i64,
}

/// Payment progress derived from the two amount fields. Display-only; the
/// file stores the amounts, never this label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Partial,
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Partial => "partial",
            PaymentStatus::Paid => "paid",
        };
        write!(f, "{label}")
    }
}

impl ServiceRecord {
    /// Parse the amount charged, if the stored text is a whole number.
    pub fn amount_due_value(&self) -> Option<i64> {
        codec::parse_amount(&self.amount_due).ok()
    }

    /// Outstanding balance, recomputed from the two source amounts every time
    /// it is needed. A persisted remainder is never trusted (stale copies
    /// exist in old files), and overpayment legitimately drives this value
    /// negative. `None` when the amount due itself is unreadable.
    pub fn amount_remaining(&self) -> Option<i64> {
        self.amount_due_value().map(|due| due - self.amount_paid)
    }

    /// Classify payment progress for list views and the detail card.
    pub fn payment_status(&self) -> PaymentStatus {
        match self.amount_remaining() {
            Some(remaining) if remaining <= 0 => PaymentStatus::Paid,
            _ if self.amount_paid > 0 => PaymentStatus::Partial,
            _ => PaymentStatus::Pending,
        }
    }

    /// Every field concatenated into one searchable string, including the
    /// payment columns and the derived remainder. Search matches against this
    /// rendering so a query can hit any column a listing shows.
    pub fn search_text(&self) -> String {
        let paid = self.amount_paid.to_string();
        let remaining = self
            .amount_remaining()
            .map(|value| value.to_string())
            .unwrap_or_default();
        [
            self.date.as_str(),
            self.customer_name.as_str(),
            self.phone_number.as_str(),
            self.vehicle_info.as_str(),
            self.work_done.as_str(),
            self.amount_due.as_str(),
            paid.as_str(),
            remaining.as_str(),
        ]
        .join(" ")
    }

    /// Compose a `Customer - Vehicle` string that gracefully omits the hyphen
    /// if the vehicle field is blank. Confirmation dialogs rely on this
    /// ready-to-use formatting.
    pub fn summary(&self) -> String {
        if self.vehicle_info.trim().is_empty() {
            self.customer_name.clone()
        } else {
            format!("{} - {}", self.customer_name, self.vehicle_info)
        }
    }
}

#[derive(Debug, Clone, Default)]
/// Field values collected from the caller before a record exists. The store
/// validates and assigns an id on append; until then this is plain input.
pub struct RecordDraft {
    pub date: String,
    pub customer_name: String,
    pub phone_number: String,
    pub vehicle_info: String,
    pub work_done: String,
    pub amount_due: String,
}
