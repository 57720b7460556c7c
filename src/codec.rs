//! Conversion between ledger lines and `ServiceRecord` values. Every function
//! here tries to encapsulate one rule of the file format so the store can stay
//! focused on collection state. The format is deliberately plain: one record
//! per line, comma-separated, no header, readable in any text editor.
//!
//! Two generations of files exist in the wild. The oldest rows carry six
//! fields (through the amount due); later rows add the amount paid and a
//! remainder. Decoding therefore defaults absent trailing fields instead of
//! rejecting short rows, and the persisted remainder is ignored outright —
//! it went stale in old files whenever a payment was recorded without the
//! remainder column being refreshed, so the store recomputes it every time.

use crate::error::StoreError;
use crate::models::{RecordId, ServiceRecord};

/// Single character separating fields on disk. Several code paths (encoding,
/// splitting, the escaping predicate) rely on the exact same character.
const DELIMITER: char = ',';

/// Number of fields a fully current row carries: the six entered values plus
/// the amount paid and the derived remainder.
const FULL_FIELD_COUNT: usize = 8;

/// Parse an amount entered by a caller or stored in the file. Amounts are
/// whole currency units; there is no decimal point in this format.
pub fn parse_amount(text: &str) -> Result<i64, StoreError> {
    text.trim()
        .parse::<i64>()
        .map_err(|_| StoreError::InvalidAmount {
            value: text.to_string(),
        })
}

/// Serialize a record into one ledger line, without the trailing newline.
///
/// The remainder column is emitted only when the amount due parses, and it is
/// always the freshly recomputed value, never a stored copy. Fields that
/// embed the delimiter or a quote are written CSV-style (wrapped in double
/// quotes, inner quotes doubled); everything else is written bare so files
/// produced here still look like the hand-editable originals.
pub fn encode_record(record: &ServiceRecord) -> String {
    let mut fields: Vec<String> = vec![
        record.date.clone(),
        record.customer_name.clone(),
        record.phone_number.clone(),
        record.vehicle_info.clone(),
        record.work_done.clone(),
        record.amount_due.clone(),
        record.amount_paid.to_string(),
    ];
    if let Some(remaining) = record.amount_remaining() {
        fields.push(remaining.to_string());
    }

    let escaped: Vec<String> = fields.iter().map(|field| escape_field(field)).collect();
    escaped.join(&DELIMITER.to_string())
}

/// Decode one line into a record carrying the given store-assigned id.
///
/// Returns `None` for a line that cannot be interpreted at all — blank, or
/// containing an unterminated quoted field. Short rows are not malformed:
/// absent trailing fields default to an empty string for text and zero for
/// the amount paid. Anything beyond the eighth field (some historical rows
/// appended a display row number) is ignored.
pub fn decode_line(line: &str, id: RecordId) -> Option<ServiceRecord> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return None;
    }

    let fields = split_fields(line)?;
    let text_field = |index: usize| {
        fields
            .get(index)
            .map(String::as_str)
            .unwrap_or("")
            .to_string()
    };
    let amount_paid = fields
        .get(6)
        .and_then(|text| text.trim().parse::<i64>().ok())
        .unwrap_or(0);

    Some(ServiceRecord {
        id,
        date: text_field(0),
        customer_name: text_field(1),
        phone_number: text_field(2),
        vehicle_info: text_field(3),
        work_done: text_field(4),
        amount_due: text_field(5),
        amount_paid,
    })
}

/// Wrap a field in quotes when it would otherwise corrupt the line.
fn escape_field(raw: &str) -> String {
    if !raw.contains(DELIMITER) && !raw.contains('"') {
        return raw.to_string();
    }

    let mut escaped = String::with_capacity(raw.len() + 2);
    escaped.push('"');
    for ch in raw.chars() {
        if ch == '"' {
            escaped.push('"');
        }
        escaped.push(ch);
    }
    escaped.push('"');
    escaped
}

/// Quote-aware split on the delimiter. A quote only opens a quoted field at
/// the start of a field, so legacy rows containing a stray quote mid-word
/// keep parsing the way they always did. Returns `None` when a quoted field
/// never closes.
fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::with_capacity(FULL_FIELD_COUNT);
    let mut current = String::new();
    let mut chars = line.chars().peekable();

    loop {
        match chars.next() {
            None => {
                fields.push(current);
                return Some(fields);
            }
            Some('"') if current.is_empty() => loop {
                match chars.next() {
                    None => return None,
                    Some('"') => {
                        if chars.peek() == Some(&'"') {
                            chars.next();
                            current.push('"');
                        } else {
                            break;
                        }
                    }
                    Some(ch) => current.push(ch),
                }
            },
            Some(ch) if ch == DELIMITER => fields.push(std::mem::take(&mut current)),
            Some(ch) => current.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn record(amount_due: &str, amount_paid: i64) -> ServiceRecord {
        ServiceRecord {
            id: RecordId(1),
            date: "01/01/2024".to_string(),
            customer_name: "Ayşe".to_string(),
            phone_number: "555-0001".to_string(),
            vehicle_info: "Fiat".to_string(),
            work_done: "Yağ değişimi".to_string(),
            amount_due: amount_due.to_string(),
            amount_paid,
        }
    }

    #[test]
    fn encode_emits_recomputed_remainder() {
        let line = encode_record(&record("300", 100));
        assert_eq!(line, "01/01/2024,Ayşe,555-0001,Fiat,Yağ değişimi,300,100,200");
    }

    #[test]
    fn encode_omits_remainder_when_amount_unreadable() {
        let line = encode_record(&record("üçyüz", 0));
        assert_eq!(line, "01/01/2024,Ayşe,555-0001,Fiat,Yağ değişimi,üçyüz,0");
    }

    #[test]
    fn round_trip_preserves_all_fields() {
        let original = record("300", 100);
        let decoded = decode_line(&encode_record(&original), RecordId(2)).unwrap();
        assert_eq!(decoded.date, original.date);
        assert_eq!(decoded.customer_name, original.customer_name);
        assert_eq!(decoded.phone_number, original.phone_number);
        assert_eq!(decoded.vehicle_info, original.vehicle_info);
        assert_eq!(decoded.work_done, original.work_done);
        assert_eq!(decoded.amount_due, original.amount_due);
        assert_eq!(decoded.amount_paid, original.amount_paid);
    }

    #[test]
    fn round_trip_survives_embedded_delimiters() {
        let mut original = record("450", 0);
        original.vehicle_info = "Renault, 2015".to_string();
        original.work_done = "Fren \"acil\"".to_string();

        let line = encode_record(&original);
        let decoded = decode_line(&line, RecordId(3)).unwrap();
        assert_eq!(decoded.vehicle_info, "Renault, 2015");
        assert_eq!(decoded.work_done, "Fren \"acil\"");
    }

    #[test]
    fn decode_ignores_stale_stored_remainder() {
        // Amount paid says 100 of 300, but the remainder column still claims
        // the full 300. The decoded record must not carry the stale value.
        let decoded =
            decode_line("01/01/2024,Ayşe,555,Fiat,Yağ,300,100,300", RecordId(1)).unwrap();
        assert_eq!(decoded.amount_remaining(), Some(200));
    }

    #[rstest]
    #[case("01/01/2024,Ayşe,555,Fiat,Yağ,300", 0)]
    #[case("01/01/2024,Ayşe,555,Fiat,Yağ,300,bozuk", 0)]
    #[case("01/01/2024,Ayşe,555,Fiat,Yağ,300,120", 120)]
    fn decode_defaults_amount_paid(#[case] line: &str, #[case] expected_paid: i64) {
        let decoded = decode_line(line, RecordId(1)).unwrap();
        assert_eq!(decoded.amount_paid, expected_paid);
    }

    #[rstest]
    #[case("01/01/2024,Ayşe")]
    #[case("01/01/2024")]
    fn decode_defaults_short_rows(#[case] line: &str) {
        let decoded = decode_line(line, RecordId(1)).unwrap();
        assert_eq!(decoded.date, "01/01/2024");
        assert_eq!(decoded.vehicle_info, "");
        assert_eq!(decoded.amount_due, "");
        assert_eq!(decoded.amount_paid, 0);
    }

    #[test]
    fn decode_rejects_blank_and_unterminated_lines() {
        assert!(decode_line("", RecordId(1)).is_none());
        assert!(decode_line("   ", RecordId(1)).is_none());
        assert!(decode_line("\"unterminated,Ayşe,555", RecordId(1)).is_none());
    }

    #[test]
    fn decode_keeps_stray_mid_field_quotes() {
        // Legacy rows were written without any quoting; a quote inside a word
        // must not open a quoted field.
        let decoded = decode_line("01/01/2024,Ay\"şe,555,Fiat,Yağ,300", RecordId(1)).unwrap();
        assert_eq!(decoded.customer_name, "Ay\"şe");
    }

    #[test]
    fn parse_amount_accepts_whole_numbers_only() {
        assert_eq!(parse_amount("425").unwrap(), 425);
        assert_eq!(parse_amount(" 425 ").unwrap(), 425);
        assert!(matches!(
            parse_amount("42.5"),
            Err(StoreError::InvalidAmount { .. })
        ));
        assert!(matches!(
            parse_amount("dörtyüz"),
            Err(StoreError::InvalidAmount { .. })
        ));
    }
}
