//! The record store: the one owner of the in-memory record collection and the
//! only writer of the backing file. Every operation keeps the two in step by
//! writing first and mutating memory only once the write has succeeded, so a
//! failed write never leaves memory claiming a state the file does not have.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::codec;
use crate::error::StoreError;
use crate::models::{RecordDraft, RecordId, ServiceRecord};
use crate::store::backing;

/// Ordered collection of service records backed by one ledger file. Built
/// once at session start; `open` is the only constructor, so a store is
/// always loaded.
pub struct RecordStore {
    path: PathBuf,
    records: Vec<ServiceRecord>,
    next_id: u64,
}

impl RecordStore {
    /// Load the ledger at `path` into memory. A row that cannot be decoded is
    /// skipped and logged rather than failing the whole load — one corrupt
    /// historical row must not lock the user out of the rest of the ledger.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let lines = backing::read_lines(&path)?;

        let mut records = Vec::with_capacity(lines.len());
        let mut next_id = 1;
        for (line_number, line) in lines.iter().enumerate() {
            match codec::decode_line(line, RecordId(next_id)) {
                Some(record) => {
                    records.push(record);
                    next_id += 1;
                }
                None => {
                    warn!(line = line_number + 1, "skipped undecodable ledger row");
                }
            }
        }

        info!(path = %path.display(), count = records.len(), "ledger loaded");
        Ok(Self {
            path,
            records,
            next_id,
        })
    }

    /// All records in ledger order. The slice reflects current in-memory
    /// state; it is not re-read from disk.
    pub fn records(&self) -> &[ServiceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up one record by its store-assigned identifier.
    pub fn get(&self, id: RecordId) -> Option<&ServiceRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Transient 1-based position of a record in the current ordering. A
    /// display label only; it shifts whenever an earlier record is deleted.
    pub fn row_number(&self, id: RecordId) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.id == id)
            .map(|index| index + 1)
    }

    /// Validate a draft, persist it as a new final row, and return the stored
    /// record. The failure names the first missing or invalid field so the
    /// form can point the user at it. This is the one mutation that appends
    /// to the file instead of rewriting it: adding a record is the common
    /// path and touches nothing that already exists.
    pub fn append(&mut self, draft: RecordDraft) -> Result<&ServiceRecord, StoreError> {
        let required = [
            (&draft.date, "Date"),
            (&draft.customer_name, "Customer name"),
            (&draft.phone_number, "Phone number"),
            (&draft.vehicle_info, "Vehicle info"),
            (&draft.work_done, "Work done"),
        ];
        for (value, field) in required {
            if value.trim().is_empty() {
                return Err(StoreError::MissingField { field });
            }
            // One record per line; a field with a line break would split its
            // row on disk. The amount is covered by the parse below.
            if value.contains(['\n', '\r']) {
                return Err(StoreError::MultilineField { field });
            }
        }
        codec::parse_amount(&draft.amount_due)?;

        let record = ServiceRecord {
            id: RecordId(self.next_id),
            date: draft.date,
            customer_name: draft.customer_name,
            phone_number: draft.phone_number,
            vehicle_info: draft.vehicle_info,
            work_done: draft.work_done,
            amount_due: draft.amount_due,
            amount_paid: 0,
        };

        backing::append_line(&self.path, &codec::encode_record(&record))?;
        self.next_id += 1;
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }

    /// Case-insensitive substring search across every field of every record.
    /// An empty query matches everything. The query is plain text: characters
    /// that would carry meaning in a pattern language match literally, so no
    /// input can break the search.
    pub fn search(&self, query: &str) -> Vec<&ServiceRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }

        self.records
            .iter()
            .filter(|record| record.search_text().to_lowercase().contains(&needle))
            .collect()
    }

    /// Distinct customer names across the ledger, order unspecified. A name
    /// is not an entity of its own; this is a view derived on demand.
    pub fn unique_customer_names(&self) -> HashSet<String> {
        self.records
            .iter()
            .map(|record| record.customer_name.clone())
            .collect()
    }

    /// All records for one customer, by exact name match, in ledger order.
    pub fn records_for_customer(&self, name: &str) -> Vec<&ServiceRecord> {
        self.records
            .iter()
            .filter(|record| record.customer_name == name)
            .collect()
    }

    /// Add `amount` to what the customer has paid on one record and persist
    /// the change. The remainder is recomputed, never clamped: overpaying
    /// leaves a negative balance, which is the customer's credit, not an
    /// error. Changing a row in place means rewriting the whole file.
    pub fn apply_payment(
        &mut self,
        id: RecordId,
        amount: i64,
    ) -> Result<&ServiceRecord, StoreError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::RecordGone { id })?;

        let mut updated = self.records[position].clone();
        updated.amount_paid += amount;

        let lines: Vec<String> = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                if index == position {
                    codec::encode_record(&updated)
                } else {
                    codec::encode_record(record)
                }
            })
            .collect();
        backing::rewrite_all(&self.path, &lines)?;

        self.records[position] = updated;
        Ok(&self.records[position])
    }

    /// Remove one record and persist the shrunken ledger. Identity on disk is
    /// the line position, so the whole file is rewritten from the remaining
    /// records in their current order.
    pub fn delete(&mut self, id: RecordId) -> Result<(), StoreError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::RecordGone { id })?;

        let lines: Vec<String> = self
            .records
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != position)
            .map(|(_, record)| codec::encode_record(record))
            .collect();
        backing::rewrite_all(&self.path, &lines)?;

        self.records.remove(position);
        Ok(())
    }

    /// Sum the amount due across the ledger. A row whose stored amount does
    /// not parse fails the aggregate with the row named, so the bad data can
    /// be repaired; skipping it silently would just make the total a lie.
    pub fn total_due(&self) -> Result<i64, StoreError> {
        let mut total: i64 = 0;
        for (index, record) in self.records.iter().enumerate() {
            match codec::parse_amount(&record.amount_due) {
                Ok(amount) => total += amount,
                Err(_) => {
                    return Err(StoreError::UnreadableAmount {
                        row: index + 1,
                        customer: record.customer_name.clone(),
                        value: record.amount_due.clone(),
                    })
                }
            }
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn scratch_ledger(lines: &[&str]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.txt");
        if !lines.is_empty() {
            let mut contents = lines.join("\n");
            contents.push('\n');
            fs::write(&path, contents).unwrap();
        }
        (dir, path)
    }

    fn draft(name: &str, amount: &str) -> RecordDraft {
        RecordDraft {
            date: "03/01/2024".to_string(),
            customer_name: name.to_string(),
            phone_number: "555-0003".to_string(),
            vehicle_info: "Toyota".to_string(),
            work_done: "Balata".to_string(),
            amount_due: amount.to_string(),
        }
    }

    const AYSE: &str = "01/01/2024,Ayşe,555-0001,Fiat,Yağ değişimi,300";
    const CAN: &str = "02/01/2024,Can,555-0002,Renault,Fren,450";

    #[test]
    fn open_without_file_yields_empty_store() {
        let (_dir, path) = scratch_ledger(&[]);
        let store = RecordStore::open(&path).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.total_due().unwrap(), 0);
    }

    #[test]
    fn load_delete_reload_scenario() {
        let (_dir, path) = scratch_ledger(&[AYSE, CAN]);
        let mut store = RecordStore::open(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_due().unwrap(), 750);

        let first = store.records()[0].id;
        store.delete(first).unwrap();
        assert_eq!(store.len(), 1);

        let reloaded = RecordStore::open(&path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.records()[0].customer_name, "Can");
    }

    #[test]
    fn load_skips_malformed_row_and_keeps_order() {
        let (_dir, path) = scratch_ledger(&[AYSE, "\"unterminated,row", CAN]);
        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.records()[0].customer_name, "Ayşe");
        assert_eq!(store.records()[1].customer_name, "Can");
    }

    #[test]
    fn append_is_durable_across_reload() {
        let (_dir, path) = scratch_ledger(&[AYSE]);
        let mut store = RecordStore::open(&path).unwrap();
        store.append(draft("Deniz", "600")).unwrap();

        let reloaded = RecordStore::open(&path).unwrap();
        assert_eq!(reloaded.len(), 2);
        let last = &reloaded.records()[1];
        assert_eq!(last.customer_name, "Deniz");
        assert_eq!(last.amount_due, "600");
        assert_eq!(last.amount_paid, 0);
    }

    #[test]
    fn append_names_first_missing_field() {
        let (_dir, path) = scratch_ledger(&[]);
        let mut store = RecordStore::open(&path).unwrap();

        let mut incomplete = draft("", "100");
        let err = store.append(incomplete.clone()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingField {
                field: "Customer name"
            }
        ));

        incomplete.date = String::new();
        let err = store.append(incomplete).unwrap_err();
        assert!(matches!(err, StoreError::MissingField { field: "Date" }));
        assert!(store.is_empty());
    }

    #[test]
    fn append_rejects_multiline_fields() {
        let (_dir, path) = scratch_ledger(&[]);
        let mut store = RecordStore::open(&path).unwrap();

        let mut multiline = draft("Deniz", "600");
        multiline.work_done = "Fren\nBalata".to_string();
        let err = store.append(multiline).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MultilineField { field: "Work done" }
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn append_rejects_unparseable_amount() {
        let (_dir, path) = scratch_ledger(&[]);
        let mut store = RecordStore::open(&path).unwrap();
        let err = store.append(draft("Deniz", "altıyüz")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidAmount { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn payment_accumulates_and_overpayment_goes_negative() {
        let (_dir, path) = scratch_ledger(&["05/01/2024,Ece,555-0005,Honda,Debriyaj,200"]);
        let mut store = RecordStore::open(&path).unwrap();
        let id = store.records()[0].id;

        let record = store.apply_payment(id, 50).unwrap();
        assert_eq!(record.amount_paid, 50);
        assert_eq!(record.amount_remaining(), Some(150));

        let record = store.apply_payment(id, 200).unwrap();
        assert_eq!(record.amount_paid, 250);
        assert_eq!(record.amount_remaining(), Some(-50));
    }

    #[test]
    fn payment_is_durable_across_reload() {
        let (_dir, path) = scratch_ledger(&[AYSE]);
        let mut store = RecordStore::open(&path).unwrap();
        let id = store.records()[0].id;
        store.apply_payment(id, 120).unwrap();

        let reloaded = RecordStore::open(&path).unwrap();
        let record = &reloaded.records()[0];
        assert_eq!(record.amount_paid, 120);
        assert_eq!(record.amount_remaining(), Some(180));
    }

    #[test]
    fn payment_on_dead_id_is_record_gone() {
        let (_dir, path) = scratch_ledger(&[AYSE]);
        let mut store = RecordStore::open(&path).unwrap();
        let id = store.records()[0].id;
        store.delete(id).unwrap();

        let err = store.apply_payment(id, 10).unwrap_err();
        assert!(matches!(err, StoreError::RecordGone { .. }));
    }

    #[test]
    fn delete_preserves_relative_order() {
        let (_dir, path) = scratch_ledger(&[
            AYSE,
            CAN,
            "03/01/2024,Deniz,555-0003,Toyota,Balata,600",
        ]);
        let mut store = RecordStore::open(&path).unwrap();
        let middle = store.records()[1].id;
        store.delete(middle).unwrap();

        let names: Vec<&str> = store
            .records()
            .iter()
            .map(|record| record.customer_name.as_str())
            .collect();
        assert_eq!(names, ["Ayşe", "Deniz"]);

        let reloaded = RecordStore::open(&path).unwrap();
        let names: Vec<&str> = reloaded
            .records()
            .iter()
            .map(|record| record.customer_name.as_str())
            .collect();
        assert_eq!(names, ["Ayşe", "Deniz"]);
    }

    #[test]
    fn delete_twice_is_record_gone() {
        let (_dir, path) = scratch_ledger(&[AYSE]);
        let mut store = RecordStore::open(&path).unwrap();
        let id = store.records()[0].id;
        store.delete(id).unwrap();
        let err = store.delete(id).unwrap_err();
        assert!(matches!(err, StoreError::RecordGone { .. }));
    }

    #[test]
    fn total_due_sums_all_amounts() {
        let (_dir, path) = scratch_ledger(&[
            "01/01/2024,Ayşe,555,Fiat,Yağ,100",
            "02/01/2024,Can,555,Renault,Fren,250",
            "03/01/2024,Deniz,555,Toyota,Balata,75",
        ]);
        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.total_due().unwrap(), 425);
    }

    #[test]
    fn total_due_names_the_offending_record() {
        let (_dir, path) = scratch_ledger(&[AYSE, "02/01/2024,Can,555,Renault,Fren,dörtyüz"]);
        let store = RecordStore::open(&path).unwrap();

        let err = store.total_due().unwrap_err();
        match err {
            StoreError::UnreadableAmount {
                row,
                customer,
                value,
            } => {
                assert_eq!(row, 2);
                assert_eq!(customer, "Can");
                assert_eq!(value, "dörtyüz");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn search_empty_query_matches_everything() {
        let (_dir, path) = scratch_ledger(&[AYSE, CAN]);
        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.search("").len(), 2);
        assert_eq!(store.search("   ").len(), 2);
    }

    #[test]
    fn search_is_case_insensitive_and_spans_fields() {
        let (_dir, path) = scratch_ledger(&[AYSE, CAN]);
        let store = RecordStore::open(&path).unwrap();

        let hits = store.search("renault");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].customer_name, "Can");

        // Matches the work field, not just the name columns.
        assert_eq!(store.search("fren").len(), 1);
        assert!(store.search("yok böyle biri").is_empty());
    }

    #[test]
    fn search_spans_the_payment_columns() {
        let (_dir, path) = scratch_ledger(&["01/01/2024,Ayşe,555-0001,Fiat,Yağ değişimi,300,177"]);
        let store = RecordStore::open(&path).unwrap();
        assert_eq!(store.records()[0].amount_paid, 177);

        // The amount paid and the derived remainder are searchable even
        // though neither appears in the six entered fields.
        assert_eq!(store.search("177").len(), 1);
        assert_eq!(store.search("123").len(), 1);
        assert!(store.search("999").is_empty());
    }

    #[test]
    fn search_treats_pattern_characters_literally() {
        let (_dir, path) =
            scratch_ledger(&["04/01/2024,Bora,555-0004,Opel,Motor (revizyon),900"]);
        let store = RecordStore::open(&path).unwrap();

        assert_eq!(store.search("(revizyon)").len(), 1);
        assert!(store.search("[a-z]+").is_empty());
        assert!(store.search("*").is_empty());
    }

    #[test]
    fn unique_names_collapse_repeat_visits() {
        let (_dir, path) = scratch_ledger(&[
            AYSE,
            CAN,
            "05/01/2024,Ayşe,555-0001,Fiat,Fren,200",
        ]);
        let store = RecordStore::open(&path).unwrap();

        let names = store.unique_customer_names();
        assert_eq!(names.len(), 2);
        assert!(names.contains("Ayşe"));
        assert!(names.contains("Can"));
    }

    #[test]
    fn records_for_customer_keeps_ledger_order() {
        let (_dir, path) = scratch_ledger(&[
            AYSE,
            CAN,
            "05/01/2024,Ayşe,555-0001,Fiat,Fren,200",
        ]);
        let store = RecordStore::open(&path).unwrap();

        let visits = store.records_for_customer("Ayşe");
        assert_eq!(visits.len(), 2);
        assert_eq!(visits[0].work_done, "Yağ değişimi");
        assert_eq!(visits[1].work_done, "Fren");
        assert!(store.records_for_customer("ayşe").is_empty());
    }

    #[test]
    fn row_number_tracks_current_position() {
        let (_dir, path) = scratch_ledger(&[AYSE, CAN]);
        let mut store = RecordStore::open(&path).unwrap();
        let first = store.records()[0].id;
        let second = store.records()[1].id;
        assert_eq!(store.row_number(second), Some(2));

        store.delete(first).unwrap();
        assert_eq!(store.row_number(second), Some(1));
        assert_eq!(store.row_number(first), None);
    }
}
