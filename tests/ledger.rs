//! End-to-end exercise of the public store surface against a real file in a
//! scratch directory, the way the TUI drives it across a session.

use std::fs;

use tempfile::TempDir;

use service_ledger::{PaymentStatus, RecordDraft, RecordStore, StoreError};

fn draft(name: &str, vehicle: &str, amount: &str) -> RecordDraft {
    RecordDraft {
        date: "10/02/2024".to_string(),
        customer_name: name.to_string(),
        phone_number: "555-0010".to_string(),
        vehicle_info: vehicle.to_string(),
        work_done: "Periyodik bakım".to_string(),
        amount_due: amount.to_string(),
    }
}

#[test]
fn full_session_against_a_legacy_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.txt");

    // A ledger as an older version of the program left it: six-field rows,
    // no payment columns.
    fs::write(
        &path,
        "01/01/2024,Ayşe,555-0001,Fiat,Yağ değişimi,300\n\
         02/01/2024,Can,555-0002,Renault,Fren,450\n",
    )
    .unwrap();

    let mut store = RecordStore::open(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.total_due().unwrap(), 750);

    // The legacy rows defaulted to nothing paid.
    assert_eq!(store.records()[0].amount_paid, 0);
    assert_eq!(store.records()[0].payment_status(), PaymentStatus::Pending);

    // New visit for a returning customer, with a comma in the vehicle field.
    store
        .append(draft("Ayşe", "Fiat, 2019", "600"))
        .unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.total_due().unwrap(), 1350);

    // Customer views collapse the repeat visit into one name.
    let names = store.unique_customer_names();
    assert_eq!(names.len(), 2);
    assert_eq!(store.records_for_customer("Ayşe").len(), 2);

    // Partial payment, then settle in full.
    let can = store.records()[1].id;
    let record = store.apply_payment(can, 200).unwrap();
    assert_eq!(record.amount_remaining(), Some(250));
    assert_eq!(record.payment_status(), PaymentStatus::Partial);
    let record = store.apply_payment(can, 250).unwrap();
    assert_eq!(record.amount_remaining(), Some(0));
    assert_eq!(record.payment_status(), PaymentStatus::Paid);

    // Search spans every field and ignores case.
    assert_eq!(store.search("renault").len(), 1);
    assert_eq!(store.search("").len(), 3);

    // Delete the first row; the id goes dead.
    let first = store.records()[0].id;
    store.delete(first).unwrap();
    assert!(matches!(
        store.apply_payment(first, 1),
        Err(StoreError::RecordGone { .. })
    ));

    // A fresh load sees exactly what the session left behind, including the
    // payment that went through the rewrite path and the quoted vehicle.
    let reloaded = RecordStore::open(&path).unwrap();
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.records()[0].customer_name, "Can");
    assert_eq!(reloaded.records()[0].amount_paid, 450);
    assert_eq!(reloaded.records()[1].vehicle_info, "Fiat, 2019");
    assert_eq!(reloaded.total_due().unwrap(), 1050);
}
