//! Core library surface for the Service Ledger TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the codec that understands the ledger's line format, the store
//! that owns the record collection, and the terminal front-end.
pub mod codec;
pub mod error;
pub mod models;
pub mod store;
pub mod ui;

/// Convenience re-exports for the persistence layer. These are typically
/// used by `main.rs` to resolve the data paths and load the ledger.
pub use store::{default_data_path, default_log_path, ensure_parent_dir, RecordStore};

/// The primary domain types that other layers manipulate.
pub use models::{PaymentStatus, RecordDraft, RecordId, ServiceRecord};

/// Typed failures surfaced by every store operation.
pub use error::StoreError;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
