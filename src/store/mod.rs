//! Persistence module split across logical submodules.

mod backing;
mod records;

pub use backing::{default_data_path, default_log_path, ensure_parent_dir};
pub use records::RecordStore;
