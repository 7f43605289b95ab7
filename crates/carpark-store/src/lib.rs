//! File-backed storage: capacity lookup input, latest/history CSV output and
//! the raw response archive.

pub mod archive;
pub mod capacity;
pub mod error;
pub mod persist;

pub use archive::{archive_raw_response, ensure_data_dir};
pub use capacity::load_capacity;
pub use error::StoreError;
pub use persist::{append_history, persist, write_latest, PersistSummary};
