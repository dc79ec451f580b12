//! Bulk-download Microsoft Ignite 2025 slide decks.
//!
//! Fetches the public session catalogue, then downloads every session's
//! PowerPoint deck under a bounded worker pool with skip-if-exists
//! semantics and a final outcome tally.

pub mod catalogue;
pub mod download;
pub mod error;
pub mod pool;
pub mod run;
pub mod sanitize;

pub use catalogue::{CatalogueClient, SessionRecord};
pub use download::{Outcome, deck_path, download_session};
pub use error::{DownloadError, FetchError};
pub use run::{RunCounters, RunEvent, RunOptions, run};
pub use sanitize::sanitize_filename;
