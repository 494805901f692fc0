//! Core domain logic for the gradebook.
//! This crate is the single source of truth for row state, grade
//! derivation and persistence round-trip semantics; rendering and input
//! wiring live in outer layers.

pub mod logging;
pub mod model;
pub mod rules;
pub mod storage;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::subject::{Gradebook, RowColor, RowValue, SubjectRow, SCORE_FIELDS};
pub use rules::color::{next_color, ColorStep, PaletteEntry, PALETTE, PALETTE_LEN};
pub use rules::grade::{coerce_score, compute_grade, compute_total, Grade};
pub use storage::{
    MemoryStorage, SqliteStorage, StorageAdapter, StorageError, StorageResult,
    DEFAULT_DB_FILE_NAME, DELETED_ROWS_KEY, SCORE_DATA_KEY,
};
pub use store::gradebook_store::{GradebookStore, RenderRow, StoreObserver};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
