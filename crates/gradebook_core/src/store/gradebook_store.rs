//! In-memory gradebook state with synchronous write-through persistence.
//!
//! # Responsibility
//! - Load session state once from the storage adapter, defaulting to
//!   empty on absence or corruption.
//! - Apply row mutations and write the full affected document back before
//!   returning.
//! - Notify the registered observer with a fresh render snapshot after
//!   every mutation.
//!
//! # Invariants
//! - Every operation is total: unknown subjects, malformed entries and
//!   out-of-range field indexes degrade to no-ops, never errors.
//! - Adapter write failures are logged and swallowed; the session keeps
//!   running on in-memory state only.
//! - The deleted set is append-only and duplicate-free; rows are hidden,
//!   not removed.

use crate::model::subject::{Gradebook, RowColor, RowValue, SubjectRow, SCORE_FIELDS};
use crate::rules::color::next_color;
use crate::rules::grade::{compute_grade, compute_total, Grade};
use crate::storage::{StorageAdapter, DELETED_ROWS_KEY, SCORE_DATA_KEY};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read-only snapshot of one active row, with derived values filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRow {
    pub subject: String,
    /// Raw CA, CBT and Exam inputs, in that order.
    pub scores: [String; SCORE_FIELDS],
    /// Sum of the three coerced scores. Never stored.
    pub total: i64,
    /// Banded classification of `total`. Never stored.
    pub grade: Grade,
    pub background_color: Option<String>,
    pub color_name: Option<String>,
}

/// Presentation-layer hook, called after every mutating operation.
pub trait StoreObserver {
    fn state_changed(&self, rows: &[RenderRow]);
}

/// Session state over an injected storage adapter.
pub struct GradebookStore<S: StorageAdapter> {
    adapter: S,
    rows: Gradebook,
    deleted: Vec<String>,
    observer: Option<Box<dyn StoreObserver>>,
}

impl<S: StorageAdapter> GradebookStore<S> {
    /// Reads both persisted documents and builds the session store.
    ///
    /// Absent or undecodable documents recover to empty state; adapter
    /// read failures leave the session in-memory-only. Duplicate names in
    /// a legacy deleted-rows document are collapsed, keeping first
    /// occurrence order.
    pub fn load(adapter: S) -> Self {
        let rows: Gradebook = Self::read_document(&adapter, SCORE_DATA_KEY);
        let legacy_deleted: Vec<String> = Self::read_document(&adapter, DELETED_ROWS_KEY);

        let mut deleted = Vec::with_capacity(legacy_deleted.len());
        for name in legacy_deleted {
            if !deleted.contains(&name) {
                deleted.push(name);
            }
        }

        info!(
            "event=store_load module=store status=ok rows={} deleted={}",
            rows.len(),
            deleted.len()
        );

        Self {
            adapter,
            rows,
            deleted,
            observer: None,
        }
    }

    /// Registers the presentation-layer observer.
    pub fn set_observer(&mut self, observer: Box<dyn StoreObserver>) {
        self.observer = Some(observer);
    }

    /// Inserts a fresh row with three empty scores under `subject`.
    ///
    /// An existing entry is silently overwritten in place, dropping its
    /// scores and color attributes. Empty names are rejected as a no-op;
    /// the caller owns any prompting for the name.
    pub fn add_row(&mut self, subject: &str) {
        if subject.is_empty() {
            return;
        }
        self.rows
            .insert(subject.to_string(), RowValue::Row(SubjectRow::new()));
        self.persist_rows();
        self.notify();
    }

    /// Replaces one raw score field of an existing row.
    ///
    /// No-op when the subject is unknown or malformed, or when
    /// `field_index` is not 0, 1 or 2. The other two fields and any color
    /// attributes are preserved.
    pub fn update_row(&mut self, subject: &str, field_index: usize, raw_value: &str) {
        if field_index >= SCORE_FIELDS {
            return;
        }
        let Some(row) = self.rows.get_mut(subject).and_then(RowValue::as_row_mut) else {
            return;
        };
        row.scores[field_index] = raw_value.to_string();
        self.persist_rows();
        self.notify();
    }

    /// Marks `subject` deleted. Idempotent; the row data is retained and
    /// only hidden from the active view. The subject need not exist in
    /// the gradebook.
    pub fn delete_row(&mut self, subject: &str) {
        if self.is_deleted(subject) {
            return;
        }
        self.deleted.push(subject.to_string());
        self.persist_deleted();
        self.notify();
    }

    /// Advances the display color of an active row one palette slot.
    ///
    /// No-op when the subject is unknown, malformed, or already deleted.
    /// A row with no recorded color starts from index 0, so its first
    /// advance lands on palette slot 1.
    pub fn change_color(&mut self, subject: &str) {
        if self.is_deleted(subject) {
            return;
        }
        let Some(row) = self.rows.get_mut(subject).and_then(RowValue::as_row_mut) else {
            return;
        };
        let current = row.color.as_ref().map_or(0, |color| color.index);
        let step = next_color(current);
        row.color = Some(RowColor {
            background: step.value.to_string(),
            name: step.name.to_string(),
            index: step.index,
        });
        self.persist_rows();
        self.notify();
    }

    /// Membership query against the deleted set. Pure, no side effects.
    pub fn is_deleted(&self, subject: &str) -> bool {
        self.deleted.iter().any(|name| name == subject)
    }

    /// Builds the active view in insertion order: deleted subjects and
    /// malformed entries are skipped, derived values are recomputed.
    pub fn list_active_rows(&self) -> Vec<RenderRow> {
        self.rows
            .iter()
            .filter_map(|(subject, value)| {
                if self.is_deleted(subject) {
                    return None;
                }
                value.as_row().map(|row| render_row(subject, row))
            })
            .collect()
    }

    /// Underlying-mapping access, including deleted subjects. Malformed
    /// entries yield `None`. There is no purge operation; deleted rows
    /// stay retrievable here for the session's lifetime.
    pub fn get_row(&self, subject: &str) -> Option<&SubjectRow> {
        self.rows.get(subject).and_then(RowValue::as_row)
    }

    /// Read access to the full mapping, malformed entries included.
    pub fn gradebook(&self) -> &Gradebook {
        &self.rows
    }

    /// Releases the storage adapter, consuming the store.
    pub fn into_adapter(self) -> S {
        self.adapter
    }

    fn persist_rows(&mut self) {
        Self::write_document(&mut self.adapter, SCORE_DATA_KEY, &self.rows);
    }

    fn persist_deleted(&mut self) {
        Self::write_document(&mut self.adapter, DELETED_ROWS_KEY, &self.deleted);
    }

    fn read_document<T>(adapter: &S, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let document = match adapter.get(key) {
            Ok(Some(document)) => document,
            Ok(None) => return T::default(),
            Err(err) => {
                warn!(
                    "event=store_load module=store key={key} status=error error_code=read_failed error={err}"
                );
                return T::default();
            }
        };
        match serde_json::from_str(&document) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=store_load module=store key={key} status=error error_code=decode_failed error={err}"
                );
                T::default()
            }
        }
    }

    fn write_document<T: Serialize>(adapter: &mut S, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(document) => {
                if let Err(err) = adapter.set(key, &document) {
                    warn!(
                        "event=store_save module=store key={key} status=error error_code=write_failed error={err}"
                    );
                }
            }
            Err(err) => {
                warn!(
                    "event=store_save module=store key={key} status=error error_code=encode_failed error={err}"
                );
            }
        }
    }

    fn notify(&self) {
        if let Some(observer) = &self.observer {
            observer.state_changed(&self.list_active_rows());
        }
    }
}

fn render_row(subject: &str, row: &SubjectRow) -> RenderRow {
    let [ca, cbt, exam] = &row.scores;
    let total = compute_total(ca, cbt, exam);
    RenderRow {
        subject: subject.to_string(),
        scores: row.scores.clone(),
        total,
        grade: compute_grade(total),
        background_color: row.color.as_ref().map(|color| color.background.clone()),
        color_name: row.color.as_ref().map(|color| color.name.clone()),
    }
}
