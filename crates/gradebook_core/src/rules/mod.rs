//! Pure derivation rules for gradebook rows.
//!
//! # Responsibility
//! - Coerce raw score input into arithmetic values.
//! - Map total marks onto letter grades.
//! - Rotate per-row display colors through the fixed palette.
//!
//! # Invariants
//! - Everything in this module is stateless and total: no error paths,
//!   no side effects.

pub mod color;
pub mod grade;
