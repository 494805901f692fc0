//! Domain model for gradebook rows.
//!
//! # Responsibility
//! - Define the canonical subject-row record and its wire format.
//! - Keep the subject mapping ordered and tolerant of legacy entries.
//!
//! # Invariants
//! - Subject keys are unique and case-sensitive; last write wins.
//! - Undecodable persisted entries are retained, never dropped or raised.

pub mod subject;
