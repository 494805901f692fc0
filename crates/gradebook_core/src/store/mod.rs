//! Gradebook store orchestration.
//!
//! # Responsibility
//! - Own session state (gradebook mapping + deleted set) over a storage
//!   adapter seam.
//! - Keep presentation callers decoupled from persistence details.

pub mod gradebook_store;
