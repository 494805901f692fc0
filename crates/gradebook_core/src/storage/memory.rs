//! In-memory storage adapter.
//!
//! # Responsibility
//! - Provide an infallible adapter for tests and for degraded
//!   in-memory-only sessions.

use super::{StorageAdapter, StorageResult};
use std::collections::HashMap;

/// Volatile `HashMap`-backed adapter. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    documents: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct read-back of a stored document, for assertions in tests.
    pub fn document(&self, key: &str) -> Option<&str> {
        self.documents.get(key).map(String::as_str)
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.documents.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.documents.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
