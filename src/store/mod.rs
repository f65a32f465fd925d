use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

/// Hosted record store boundary: one opaque operation, insert a row into a
/// named table. Everything behind the table (engine, indexing, durability)
/// lives outside this service.
pub trait RecordStore: Send + Sync {
    fn insert(&self, table: &str, row: Value) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store rejected the row: {0}")]
    Rejected(String),
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Table-per-key row log backing local runs and tests.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<Mutex<HashMap<String, Vec<Value>>>>,
}

impl InMemoryStore {
    pub fn rows(&self, table: &str) -> Vec<Value> {
        let guard = self.tables.lock().expect("store mutex poisoned");
        guard.get(table).cloned().unwrap_or_default()
    }
}

impl RecordStore for InMemoryStore {
    fn insert(&self, table: &str, row: Value) -> Result<(), StoreError> {
        let mut guard = self.tables.lock().expect("store mutex poisoned");
        guard.entry(table.to_string()).or_default().push(row);
        Ok(())
    }
}
