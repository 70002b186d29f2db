//! In-process backing store.

use std::collections::HashMap;

use crate::backing::BackingStore;
use crate::error::Result;

/// Keeps blobs in a `HashMap`; writes are "durable" for the life of the value.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackingStore {
    slots: HashMap<String, Vec<u8>>,
}

impl MemoryBackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl BackingStore for MemoryBackingStore {
    fn write(&mut self, identifier: &str, blob: &[u8]) -> Result<()> {
        self.slots.insert(identifier.to_string(), blob.to_vec());
        Ok(())
    }

    fn read(&self, identifier: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.slots.get(identifier).cloned())
    }
}
