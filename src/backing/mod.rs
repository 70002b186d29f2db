//! Backing Store Module
//!
//! Durable slot stores the cache snapshots into. The engine only ever
//! writes and reads whole blobs under a single identifier.

mod file;
mod memory;

pub use file::FileBackingStore;
pub use memory::MemoryBackingStore;

use crate::error::Result;

// == Backing Store Trait ==
/// A key-value slot store holding opaque blobs.
pub trait BackingStore {
    /// Stores `blob` under `identifier`, replacing any previous blob.
    ///
    /// Returns `Ok(())` only once the write is durable.
    fn write(&mut self, identifier: &str, blob: &[u8]) -> Result<()>;

    /// Reads the blob stored under `identifier`, `Ok(None)` if there is none.
    fn read(&self, identifier: &str) -> Result<Option<Vec<u8>>>;
}

impl<B: BackingStore + ?Sized> BackingStore for Box<B> {
    fn write(&mut self, identifier: &str, blob: &[u8]) -> Result<()> {
        (**self).write(identifier, blob)
    }

    fn read(&self, identifier: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(identifier)
    }
}
