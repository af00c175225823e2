//! Storage access for the metadata partition
//!
//! The loader only needs three operations from storage: open a named
//! partition, read bytes from it, and close it again. [`StorageAccessor`]
//! captures exactly that. [`ScopedHandle`] ties the handle lifetime to a
//! scope so it is closed once on every exit path, and never closed if the
//! open did not succeed.

pub mod gpt;

pub use gpt::{GptPartitionStorage, PartitionHandle, StorageError};

use core::fmt;
use core::mem::ManuallyDrop;

/// Trait for partition-level storage backends
pub trait StorageAccessor {
    /// Open partition handle
    type Handle;

    /// Backend error type
    type Error: fmt::Debug;

    /// Resolve and open the partition named `partition`
    fn open(&mut self, partition: &str) -> Result<Self::Handle, Self::Error>;

    /// Read up to `buffer.len()` bytes from the handle's current position
    ///
    /// Returns the number of bytes read. Fewer than requested means the
    /// partition ended; it is not an error at this level.
    fn read(
        &mut self,
        handle: &mut Self::Handle,
        buffer: &mut [u8],
    ) -> Result<usize, Self::Error>;

    /// Release a handle returned by [`StorageAccessor::open`]
    fn close(&mut self, handle: Self::Handle);
}

/// Open handle that closes itself when dropped
pub struct ScopedHandle<'a, S: StorageAccessor + ?Sized> {
    storage: &'a mut S,
    handle: ManuallyDrop<S::Handle>,
}

impl<'a, S: StorageAccessor + ?Sized> ScopedHandle<'a, S> {
    /// Open `partition`; nothing is held if this fails
    pub fn open(storage: &'a mut S, partition: &str) -> Result<Self, S::Error> {
        let handle = storage.open(partition)?;
        Ok(Self {
            storage,
            handle: ManuallyDrop::new(handle),
        })
    }

    /// Read from the open handle
    pub fn read(&mut self, buffer: &mut [u8]) -> Result<usize, S::Error> {
        self.storage.read(&mut *self.handle, buffer)
    }

    /// Close now instead of at end of scope
    pub fn close(self) {
        drop(self);
    }
}

impl<S: StorageAccessor + ?Sized> Drop for ScopedHandle<'_, S> {
    fn drop(&mut self) {
        // SAFETY: `handle` is taken exactly once, here, and never used after
        let handle = unsafe { ManuallyDrop::take(&mut self.handle) };
        self.storage.close(handle);
    }
}
