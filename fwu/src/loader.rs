//! Metadata loader
//!
//! [`FwuContext`] owns the cached metadata record for one boot session. The
//! boot sequencer builds it once, calls [`FwuContext::load`], and then asks
//! the query methods in [`crate::query`] for the derived facts.

use crate::checksum::{Checksum, Crc32};
use crate::config::{NR_OF_FW_BANKS, NR_OF_IMAGES_IN_FW_BANK};
use crate::error::{FwuError, Result};
use crate::metadata::FwuMetadata;
use crate::storage::{ScopedHandle, StorageAccessor};
use crate::validation::validate_with;
use alloc::vec;
use log::{info, warn};

/// Holder of the validated metadata record
///
/// The record is only ever replaced as a whole by a successful
/// [`load`](Self::load). Failed loads leave it untouched.
pub struct FwuContext<const BANKS: usize, const IMAGES: usize, C: Checksum = Crc32> {
    metadata: Option<FwuMetadata<BANKS, IMAGES>>,
    checksum: C,
}

/// Context sized by the platform configuration
pub type PlatformContext = FwuContext<NR_OF_FW_BANKS, NR_OF_IMAGES_IN_FW_BANK>;

impl<const BANKS: usize, const IMAGES: usize> FwuContext<BANKS, IMAGES, Crc32> {
    /// Create an empty context using CRC-32
    pub const fn new() -> Self {
        Self {
            metadata: None,
            checksum: Crc32,
        }
    }
}

impl<const BANKS: usize, const IMAGES: usize> Default for FwuContext<BANKS, IMAGES, Crc32> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const BANKS: usize, const IMAGES: usize, C: Checksum> FwuContext<BANKS, IMAGES, C> {
    /// Create an empty context with a specific checksum primitive
    pub const fn with_checksum(checksum: C) -> Self {
        Self {
            metadata: None,
            checksum,
        }
    }

    /// Load metadata from `partition` and adopt it if valid
    ///
    /// Reads one record, runs the validation pipeline, and on success
    /// replaces the cached record. The partition handle is closed on every
    /// path where it was opened.
    ///
    /// # Errors
    /// * `IoOpen` - partition could not be resolved or opened
    /// * `IoRead` - the read call failed
    /// * `ShortRead` - fewer bytes than one record were returned
    /// * `SanityCheck` / `CrcMismatch` - record rejected by validation
    pub fn load<S: StorageAccessor + ?Sized>(
        &mut self,
        storage: &mut S,
        partition: &str,
    ) -> Result<()> {
        let size = FwuMetadata::<BANKS, IMAGES>::SIZE;

        let mut handle = ScopedHandle::open(storage, partition).map_err(|e| {
            warn!("FWU: failed to open metadata partition '{}' ({:?})", partition, e);
            FwuError::IoOpen
        })?;

        let mut raw = vec![0u8; size];
        let bytes_read = handle.read(&mut raw).map_err(|e| {
            warn!("FWU: failed to read metadata partition '{}' ({:?})", partition, e);
            FwuError::IoRead
        })?;

        if bytes_read != size {
            let err = FwuError::ShortRead {
                expected: size,
                actual: bytes_read,
            };
            warn!("FWU: {}", err);
            return Err(err);
        }

        let metadata = validate_with::<BANKS, IMAGES, C>(&raw, &self.checksum)?;
        handle.close();

        info!(
            "FWU: metadata v{} loaded from '{}', active bank {} (previous {})",
            metadata.version, partition, metadata.active_index, metadata.previous_active_index
        );
        self.metadata = Some(metadata);

        Ok(())
    }

    /// Whether a record has been adopted
    pub fn is_loaded(&self) -> bool {
        self.metadata.is_some()
    }

    /// The adopted record
    pub fn metadata(&self) -> Result<&FwuMetadata<BANKS, IMAGES>> {
        self.metadata.as_ref().ok_or(FwuError::NotLoaded)
    }
}
