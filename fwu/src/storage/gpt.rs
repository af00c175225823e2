//! GPT-backed storage accessor
//!
//! Resolves partitions by their GPT partition name and reads their
//! contents through any [`BlockIo`] device.

use super::StorageAccessor;
use alloc::vec;
use core::fmt;
use gpt_disk_io::{BlockIo, Disk};
use gpt_disk_types::{BlockSize, Lba};
use log::debug;

/// Errors from the GPT storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Block device access failed
    IoError,
    /// No valid GPT header on the device
    InvalidHeader,
    /// No used partition entry carries the requested name
    PartitionNotFound,
    /// Partition entry has an inverted or unaddressable LBA range
    InvalidPartition,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError => write!(f, "Block I/O operation failed"),
            Self::InvalidHeader => write!(f, "Invalid GPT header"),
            Self::PartitionNotFound => write!(f, "Partition not found"),
            Self::InvalidPartition => write!(f, "Invalid partition range"),
        }
    }
}

/// Open partition on a GPT disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionHandle {
    /// First LBA of the partition
    pub first_lba: u64,
    /// Last LBA of the partition (inclusive)
    pub last_lba: u64,
    size: u64,
    /// Byte offset of the next read, relative to the partition start
    position: u64,
}

impl PartitionHandle {
    /// Partition size in bytes
    pub fn size_bytes(&self) -> u64 {
        self.size
    }

    /// Byte offset of the next read
    pub fn position(&self) -> u64 {
        self.position
    }
}

/// Byte length of `first..=last`, `None` if inverted or not representable
fn partition_size(first: u64, last: u64, block_size: u64) -> Option<u64> {
    last.checked_sub(first)?
        .checked_add(1)?
        .checked_mul(block_size)
}

/// Lends a device to [`Disk`] without giving up ownership
struct ByRef<'a, B: BlockIo>(&'a mut B);

impl<B: BlockIo> BlockIo for ByRef<'_, B> {
    type Error = B::Error;

    fn block_size(&self) -> BlockSize {
        self.0.block_size()
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        self.0.num_blocks()
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read_blocks(start_lba, dst)
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<(), Self::Error> {
        self.0.write_blocks(start_lba, src)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.0.flush()
    }
}

/// Storage accessor over a GPT-partitioned block device
pub struct GptPartitionStorage<B: BlockIo> {
    block_io: B,
    open_handles: usize,
}

impl<B: BlockIo> GptPartitionStorage<B> {
    /// Wrap a block device
    pub fn new(block_io: B) -> Self {
        Self {
            block_io,
            open_handles: 0,
        }
    }

    /// Handles opened and not yet closed
    pub fn open_handles(&self) -> usize {
        self.open_handles
    }

    /// Give the block device back
    pub fn into_inner(self) -> B {
        self.block_io
    }

    fn block_size(&self) -> u64 {
        u64::from(self.block_io.block_size().to_u32())
    }

    /// Find the partition named `name` and check its range
    fn find_partition(&mut self, name: &str) -> Result<PartitionHandle, StorageError> {
        let block_size = self.block_size();
        let mut disk = Disk::new(ByRef(&mut self.block_io)).map_err(|_| StorageError::IoError)?;

        let mut block_buf = vec![0u8; block_size as usize];
        let header = disk
            .read_primary_gpt_header(&mut block_buf)
            .map_err(|_| StorageError::IoError)?;

        if !header.is_signature_valid() {
            return Err(StorageError::InvalidHeader);
        }

        let layout = header
            .get_partition_entry_array_layout()
            .map_err(|_| StorageError::InvalidHeader)?;

        let iter = disk
            .gpt_partition_entry_array_iter(layout, &mut block_buf)
            .map_err(|_| StorageError::IoError)?;

        for entry_result in iter {
            let entry = entry_result.map_err(|_| StorageError::IoError)?;

            if !entry.is_used() {
                continue;
            }

            let matches = entry
                .name
                .chars()
                .take_while(|c| *c != '\0')
                .eq(name.chars());
            if !matches {
                continue;
            }

            let first_lba = entry.starting_lba.to_u64();
            let last_lba = entry.ending_lba.to_u64();
            let size = partition_size(first_lba, last_lba, block_size)
                .ok_or(StorageError::InvalidPartition)?;

            return Ok(PartitionHandle {
                first_lba,
                last_lba,
                size,
                position: 0,
            });
        }

        Err(StorageError::PartitionNotFound)
    }
}

impl<B: BlockIo> StorageAccessor for GptPartitionStorage<B> {
    type Handle = PartitionHandle;
    type Error = StorageError;

    fn open(&mut self, partition: &str) -> Result<PartitionHandle, StorageError> {
        let handle = self.find_partition(partition).map_err(|e| {
            debug!("GPT: cannot resolve partition '{}': {}", partition, e);
            e
        })?;

        debug!(
            "GPT: partition '{}' at LBA {}..={}",
            partition, handle.first_lba, handle.last_lba
        );
        self.open_handles += 1;

        Ok(handle)
    }

    fn read(
        &mut self,
        handle: &mut PartitionHandle,
        buffer: &mut [u8],
    ) -> Result<usize, StorageError> {
        let block_size = self.block_size();
        let remaining = handle.size.saturating_sub(handle.position);
        let len = (buffer.len() as u64).min(remaining) as usize;
        if len == 0 {
            return Ok(0);
        }

        // Read whole blocks covering [position, position + len)
        let first_block = handle.position / block_size;
        let skip = (handle.position % block_size) as usize;
        let bs = block_size as usize;
        let blocks = (skip + len + bs - 1) / bs;

        let mut scratch = vec![0u8; blocks * bs];
        self.block_io
            .read_blocks(Lba(handle.first_lba + first_block), &mut scratch)
            .map_err(|_| StorageError::IoError)?;

        buffer[..len].copy_from_slice(&scratch[skip..skip + len]);
        handle.position += len as u64;

        Ok(len)
    }

    fn close(&mut self, _handle: PartitionHandle) {
        self.open_handles = self.open_handles.saturating_sub(1);
    }
}
