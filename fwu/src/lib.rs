//! FWU Metadata Core
//!
//! A `no_std` loader for Firmware Update (FWU) metadata as laid out by the
//! Arm PSA FWU specification.
//!
//! # Overview
//!
//! Boot firmware keeps several redundant image sets ("banks", e.g. an A/B
//! pair). A small fixed-layout metadata record on its own partition says
//! which bank to boot and whether that bank is still on trial after an
//! update. This crate provides:
//! - The metadata record and its little-endian wire codec
//! - A validation pipeline (index sanity check, then CRC-32 integrity check)
//! - A loader that reads the record through a [`StorageAccessor`] and adopts
//!   it atomically into an [`FwuContext`]
//! - Read-only queries over the adopted record (active bank, trial run)
//! - A GPT-backed storage accessor over any [`gpt_disk_io::BlockIo`]
//!
//! # Architecture
//!
//! ```text
//!   boot sequencer
//!        │ load("FWU-Metadata")
//!        ▼
//!   ┌────────────┐   open/read/close   ┌──────────────────────┐
//!   │ FwuContext │ ──────────────────► │ StorageAccessor      │
//!   │  (loader)  │                     │ (GptPartitionStorage)│
//!   └────────────┘                     └──────────────────────┘
//!        │ raw bytes
//!        ▼
//!   validate(): sanity ──► crc ──► adopt
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use fwu_metadata::{PlatformContext, GptPartitionStorage, FWU_METADATA_PARTITION};
//!
//! let mut storage = GptPartitionStorage::new(block_io);
//! let mut fwu = PlatformContext::new();
//!
//! fwu.load(&mut storage, FWU_METADATA_PARTITION)?;
//! let bank = fwu.active_bank_index()?;
//! let trial = fwu.is_trial_run()?;
//! ```

#![no_std]
#![warn(missing_docs)]

extern crate alloc;

pub mod checksum;
pub mod config;
pub mod error;
pub mod loader;
pub mod metadata;
pub mod query;
pub mod storage;
pub mod validation;

pub use checksum::{Checksum, Crc32};
pub use config::{
    FWU_METADATA_BACKUP_PARTITION, FWU_METADATA_PARTITION, FWU_METADATA_VERSION,
    NR_OF_FW_BANKS, NR_OF_IMAGES_IN_FW_BANK,
};
pub use error::{FwuError, Result};
pub use loader::{FwuContext, PlatformContext};
pub use metadata::{FwuMetadata, ImageBankInfo, ImageEntry, PlatformMetadata};
pub use storage::{GptPartitionStorage, ScopedHandle, StorageAccessor};

// High-level API exports
pub use validation::validate;
