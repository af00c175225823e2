//! FWU metadata record
//!
//! # Binary Format (v1)
//!
//! All integers are little-endian. UUIDs are stored as 16 raw bytes in GUID
//! byte order.
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0x00    4     CRC32 of bytes 0x04..end
//! 0x04    4     Version
//! 0x08    4     Active bank index
//! 0x0C    4     Previous active bank index
//! 0x10    N*E   Image entries (N = images per bank)
//!
//! Image Entry (E = 32 + B*24 bytes, B = number of banks):
//! 0x00    16    Image type UUID
//! 0x10    16    Location UUID
//! 0x20    B*24  Per-bank image info
//!
//! Bank Info (24 bytes):
//! 0x00    16    Image UUID
//! 0x10    4     Accepted (0 = trial, nonzero = accepted)
//! 0x14    4     Reserved
//! ```

mod codec;
mod record;

pub use record::{FwuMetadata, ImageBankInfo, ImageEntry};

use crate::config::{NR_OF_FW_BANKS, NR_OF_IMAGES_IN_FW_BANK};

/// Size of the CRC field at the start of the record
pub const CRC_FIELD_SIZE: usize = 4;

/// Size of the fixed header (crc, version, active, previous active)
pub const METADATA_HEADER_SIZE: usize = 16;

/// Size of one per-bank info block
pub const BANK_INFO_SIZE: usize = 24;

/// Size of an image entry without its per-bank blocks
pub const IMAGE_ENTRY_HEADER_SIZE: usize = 32;

/// Record sized by the platform configuration
pub type PlatformMetadata = FwuMetadata<NR_OF_FW_BANKS, NR_OF_IMAGES_IN_FW_BANK>;
