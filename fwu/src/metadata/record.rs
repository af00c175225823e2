//! In-memory form of the FWU metadata record

use super::{BANK_INFO_SIZE, IMAGE_ENTRY_HEADER_SIZE, METADATA_HEADER_SIZE};
use crate::config::FWU_METADATA_VERSION;
use uguid::Guid;

/// State of one image in one bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageBankInfo {
    /// Identifies the image stored in this bank
    pub img_uuid: Guid,
    /// Image has been confirmed good
    pub accepted: bool,
    /// Reserved, carried through unchanged
    pub reserved: u32,
}

impl ImageBankInfo {
    /// Unset slot
    pub const EMPTY: Self = Self {
        img_uuid: Guid::ZERO,
        accepted: false,
        reserved: 0,
    };

    /// Create bank info for an image
    pub const fn new(img_uuid: Guid, accepted: bool) -> Self {
        Self {
            img_uuid,
            accepted,
            reserved: 0,
        }
    }
}

impl Default for ImageBankInfo {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// One logical image slot, with its state in every bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageEntry<const BANKS: usize> {
    /// Kind of image held in this slot
    pub img_type_uuid: Guid,
    /// Storage location holding the banks of this image
    pub location_uuid: Guid,
    /// Per-bank state, indexed by bank
    pub img_bank_info: [ImageBankInfo; BANKS],
}

impl<const BANKS: usize> ImageEntry<BANKS> {
    /// Encoded size of one entry
    pub const SIZE: usize = IMAGE_ENTRY_HEADER_SIZE + BANKS * BANK_INFO_SIZE;

    /// Entry with every bank slot unset
    pub const EMPTY: Self = Self {
        img_type_uuid: Guid::ZERO,
        location_uuid: Guid::ZERO,
        img_bank_info: [ImageBankInfo::EMPTY; BANKS],
    };

    /// Bank info for `bank`, if the bank exists
    pub fn bank(&self, bank: usize) -> Option<&ImageBankInfo> {
        self.img_bank_info.get(bank)
    }
}

impl<const BANKS: usize> Default for ImageEntry<BANKS> {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// FWU metadata record
///
/// `BANKS` and `IMAGES` fix the array sizes and thereby the wire size.
/// See [`crate::metadata`] for the byte layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FwuMetadata<const BANKS: usize, const IMAGES: usize> {
    /// CRC32 over every byte after this field
    pub crc_32: u32,
    /// Format version
    pub version: u32,
    /// Bank selected for boot
    pub active_index: u32,
    /// Bank selected before the last update
    pub previous_active_index: u32,
    /// Image slots
    pub img_entry: [ImageEntry<BANKS>; IMAGES],
}

impl<const BANKS: usize, const IMAGES: usize> FwuMetadata<BANKS, IMAGES> {
    /// Encoded size of the whole record
    pub const SIZE: usize = METADATA_HEADER_SIZE + IMAGES * ImageEntry::<BANKS>::SIZE;

    /// Number of banks this record describes
    pub const BANK_COUNT: u32 = BANKS as u32;

    /// Create a record booting `active_index`, with no images populated
    pub const fn new(active_index: u32) -> Self {
        Self {
            crc_32: 0,
            version: FWU_METADATA_VERSION,
            active_index,
            previous_active_index: active_index,
            img_entry: [ImageEntry::EMPTY; IMAGES],
        }
    }

    /// Check whether `index` names an existing bank
    pub const fn is_valid_bank(index: u32) -> bool {
        index < Self::BANK_COUNT
    }

    /// First image whose state in `bank` is not accepted
    pub fn first_unaccepted_image(&self, bank: usize) -> Option<usize> {
        self.img_entry
            .iter()
            .position(|entry| entry.bank(bank).map_or(true, |info| !info.accepted))
    }
}

impl<const BANKS: usize, const IMAGES: usize> Default for FwuMetadata<BANKS, IMAGES> {
    fn default() -> Self {
        Self::new(0)
    }
}
