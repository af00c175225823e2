//! Little-endian wire codec for [`FwuMetadata`]
//!
//! Fields are read and written one by one at fixed offsets. Nothing here
//! depends on the in-memory layout of the record types.

use super::record::{FwuMetadata, ImageBankInfo, ImageEntry};
use super::{BANK_INFO_SIZE, CRC_FIELD_SIZE, IMAGE_ENTRY_HEADER_SIZE, METADATA_HEADER_SIZE};
use crate::checksum::Checksum;
use alloc::vec;
use alloc::vec::Vec;
use uguid::Guid;

fn read_u32(buffer: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        buffer[offset],
        buffer[offset + 1],
        buffer[offset + 2],
        buffer[offset + 3],
    ])
}

fn read_guid(buffer: &[u8], offset: usize) -> Guid {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(&buffer[offset..offset + 16]);
    Guid::from_bytes(bytes)
}

fn write_u32(buffer: &mut [u8], offset: usize, value: u32) {
    buffer[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

fn write_guid(buffer: &mut [u8], offset: usize, guid: &Guid) {
    buffer[offset..offset + 16].copy_from_slice(&guid.to_bytes());
}

impl ImageBankInfo {
    fn decode(buffer: &[u8]) -> Self {
        Self {
            img_uuid: read_guid(buffer, 0x00),
            accepted: read_u32(buffer, 0x10) != 0,
            reserved: read_u32(buffer, 0x14),
        }
    }

    fn encode(&self, buffer: &mut [u8]) {
        write_guid(buffer, 0x00, &self.img_uuid);
        write_u32(buffer, 0x10, u32::from(self.accepted));
        write_u32(buffer, 0x14, self.reserved);
    }
}

impl<const BANKS: usize> ImageEntry<BANKS> {
    fn decode(buffer: &[u8]) -> Self {
        Self {
            img_type_uuid: read_guid(buffer, 0x00),
            location_uuid: read_guid(buffer, 0x10),
            img_bank_info: core::array::from_fn(|bank| {
                let offset = IMAGE_ENTRY_HEADER_SIZE + bank * BANK_INFO_SIZE;
                ImageBankInfo::decode(&buffer[offset..offset + BANK_INFO_SIZE])
            }),
        }
    }

    fn encode(&self, buffer: &mut [u8]) {
        write_guid(buffer, 0x00, &self.img_type_uuid);
        write_guid(buffer, 0x10, &self.location_uuid);
        for (bank, info) in self.img_bank_info.iter().enumerate() {
            let offset = IMAGE_ENTRY_HEADER_SIZE + bank * BANK_INFO_SIZE;
            info.encode(&mut buffer[offset..offset + BANK_INFO_SIZE]);
        }
    }
}

impl<const BANKS: usize, const IMAGES: usize> FwuMetadata<BANKS, IMAGES> {
    /// Decode a record from its wire form
    ///
    /// Returns `None` if `buffer` is shorter than [`Self::SIZE`]. Trailing
    /// bytes are ignored. No field is checked here.
    pub fn from_bytes(buffer: &[u8]) -> Option<Self> {
        if buffer.len() < Self::SIZE {
            return None;
        }

        Some(Self {
            crc_32: read_u32(buffer, 0x00),
            version: read_u32(buffer, 0x04),
            active_index: read_u32(buffer, 0x08),
            previous_active_index: read_u32(buffer, 0x0C),
            img_entry: core::array::from_fn(|image| {
                let offset = METADATA_HEADER_SIZE + image * ImageEntry::<BANKS>::SIZE;
                ImageEntry::decode(&buffer[offset..offset + ImageEntry::<BANKS>::SIZE])
            }),
        })
    }

    /// Encode the record, writing `crc_32` as stored
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buffer = vec![0u8; Self::SIZE];

        write_u32(&mut buffer, 0x00, self.crc_32);
        write_u32(&mut buffer, 0x04, self.version);
        write_u32(&mut buffer, 0x08, self.active_index);
        write_u32(&mut buffer, 0x0C, self.previous_active_index);

        for (image, entry) in self.img_entry.iter().enumerate() {
            let offset = METADATA_HEADER_SIZE + image * ImageEntry::<BANKS>::SIZE;
            entry.encode(&mut buffer[offset..offset + ImageEntry::<BANKS>::SIZE]);
        }

        buffer
    }

    /// Checksum over the canonical encoding, excluding the CRC field
    pub fn compute_crc<C: Checksum>(&self, checksum: &C) -> u32 {
        checksum.checksum(&self.to_bytes()[CRC_FIELD_SIZE..])
    }

    /// Recompute and store `crc_32`
    pub fn seal<C: Checksum>(&mut self, checksum: &C) {
        self.crc_32 = self.compute_crc(checksum);
    }
}
