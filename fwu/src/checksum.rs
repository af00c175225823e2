//! Checksum primitive used for metadata integrity

use crc::{Crc, CRC_32_ISO_HDLC};

/// IEEE 802.3 CRC-32 (reflected, init and xorout 0xFFFFFFFF)
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// A 32-bit checksum over a byte range
pub trait Checksum {
    /// Compute the checksum of `data`
    fn checksum(&self, data: &[u8]) -> u32;
}

/// Standard CRC-32, as computed by the platform `crc32` instruction path
#[derive(Debug, Clone, Copy, Default)]
pub struct Crc32;

impl Checksum for Crc32 {
    fn checksum(&self, data: &[u8]) -> u32 {
        CRC32.checksum(data)
    }
}
