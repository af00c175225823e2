//! Metadata validation pipeline
//!
//! A candidate record is adopted only after both checks pass:
//! 1. **Sanity** - both bank index fields name existing banks
//! 2. **Integrity** - stored CRC matches the CRC of the payload bytes
//!
//! Sanity runs first so an out-of-range record fails with the more specific
//! error. Either failure is terminal.

use crate::checksum::Checksum;
use crate::error::{FwuError, Result};
use crate::metadata::{FwuMetadata, CRC_FIELD_SIZE};
use log::warn;

/// Validate raw record bytes with the default CRC-32
pub fn validate<const BANKS: usize, const IMAGES: usize>(
    raw: &[u8],
) -> Result<FwuMetadata<BANKS, IMAGES>> {
    validate_with(raw, &crate::checksum::Crc32)
}

/// Validate raw record bytes with a caller-supplied checksum primitive
///
/// `raw` must hold at least one full record; only the first
/// [`FwuMetadata::SIZE`] bytes are considered.
pub fn validate_with<const BANKS: usize, const IMAGES: usize, C: Checksum>(
    raw: &[u8],
    checksum: &C,
) -> Result<FwuMetadata<BANKS, IMAGES>> {
    let size = FwuMetadata::<BANKS, IMAGES>::SIZE;
    let candidate = FwuMetadata::<BANKS, IMAGES>::from_bytes(raw).ok_or(FwuError::ShortRead {
        expected: size,
        actual: raw.len(),
    })?;

    sanity_check(&candidate)?;
    crc_check(&candidate, &raw[..size], checksum)?;

    Ok(candidate)
}

/// Check both bank index fields against the bank count
pub fn sanity_check<const BANKS: usize, const IMAGES: usize>(
    candidate: &FwuMetadata<BANKS, IMAGES>,
) -> Result<()> {
    let out_of_range = |index: u32| {
        (!FwuMetadata::<BANKS, IMAGES>::is_valid_bank(index)).then_some(index)
    };

    let active_index = out_of_range(candidate.active_index);
    let previous_active_index = out_of_range(candidate.previous_active_index);

    if active_index.is_some() || previous_active_index.is_some() {
        let err = FwuError::SanityCheck {
            active_index,
            previous_active_index,
        };
        warn!("{} (banks: {})", err, BANKS);
        return Err(err);
    }

    Ok(())
}

/// Compare the stored CRC against the CRC of everything after it
///
/// The CRC is computed over `raw` exactly as it came off storage, in field
/// order, so reserved bits and non-canonical encodings are covered too.
pub fn crc_check<const BANKS: usize, const IMAGES: usize, C: Checksum>(
    candidate: &FwuMetadata<BANKS, IMAGES>,
    raw: &[u8],
    checksum: &C,
) -> Result<()> {
    let computed = checksum.checksum(&raw[CRC_FIELD_SIZE..]);

    if candidate.crc_32 != computed {
        let err = FwuError::CrcMismatch {
            stored: candidate.crc_32,
            computed,
        };
        warn!("{}", err);
        return Err(err);
    }

    Ok(())
}
