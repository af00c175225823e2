//! Build-time platform configuration
//!
//! Bank and image counts fix the size of the on-disk record. Changing them
//! changes the wire format, so every component reading or writing the
//! metadata partition must agree on these values.

use uguid::{guid, Guid};

/// Number of redundant firmware banks (A/B)
pub const NR_OF_FW_BANKS: usize = 2;

/// Number of images held in each bank
pub const NR_OF_IMAGES_IN_FW_BANK: usize = 1;

/// Metadata format version written by compliant update agents
pub const FWU_METADATA_VERSION: u32 = 1;

/// GPT name of the primary metadata partition
pub const FWU_METADATA_PARTITION: &str = "FWU-Metadata";

/// GPT name of the backup metadata partition
pub const FWU_METADATA_BACKUP_PARTITION: &str = "Bkup-FWU-Metadata";

/// GPT partition type GUID for FWU metadata partitions
pub const FWU_METADATA_PARTITION_TYPE: Guid = guid!("8a7a84a0-8387-40f6-ab41-a8b9a5a60d23");
