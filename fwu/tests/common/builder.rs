use crate::common::{MemoryBlockDevice, BLOCK_SIZE};
use fwu_metadata::config::FWU_METADATA_PARTITION_TYPE;
use fwu_metadata::{Crc32, FwuMetadata};
use uguid::{guid, Guid};

const PARTITION_ENTRY_SIZE: usize = 128;
const NUM_PARTITION_ENTRIES: usize = 128;
const ENTRY_ARRAY_LBA: usize = 2;
const FIRST_USABLE_LBA: u64 = 34;

/// Builds a GPT disk image with named partitions
pub struct GptDiskBuilder {
    num_blocks: usize,
    next_free_lba: u64,
    partitions: Vec<(String, u64, u64, Vec<u8>)>,
}

impl GptDiskBuilder {
    pub fn new(num_blocks: usize) -> Self {
        Self {
            num_blocks,
            next_free_lba: FIRST_USABLE_LBA,
            partitions: Vec::new(),
        }
    }

    /// Add a partition of `blocks` blocks holding `content` at its start
    pub fn add_partition(mut self, name: &str, blocks: u64, content: &[u8]) -> Self {
        let first = self.next_free_lba;
        let last = first + blocks - 1;
        self.next_free_lba = last + 1;
        self.partitions
            .push((name.to_string(), first, last, content.to_vec()));
        self
    }

    /// Add an entry with the given LBA range and no content, valid or not
    pub fn add_raw_entry(mut self, name: &str, first: u64, last: u64) -> Self {
        self.partitions
            .push((name.to_string(), first, last, Vec::new()));
        self
    }

    pub fn build(self) -> MemoryBlockDevice {
        let mut data = vec![0u8; self.num_blocks * BLOCK_SIZE];

        // Protective MBR boot signature
        data[510] = 0x55;
        data[511] = 0xAA;

        // Primary header at LBA 1
        let hdr = BLOCK_SIZE;
        data[hdr..hdr + 8].copy_from_slice(b"EFI PART");
        data[hdr + 8..hdr + 12].copy_from_slice(&0x0001_0000u32.to_le_bytes());
        data[hdr + 12..hdr + 16].copy_from_slice(&92u32.to_le_bytes());
        data[hdr + 24..hdr + 32].copy_from_slice(&1u64.to_le_bytes());
        data[hdr + 32..hdr + 40].copy_from_slice(&(self.num_blocks as u64 - 1).to_le_bytes());
        data[hdr + 40..hdr + 48].copy_from_slice(&FIRST_USABLE_LBA.to_le_bytes());
        data[hdr + 48..hdr + 56].copy_from_slice(&(self.num_blocks as u64 - 34).to_le_bytes());
        data[hdr + 56..hdr + 72]
            .copy_from_slice(&guid!("12345678-1234-1234-1234-123456789012").to_bytes());
        data[hdr + 72..hdr + 80].copy_from_slice(&(ENTRY_ARRAY_LBA as u64).to_le_bytes());
        data[hdr + 80..hdr + 84].copy_from_slice(&(NUM_PARTITION_ENTRIES as u32).to_le_bytes());
        data[hdr + 84..hdr + 88].copy_from_slice(&(PARTITION_ENTRY_SIZE as u32).to_le_bytes());

        for (index, (name, first, last, content)) in self.partitions.iter().enumerate() {
            let entry = ENTRY_ARRAY_LBA * BLOCK_SIZE + index * PARTITION_ENTRY_SIZE;
            data[entry..entry + 16].copy_from_slice(&FWU_METADATA_PARTITION_TYPE.to_bytes());
            data[entry + 16..entry + 32].copy_from_slice(&unique_guid(index).to_bytes());
            data[entry + 32..entry + 40].copy_from_slice(&first.to_le_bytes());
            data[entry + 40..entry + 48].copy_from_slice(&last.to_le_bytes());

            // UTF-16LE name, 36 code units max
            for (i, unit) in name.encode_utf16().take(36).enumerate() {
                let at = entry + 56 + i * 2;
                data[at..at + 2].copy_from_slice(&unit.to_le_bytes());
            }

            if !content.is_empty() {
                let start = *first as usize * BLOCK_SIZE;
                data[start..start + content.len()].copy_from_slice(content);
            }
        }

        MemoryBlockDevice::new(data)
    }
}

fn unique_guid(index: usize) -> Guid {
    let mut bytes = guid!("0fc63daf-8483-4772-8e79-3d69d8477de4").to_bytes();
    bytes[15] = index as u8;
    Guid::from_bytes(bytes)
}

/// Builds sealed metadata records for tests
pub struct MetadataBuilder<const BANKS: usize, const IMAGES: usize> {
    metadata: FwuMetadata<BANKS, IMAGES>,
}

impl<const BANKS: usize, const IMAGES: usize> MetadataBuilder<BANKS, IMAGES> {
    /// Record booting `active`, every image in every bank accepted
    pub fn new(active: u32) -> Self {
        let mut metadata = FwuMetadata::new(active);
        for (image, entry) in metadata.img_entry.iter_mut().enumerate() {
            entry.img_type_uuid = image_guid(0xA0, image, 0);
            entry.location_uuid = image_guid(0xB0, image, 0);
            for (bank, info) in entry.img_bank_info.iter_mut().enumerate() {
                info.img_uuid = image_guid(0xC0, image, bank);
                info.accepted = true;
            }
        }
        Self { metadata }
    }

    pub fn previous(mut self, previous: u32) -> Self {
        self.metadata.previous_active_index = previous;
        self
    }

    pub fn version(mut self, version: u32) -> Self {
        self.metadata.version = version;
        self
    }

    /// Mark one image of one bank as not yet accepted
    pub fn unaccepted(mut self, image: usize, bank: usize) -> Self {
        self.metadata.img_entry[image].img_bank_info[bank].accepted = false;
        self
    }

    pub fn record(&self) -> FwuMetadata<BANKS, IMAGES> {
        let mut metadata = self.metadata;
        metadata.seal(&Crc32);
        metadata
    }

    /// Wire bytes with a correct CRC
    pub fn bytes(&self) -> Vec<u8> {
        self.record().to_bytes()
    }
}

fn image_guid(tag: u8, image: usize, bank: usize) -> Guid {
    let mut bytes = [0x11u8; 16];
    bytes[0] = tag;
    bytes[1] = image as u8;
    bytes[2] = bank as u8;
    Guid::from_bytes(bytes)
}
