//! Error types for FWU metadata operations

use core::fmt;

/// Result type for FWU metadata operations
pub type Result<T> = core::result::Result<T, FwuError>;

/// Errors that can occur while loading or querying FWU metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FwuError {
    /// Metadata partition could not be resolved or opened
    IoOpen,

    /// Read call on the metadata partition failed
    IoRead,

    /// Device answered but returned fewer bytes than the record needs
    ShortRead {
        /// Bytes required for one record
        expected: usize,
        /// Bytes actually returned
        actual: usize,
    },

    /// Bank index fields out of range.
    ///
    /// Each field is `Some(value)` when that index failed the bound check.
    SanityCheck {
        /// Offending `active_index`
        active_index: Option<u32>,
        /// Offending `previous_active_index`
        previous_active_index: Option<u32>,
    },

    /// Stored CRC does not match the payload
    CrcMismatch {
        /// Value found in the record
        stored: u32,
        /// Value computed over the payload
        computed: u32,
    },

    /// Query issued before any successful load
    NotLoaded,
}

impl FwuError {
    /// Device-level failure; retrying the device may help
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::IoOpen | Self::IoRead | Self::ShortRead { .. })
    }

    /// Record content is bad; the partition should be treated as corrupt
    pub const fn is_corruption(&self) -> bool {
        matches!(self, Self::SanityCheck { .. } | Self::CrcMismatch { .. })
    }

    /// Get a human-readable description of the error
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IoOpen => "Failed to open metadata partition",
            Self::IoRead => "Failed to read metadata partition",
            Self::ShortRead { .. } => "Short read on metadata partition",
            Self::SanityCheck { .. } => "Sanity check failed on FWU metadata",
            Self::CrcMismatch { .. } => "CRC check failed on FWU metadata",
            Self::NotLoaded => "FWU metadata not loaded",
        }
    }
}

impl fmt::Display for FwuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShortRead { expected, actual } => {
                write!(f, "Read {} bytes instead of expected {} bytes", actual, expected)
            }
            Self::SanityCheck {
                active_index,
                previous_active_index,
            } => {
                write!(f, "{}:", self.as_str())?;
                if let Some(idx) = active_index {
                    write!(f, " active_index={}", idx)?;
                }
                if let Some(idx) = previous_active_index {
                    write!(f, " previous_active_index={}", idx)?;
                }
                Ok(())
            }
            Self::CrcMismatch { stored, computed } => write!(
                f,
                "{} (stored {:#010x}, computed {:#010x})",
                self.as_str(),
                stored,
                computed
            ),
            _ => f.write_str(self.as_str()),
        }
    }
}
