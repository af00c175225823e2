//! Read-only queries over the adopted metadata record
//!
//! Every query requires a prior successful [`FwuContext::load`] and returns
//! [`FwuError::NotLoaded`] otherwise.

use crate::checksum::Checksum;
use crate::error::Result;
use crate::loader::FwuContext;
use log::debug;

impl<const BANKS: usize, const IMAGES: usize, C: Checksum> FwuContext<BANKS, IMAGES, C> {
    /// Index of the bank selected for boot
    pub fn active_bank_index(&self) -> Result<u32> {
        Ok(self.metadata()?.active_index)
    }

    /// Index of the bank that was active before the last update
    pub fn previous_active_bank_index(&self) -> Result<u32> {
        Ok(self.metadata()?.previous_active_index)
    }

    /// Format version of the adopted record
    pub fn metadata_version(&self) -> Result<u32> {
        Ok(self.metadata()?.version)
    }

    /// Whether the active bank is still on trial
    ///
    /// True if any image in the active bank has not been accepted yet.
    pub fn is_trial_run(&self) -> Result<bool> {
        let metadata = self.metadata()?;
        let bank = metadata.active_index as usize;

        match metadata.first_unaccepted_image(bank) {
            Some(image) => {
                debug!("FWU: bank {} image {} not accepted, trial run", bank, image);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
