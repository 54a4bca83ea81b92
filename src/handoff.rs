//! Secure to non-secure handoff record.
//!
//! The non-secure image starts with its vector table right after the
//! MCUboot header. The first word is the initial main stack pointer, the
//! second word is the reset vector. Nothing else of the image is looked at.

use core::fmt;

/// Size of the MCUboot header placed in front of every image.
pub const MCUBOOT_HEADER_SIZE: u32 = 0x400;

/// Address of an image's vector table given the start of its NVM region.
pub const fn image_boot_addr(nvm_start: u32) -> u32 {
    nvm_start + MCUBOOT_HEADER_SIZE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandoffError {
    /// Erased or blank flash at the boot address.
    NoImage,
    /// Reset vector without the Thumb bit set.
    NotThumb(u32),
}

impl fmt::Display for HandoffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandoffError::NoImage => f.write_str("no image at boot address"),
            HandoffError::NotThumb(rv) => write!(f, "reset vector {rv:#010x} is not a thumb address"),
        }
    }
}

/// Stack pointer and reset vector of the image to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootHeader {
    /// Address of the vector table the two words were read from.
    pub vector_table: u32,
    pub initial_sp: u32,
    pub reset_vector: u32,
}

impl BootHeader {
    pub const fn from_words(vector_table: u32, words: [u32; 2]) -> Self {
        Self {
            vector_table,
            initial_sp: words[0],
            reset_vector: words[1],
        }
    }

    /// Read the two header words at the start of `table`.
    ///
    /// # Safety
    ///
    /// `table` must point to two readable, word aligned words.
    pub unsafe fn read(table: *const u32) -> Self {
        let words = [table.read_volatile(), table.add(1).read_volatile()];
        Self::from_words(table as usize as u32, words)
    }

    pub fn validate(self) -> Result<Self, HandoffError> {
        let blank = |w: u32| w == u32::MAX || w == 0;
        if blank(self.initial_sp) || blank(self.reset_vector) {
            return Err(HandoffError::NoImage);
        }
        if self.reset_vector & 1 == 0 {
            return Err(HandoffError::NotThumb(self.reset_vector));
        }
        Ok(self)
    }
}

/// Transfer of control into another image.
pub trait Launch {
    /// Load `header` as the target's context and jump to its reset vector.
    ///
    /// This never returns. Whatever state the caller holds is abandoned.
    ///
    /// # Safety
    ///
    /// `header` must describe a valid image for the target security state.
    unsafe fn launch(&mut self, header: BootHeader) -> !;
}
