//! Memory layout and timing for both images.

use crate::comparator::ComparatorConfig;
use crate::handoff::image_boot_addr;
use crate::power::WakeSource;
use crate::secure::ExternalMemory;

/// Start of the CM33 non-secure image NVM region (SMIF0 XIP, NS alias).
pub const M33_NS_NVM_START: u32 = 0x6034_0000;
/// Start of the CM55 image NVM region (SMIF0 XIP, NS alias).
pub const M55_NVM_START: u32 = 0x6058_0000;

pub const TOGGLE_LED_PERIOD_MS: u32 = 500;
pub const LED_ON_BEFORE_HIBERNATE_MS: u32 = 2000;
pub const CM55_BOOT_WAIT_US: u32 = 10;

/// Vector table of the CM33 non-secure image.
pub const M33_NS_BOOT_ADDR: u32 = image_boot_addr(M33_NS_NVM_START);

/// Secure stage configuration.
///
/// Where the non-secure image lives is a property of the image layout,
/// read by [`SecurePlatform::boot_header`](crate::SecurePlatform::boot_header).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecureConfig {
    pub external_memory: ExternalMemory,
}

impl Default for SecureConfig {
    fn default() -> Self {
        Self {
            external_memory: ExternalMemory::Qspi,
        }
    }
}

/// Non-secure power loop configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppConfig {
    pub toggle_period_ms: u32,
    /// How long the LED stays on before Hibernate is entered.
    pub hibernate_notice_ms: u32,
    pub wake_source: WakeSource,
    pub comparator: ComparatorConfig,
    pub cm55_boot_addr: u32,
    pub cm55_boot_wait_us: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        let comparator = ComparatorConfig::default();
        Self {
            toggle_period_ms: TOGGLE_LED_PERIOD_MS,
            hibernate_notice_ms: LED_ON_BEFORE_HIBERNATE_MS,
            wake_source: WakeSource::comparator_high(comparator.channel),
            comparator,
            cm55_boot_addr: image_boot_addr(M55_NVM_START),
            cm55_boot_wait_us: CM55_BOOT_WAIT_US,
        }
    }
}
