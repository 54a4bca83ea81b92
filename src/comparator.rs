//! Low-power comparator (LPComp).
//!
//! Encodings follow the PDL so drivers can pass them straight through.

use embedded_hal::delay::DelayNs;

use crate::fatal::Fatal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Channel {
    Ch0 = 0x1,
    Ch1 = 0x2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum PowerMode {
    Off = 0,
    /// Ultra-low power. Needs [`ULP_SETTLE_TIME_US`] after enabling.
    UltraLow = 1,
    Low = 2,
    Normal = 3,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CompareOutput {
    /// Positive input below the negative input.
    Low,
    High,
}

impl From<u32> for CompareOutput {
    fn from(raw: u32) -> Self {
        if raw == 0 {
            CompareOutput::Low
        } else {
            CompareOutput::High
        }
    }
}

/// Start-up time of a channel in ultra-low power mode.
pub const ULP_SETTLE_TIME_US: u32 = 50;

/// LPComp block operations.
///
/// `init` reports the raw PDL status on failure.
pub trait LowPowerComparator {
    fn init(&mut self, channel: Channel) -> Result<(), u32>;
    /// Route the local reference generator to the negative input.
    fn connect_ulp_reference(&mut self, channel: Channel);
    fn enable_ulp_reference(&mut self);
    fn set_power(&mut self, channel: Channel, mode: PowerMode);
    fn output(&mut self, channel: Channel) -> CompareOutput;
}

/// How the wake comparator is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComparatorConfig {
    pub channel: Channel,
    pub power_mode: PowerMode,
    pub settle_time_us: u32,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            channel: Channel::Ch0,
            power_mode: PowerMode::UltraLow,
            settle_time_us: ULP_SETTLE_TIME_US,
        }
    }
}

impl ComparatorConfig {
    /// Init the channel against the local reference and wait for it to settle.
    pub fn bring_up<C, D>(&self, comparator: &mut C, delay: &mut D) -> Result<(), Fatal>
    where
        C: LowPowerComparator,
        D: DelayNs,
    {
        comparator.init(self.channel).map_err(Fatal::Comparator)?;
        comparator.connect_ulp_reference(self.channel);
        comparator.enable_ulp_reference();
        comparator.set_power(self.channel, self.power_mode);
        delay.delay_us(self.settle_time_us);

        debug!("LPComp {} up in {}", self.channel, self.power_mode);
        Ok(())
    }
}
