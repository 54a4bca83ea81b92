//! System power modes and Hibernate wake sources.

use crate::comparator::Channel;

/// Hibernate wake source, with the PDL's register encoding.
///
/// The low half selects the source, the high half its polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WakeSource {
    LpComp0Low,
    LpComp0High,
    LpComp1Low,
    LpComp1High,
    RtcAlarm,
    Watchdog,
    Pin0Low,
    Pin0High,
    Pin1Low,
    Pin1High,
}

impl WakeSource {
    pub const fn bits(self) -> u32 {
        match self {
            WakeSource::LpComp0Low => 0x1,
            WakeSource::LpComp0High => 0x1 | (0x1 << 16),
            WakeSource::LpComp1Low => 0x2,
            WakeSource::LpComp1High => 0x2 | (0x2 << 16),
            WakeSource::RtcAlarm => 1 << 17,
            WakeSource::Watchdog => 1 << 18,
            WakeSource::Pin0Low => 0x4,
            WakeSource::Pin0High => 0x4 | (0x4 << 16),
            WakeSource::Pin1Low => 0x8,
            WakeSource::Pin1High => 0x8 | (0x8 << 16),
        }
    }

    /// Wake on the comparator output going high.
    pub const fn comparator_high(channel: Channel) -> Self {
        match channel {
            Channel::Ch0 => WakeSource::LpComp0High,
            Channel::Ch1 => WakeSource::LpComp1High,
        }
    }
}

/// System power-mode control.
pub trait PowerManager {
    /// Release the IO freeze latched on Hibernate entry.
    fn io_unfreeze(&mut self);
    fn set_hibernate_wakeup_source(&mut self, source: WakeSource);
    /// Request System Hibernate.
    ///
    /// On hardware a successful request does not return: the device wakes
    /// through reset. `Err` carries the PDL status of a rejected request.
    fn enter_hibernate(&mut self) -> Result<(), u32>;
}
