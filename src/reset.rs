//! Reset cause, as reported by the system library once per boot.

bitflags::bitflags! {
    /// Reset causes latched by the SRSS.
    ///
    /// Bits the device reports but that are not named here are kept, so
    /// [`ResetReason::bits`] always returns the raw register value.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ResetReason: u32 {
        /// Hardware watchdog reset.
        const HWWDT = 0x0000_0001;
        /// Fault logging system requested a reset from its active logic.
        const ACT_FAULT = 0x0000_0010;
        /// Fault logging system requested a reset from its deep-sleep logic.
        const DPSLP_FAULT = 0x0000_0020;
        /// Debugger-initiated reset.
        const TC_DBGRESET = 0x0000_0040;
        /// Software reset via AIRCR.SYSRESETREQ.
        const SOFT = 0x0000_0080;
        // Multi-counter watchdog timers 0 to 3.
        const SWWDT0 = 0x0000_0100;
        const SWWDT1 = 0x0000_0200;
        const SWWDT2 = 0x0000_0400;
        const SWWDT3 = 0x0000_0800;
        /// Clock supervision lost the WCO.
        const CSV_WCO_LOSS = 0x0001_0000;
        /// External reset pin.
        const XRES = 0x0002_0000;
        /// Brown-out on VDDD.
        const BODVDDD = 0x0004_0000;
        /// Clock supervision lost a high-frequency clock.
        const HFCLK_LOSS = 0x0010_0000;
        /// Clock supervision saw a high-frequency clock out of range.
        const HFCLK_ERR = 0x0020_0000;
        /// The device woke up from Hibernate.
        const HIB_WAKEUP = 0x8000_0000;
    }
}

impl ResetReason {
    /// True if this boot is the restart that follows a Hibernate wakeup.
    ///
    /// IOs are still frozen in that case and must be unfrozen before any pin
    /// is reconfigured.
    pub fn is_hibernate_wakeup(self) -> bool {
        self.contains(Self::HIB_WAKEUP)
    }

    /// Names of the latched causes, lowest bit first.
    pub fn causes(self) -> impl Iterator<Item = &'static str> {
        self.iter_names().map(|(name, _)| name)
    }

    /// Log every latched cause. An empty set is a plain power-on.
    pub(crate) fn log(self) {
        if self.is_empty() {
            info!("reset cause: power-on");
        }
        for cause in self.causes() {
            info!("reset cause: {=str}", cause);
        }
        let unknown = self.bits() & !Self::all().bits();
        if unknown != 0 {
            warn!("unknown reset bits {=u32:#x}", unknown);
        }
    }
}

impl From<u32> for ResetReason {
    fn from(bits: u32) -> Self {
        Self::from_bits_retain(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hibernate_wakeup_is_top_bit() {
        assert!(ResetReason::from(0x8000_0000).is_hibernate_wakeup());
        assert!(ResetReason::from(0x8002_0000).is_hibernate_wakeup());
        assert!(!ResetReason::from(0x0002_0000).is_hibernate_wakeup());
    }

    #[test]
    fn cold_boot_has_no_causes() {
        let reason = ResetReason::from(0);
        assert!(reason.is_empty());
        assert!(!reason.is_hibernate_wakeup());
        assert_eq!(reason.causes().count(), 0);
    }

    #[test]
    fn causes_are_decoded_by_name() {
        let reason = ResetReason::from(0x8002_0080);
        let causes: Vec<_> = reason.causes().collect();
        assert_eq!(causes, ["SOFT", "XRES", "HIB_WAKEUP"]);
    }

    #[test]
    fn unknown_bits_are_kept() {
        let reason = ResetReason::from(0x0000_1000 | 0x0002_0000);
        assert_eq!(reason.bits(), 0x0002_1000);
        assert_eq!(reason.causes().collect::<Vec<_>>(), ["XRES"]);
    }

    #[test]
    fn other_causes_do_not_look_like_wakeup() {
        for reason in [
            ResetReason::HWWDT,
            ResetReason::SOFT,
            ResetReason::XRES,
            ResetReason::BODVDDD,
            ResetReason::HFCLK_ERR,
        ] {
            assert!(!reason.is_hibernate_wakeup(), "{:?}", reason);
        }
    }
}
