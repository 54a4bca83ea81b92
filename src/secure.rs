//! Secure stage: partition the chip, then start the non-secure image.

use crate::config::SecureConfig;
use crate::fatal::{Fatal, FatalSink, Ppc};
use crate::handoff::{BootHeader, Launch};
use crate::reset::ResetReason;

/// Peripheral groups whose clocks the secure side routes before protection
/// is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeriGroup {
    /// CM55 tightly coupled memory window (512K).
    Cm55Tcm,
    Smif0,
}

/// External flash interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum ExternalMemory {
    Qspi = 0,
    Ospi = 1,
}

/// Vendor board support seen from the secure side.
///
/// Every `Err` carries the raw vendor status.
pub trait SecurePlatform {
    fn reset_reason(&mut self) -> ResetReason;
    fn io_unfreeze(&mut self);
    /// Pins, clocks and system routing. Also enables interrupts on success.
    fn board_init(&mut self) -> Result<(), u32>;
    fn peri_group_init(&mut self, group: PeriGroup);
    fn external_memory_init(&mut self, interface: ExternalMemory) -> Result<(), u32>;
    fn mpc_init(&mut self) -> Result<(), u32>;
    fn ppc_init(&mut self, unit: Ppc) -> Result<(), u32>;
    /// Header of the non-secure image, read from its boot address.
    fn boot_header(&mut self) -> BootHeader;
}

pub struct SecureBoot<P> {
    platform: P,
    config: SecureConfig,
}

impl<P: SecurePlatform> SecureBoot<P> {
    pub fn new(platform: P, config: SecureConfig) -> Self {
        Self { platform, config }
    }

    /// Run every step up to, but not including, the jump.
    ///
    /// Stops at the first failing step; nothing after it is touched.
    pub fn prepare(&mut self) -> Result<BootHeader, Fatal> {
        let reason = self.platform.reset_reason();
        reason.log();

        // IOs stay frozen after a Hibernate wakeup until released.
        if reason.is_hibernate_wakeup() {
            self.platform.io_unfreeze();
        }

        self.platform.board_init().map_err(Fatal::BoardInit)?;

        // SMIF and the CM55 TCM must be clocked while still secure.
        self.platform.peri_group_init(PeriGroup::Cm55Tcm);
        self.platform.peri_group_init(PeriGroup::Smif0);

        self.platform
            .external_memory_init(self.config.external_memory)
            .map_err(Fatal::ExternalMemory)?;
        debug!("{} external memory up", self.config.external_memory);

        // Memory protection first, then peripheral protection.
        self.platform.mpc_init().map_err(Fatal::MemoryProtection)?;
        for unit in [Ppc::Ppc0, Ppc::Ppc1] {
            self.platform
                .ppc_init(unit)
                .map_err(|status| Fatal::PeripheralProtection { unit, status })?;
        }

        let header = self.platform.boot_header().validate()?;

        info!(
            "NS image at {=u32:#010x}: MSP {=u32:#010x}, reset {=u32:#010x}",
            header.vector_table,
            header.initial_sp,
            header.reset_vector
        );
        Ok(header)
    }

    /// Prepare, then hand control to the non-secure image.
    ///
    /// Any failure goes to `sink`. Neither path returns.
    pub fn run<L, F>(mut self, launcher: &mut L, sink: &mut F) -> !
    where
        L: Launch,
        F: FatalSink,
    {
        match self.prepare() {
            // SAFETY: the header was validated and protection is in place.
            Ok(header) => unsafe { launcher.launch(header) },
            Err(reason) => sink.fatal(reason),
        }
    }
}
