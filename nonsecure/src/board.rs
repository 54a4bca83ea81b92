//! Non-secure collaborators on top of the PDL and the GPIO registers.

use core::convert::Infallible;
use core::ptr;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use psoc_edge_hibernate::{
    Board, Channel, CompareOutput, Console, CoreLauncher, LowPowerComparator, PowerManager, PowerMode, ResetReason,
    WakeSource,
};

use crate::pdl::{self, check, LpCompContext, CY_LPCOMP_SUCCESS, CY_RSLT_SUCCESS, CY_SYSPM_SUCCESS};

pub struct PdlBoard;

impl Board for PdlBoard {
    fn reset_reason(&mut self) -> ResetReason {
        unsafe { pdl::Cy_SysLib_GetResetReason() }.into()
    }

    fn init(&mut self) -> Result<(), u32> {
        check(unsafe { pdl::cybsp_init() }, CY_RSLT_SUCCESS)?;
        unsafe { cortex_m::interrupt::enable() };
        Ok(())
    }
}

/// Push-pull output on a GPIO port, driven through the set/clear/invert
/// registers so no read-modify-write is needed.
pub struct GpioOutput {
    port: *mut u32,
    mask: u32,
}

impl GpioOutput {
    // GPIO_PRT_Type word offsets.
    const OUT: usize = 0;
    const OUT_CLR: usize = 1;
    const OUT_SET: usize = 2;
    const OUT_INV: usize = 3;

    /// # Safety
    ///
    /// `port` must be a GPIO port register block and the pin must be
    /// configured as a strong drive output, owned by nobody else.
    pub const unsafe fn new(port: usize, pin: u32) -> Self {
        Self {
            port: port as *mut u32,
            mask: 1 << pin,
        }
    }

    fn write(&mut self, reg: usize) {
        unsafe { ptr::write_volatile(self.port.add(reg), self.mask) }
    }

    fn out(&self) -> u32 {
        unsafe { ptr::read_volatile(self.port.add(Self::OUT)) }
    }
}

impl ErrorType for GpioOutput {
    type Error = Infallible;
}

impl OutputPin for GpioOutput {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.write(Self::OUT_CLR);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.write(Self::OUT_SET);
        Ok(())
    }
}

impl StatefulOutputPin for GpioOutput {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.out() & self.mask != 0)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.out() & self.mask == 0)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.write(Self::OUT_INV);
        Ok(())
    }
}

/// Busy-wait delay counted in core clock cycles.
pub struct CycleDelay {
    cpu_hz: u32,
}

impl CycleDelay {
    pub const fn new(cpu_hz: u32) -> Self {
        Self { cpu_hz }
    }
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = u64::from(ns) * u64::from(self.cpu_hz) / 1_000_000_000;
        cortex_m::asm::delay(cycles.max(1) as u32);
    }

    fn delay_us(&mut self, us: u32) {
        let cycles = u64::from(us) * u64::from(self.cpu_hz) / 1_000_000;
        cortex_m::asm::delay(cycles.min(u64::from(u32::MAX)) as u32);
    }
}

/// LPComp block with its context owned here rather than in a global.
#[derive(Default)]
pub struct PdlComparator {
    context: LpCompContext,
}

impl PdlComparator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LowPowerComparator for PdlComparator {
    fn init(&mut self, channel: Channel) -> Result<(), u32> {
        let status = unsafe {
            pdl::Cy_LPComp_Init(
                pdl::LPCOMP,
                channel as u32,
                ptr::addr_of!(pdl::lpcomp_0_comp_0_config),
                &mut self.context,
            )
        };
        check(status, CY_LPCOMP_SUCCESS)
    }

    fn connect_ulp_reference(&mut self, channel: Channel) {
        unsafe { pdl::Cy_LPComp_ConnectULPReference(pdl::LPCOMP, channel as u32) }
    }

    fn enable_ulp_reference(&mut self) {
        unsafe { pdl::Cy_LPComp_UlpReferenceEnable(pdl::LPCOMP) }
    }

    fn set_power(&mut self, channel: Channel, mode: PowerMode) {
        unsafe { pdl::Cy_LPComp_SetPower(pdl::LPCOMP, channel as u32, mode as u32, &mut self.context) }
    }

    fn output(&mut self, channel: Channel) -> CompareOutput {
        unsafe { pdl::Cy_LPComp_GetCompare(pdl::LPCOMP, channel as u32) }.into()
    }
}

pub struct PdlPower;

impl PowerManager for PdlPower {
    fn io_unfreeze(&mut self) {
        unsafe { pdl::Cy_SysPm_IoUnfreeze() }
    }

    fn set_hibernate_wakeup_source(&mut self, source: WakeSource) {
        defmt::debug!("hibernate wake source {=u32:#x}", source.bits());
        unsafe { pdl::Cy_SysPm_SetHibernateWakeupSource(source.bits()) }
    }

    fn enter_hibernate(&mut self) -> Result<(), u32> {
        check(unsafe { pdl::Cy_SysPm_SystemEnterHibernate() }, CY_SYSPM_SUCCESS)
    }
}

/// Debug UART through retarget-io.
pub struct RetargetConsole;

impl Console for RetargetConsole {
    fn init(&mut self) {
        unsafe { pdl::init_retarget_io() }
    }

    fn write_str(&mut self, s: &str) {
        for b in s.bytes() {
            unsafe { pdl::putchar(b.into()) };
        }
    }

    fn is_tx_active(&mut self) -> bool {
        unsafe { pdl::cy_retarget_io_is_tx_active() }
    }
}

pub struct Cm55;

impl CoreLauncher for Cm55 {
    fn enable_cm55(&mut self, vector_table: u32, wait_us: u32) {
        unsafe { pdl::Cy_SysEnableCM55(pdl::MXCM55, vector_table, wait_us) }
    }
}
