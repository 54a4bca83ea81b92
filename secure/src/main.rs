#![no_main]
#![no_std]
#![feature(abi_cmse_nonsecure_call)]

mod pdl;

use cortex_m::peripheral::scb::Exception;
use defmt_rtt as _;
use panic_probe as _;
use psoc_edge_hibernate::{
    BootHeader, ExternalMemory, Halt, Launch, PeriGroup, Ppc, ResetReason, SecureBoot, SecureConfig,
    SecurePlatform, M33_NS_BOOT_ADDR,
};

use pdl::{check, CY_RSLT_SUCCESS, CY_SMIF_SUCCESS};

#[cortex_m_rt::exception]
unsafe fn SecureFault() -> ! {
    cortex_m::interrupt::disable();

    let sau = &*cortex_m::peripheral::SAU::PTR;
    defmt::error!(
        "SecureFault (S) - SFSR: {=u32:#010X}, SFAR: {=u32:#010X}",
        sau.sfsr.read().0,
        sau.sfar.read().0
    );

    // Make this a hardfault. No interrupt can preempt it and the hardware
    // stops any recursion.
    cortex_m::asm::udf();
}

#[cortex_m_rt::exception]
unsafe fn HardFault(frame: &cortex_m_rt::ExceptionFrame) -> ! {
    defmt::error!("HardFault (S) at PC {=u32:#010X}", frame.pc());

    loop {
        cortex_m::asm::nop();
    }
}

/// Secure-side board support, straight onto the PDL.
struct Pdl;

impl SecurePlatform for Pdl {
    fn reset_reason(&mut self) -> ResetReason {
        unsafe { pdl::Cy_SysLib_GetResetReason() }.into()
    }

    fn io_unfreeze(&mut self) {
        unsafe { pdl::Cy_SysPm_IoUnfreeze() }
    }

    fn board_init(&mut self) -> Result<(), u32> {
        check(unsafe { pdl::cybsp_init() }, CY_RSLT_SUCCESS)?;
        unsafe { cortex_m::interrupt::enable() };
        Ok(())
    }

    fn peri_group_init(&mut self, group: PeriGroup) {
        let slave = match group {
            PeriGroup::Cm55Tcm => pdl::CM55_TCM_512K,
            PeriGroup::Smif0 => pdl::SMIF0,
        };
        unsafe {
            pdl::Cy_SysClk_PeriGroupSlaveInit(slave.peri_nr, slave.group_nr, slave.slave_nr, slave.clk_hf_nr)
        }
    }

    fn external_memory_init(&mut self, interface: ExternalMemory) -> Result<(), u32> {
        check(unsafe { pdl::external_memory_init(interface as u32) }, CY_SMIF_SUCCESS)
    }

    fn mpc_init(&mut self) -> Result<(), u32> {
        check(unsafe { pdl::Cy_MPC_Init() }, CY_RSLT_SUCCESS)
    }

    fn ppc_init(&mut self, unit: Ppc) -> Result<(), u32> {
        let status = match unit {
            Ppc::Ppc0 => unsafe { pdl::Cy_PPC0_Init() },
            Ppc::Ppc1 => unsafe { pdl::Cy_PPC1_Init() },
        };
        check(status, CY_RSLT_SUCCESS)
    }

    fn boot_header(&mut self) -> BootHeader {
        // SAFETY: the boot address comes from the image layout and lies in
        // SMIF0 XIP flash, mapped once external memory is up.
        unsafe { BootHeader::read(M33_NS_BOOT_ADDR as *const u32) }
    }
}

/// Jump into the non-secure world through a CMSE non-secure call.
struct NonSecureCall {
    cpu: cortex_m::Peripherals,
}

#[allow(non_upper_case_globals)]
impl Launch for NonSecureCall {
    unsafe fn launch(&mut self, header: BootHeader) -> ! {
        const VECTKEY_Pos: u32 = 16;
        const VECTKEY_Msk: u32 = 0xFFFF << VECTKEY_Pos;
        const VECTKEY_PERMIT_WRITE: u32 = (0x05FA << VECTKEY_Pos) & VECTKEY_Msk;

        const PRIS_Pos: u32 = 14;
        const PRIS_Msk: u32 = 1 << PRIS_Pos;

        const SYSRESETREQS_Pos: u32 = 3;
        const SYSRESETREQS_Msk: u32 = 1 << SYSRESETREQS_Pos;

        // Non-secure alias of SCB->VTOR.
        const VTOR_NS: *mut u32 = 0xE002_ED08 as *mut u32;
        const NSACR: *mut u32 = 0xE000_ED8C as *mut u32;

        let cpu = &mut self.cpu;

        cpu.SCB.enable(Exception::SecureFault);

        // Prioritize secure exceptions, and let non-secure code request a reset
        cpu.SCB.aircr.modify(|bits| {
            let aircr_payload = bits & (!VECTKEY_Msk);
            let aircr_payload = (aircr_payload | PRIS_Msk) & (!SYSRESETREQS_Msk);
            VECTKEY_PERMIT_WRITE | aircr_payload
        });

        // CP10/CP11 (FPU) and CP0/CP1 usable from non-secure.
        NSACR.write_volatile(0x0000_0C03);

        VTOR_NS.write_volatile(header.vector_table);

        // Write the Non-Secure Main Stack Pointer before switching state. Its value is the first
        // entry of the Non Secure Vector Table.
        cortex_m::register::msp::write_ns(header.initial_sp);

        cortex_m::asm::dsb();
        cortex_m::asm::isb();

        defmt::println!("Jumping to NS reset vector {=u32:#010X}", header.reset_vector);

        // Create a Non-Secure function pointer to the address of the second entry of the Non
        // Secure Vector Table.
        let ns_reset_vector: extern "cmse-nonsecure-call" fn() =
            core::mem::transmute::<u32, _>(header.reset_vector);

        ns_reset_vector();

        cortex_m::asm::udf();
    }
}

#[cortex_m_rt::entry]
fn main() -> ! {
    let cpu = cortex_m::Peripherals::take().unwrap();

    SecureBoot::new(Pdl, SecureConfig::default()).run(&mut NonSecureCall { cpu }, &mut Halt)
}
