//! Bindings to the vendor BSP, PDL and retarget-io linked into the
//! non-secure image.
#![allow(non_snake_case, non_upper_case_globals)]

use core::ffi::c_int;

/// `cy_rslt_t`
pub type CyRslt = u32;
pub const CY_RSLT_SUCCESS: CyRslt = 0;
/// `cy_en_lpcomp_status_t`
pub const CY_LPCOMP_SUCCESS: u32 = 0;
/// `cy_en_syspm_status_t`
pub const CY_SYSPM_SUCCESS: u32 = 0;

/// `LPCOMP_Type`
#[repr(C)]
pub struct LpCompType {
    _private: [u8; 0],
}

/// `MXCM55_Type`
#[repr(C)]
pub struct MxCm55Type {
    _private: [u8; 0],
}

/// `cy_stc_lpcomp_config_t`, produced by the device configurator.
#[repr(C)]
pub struct LpCompConfig {
    _private: [u8; 0],
}

/// `cy_stc_lpcomp_context_t`: per-channel interrupt type and power mode.
#[repr(C)]
#[derive(Default)]
pub struct LpCompContext {
    pub int_type: [u32; 2],
    pub power: [u32; 2],
}

// Non-secure aliases, from the device header.
pub const LPCOMP: *mut LpCompType = 0x4242_0000 as *mut LpCompType;
pub const MXCM55: *mut MxCm55Type = 0x4400_0000 as *mut MxCm55Type;

extern "C" {
    pub fn cybsp_init() -> CyRslt;
    pub fn Cy_SysLib_GetResetReason() -> u32;

    pub fn Cy_SysPm_IoUnfreeze();
    pub fn Cy_SysPm_SetHibernateWakeupSource(source: u32);
    pub fn Cy_SysPm_SystemEnterHibernate() -> u32;

    pub fn Cy_LPComp_Init(
        base: *mut LpCompType,
        channel: u32,
        config: *const LpCompConfig,
        context: *mut LpCompContext,
    ) -> u32;
    pub fn Cy_LPComp_ConnectULPReference(base: *mut LpCompType, channel: u32);
    pub fn Cy_LPComp_UlpReferenceEnable(base: *mut LpCompType);
    pub fn Cy_LPComp_SetPower(base: *mut LpCompType, channel: u32, power: u32, context: *mut LpCompContext);
    pub fn Cy_LPComp_GetCompare(base: *const LpCompType, channel: u32) -> u32;

    pub fn Cy_SysEnableCM55(base: *mut MxCm55Type, vector_table_base: u32, wait_us: u32);

    /// Sets up the debug UART and hooks it to stdio.
    pub fn init_retarget_io();
    pub fn cy_retarget_io_is_tx_active() -> bool;
    /// Retargeted to the debug UART.
    pub fn putchar(c: c_int) -> c_int;

    pub static lpcomp_0_comp_0_config: LpCompConfig;
}

/// Vendor status to `Result`, keeping the raw code on failure.
pub fn check(status: u32, success: u32) -> Result<(), u32> {
    if status == success {
        Ok(())
    } else {
        Err(status)
    }
}
