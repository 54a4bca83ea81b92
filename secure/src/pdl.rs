//! Bindings to the vendor BSP and PDL linked into the secure image.
#![allow(non_snake_case)]

/// `cy_rslt_t`
pub type CyRslt = u32;
pub const CY_RSLT_SUCCESS: CyRslt = 0;
/// `cy_en_smif_status_t`
pub const CY_SMIF_SUCCESS: u32 = 0;

/// Peripheral group slave coordinates (`CY_MMIO_<name>_{PERI,GROUP,SLAVE,CLK_HF}_NR`).
#[derive(Clone, Copy)]
pub struct PeriSlave {
    pub peri_nr: u8,
    pub group_nr: u8,
    pub slave_nr: u8,
    pub clk_hf_nr: u8,
}

pub const CM55_TCM_512K: PeriSlave = PeriSlave {
    peri_nr: 1,
    group_nr: 4,
    slave_nr: 0,
    clk_hf_nr: 1,
};

pub const SMIF0: PeriSlave = PeriSlave {
    peri_nr: 1,
    group_nr: 3,
    slave_nr: 0,
    clk_hf_nr: 0,
};

extern "C" {
    pub fn cybsp_init() -> CyRslt;
    pub fn Cy_SysLib_GetResetReason() -> u32;
    pub fn Cy_SysPm_IoUnfreeze();
    pub fn Cy_SysClk_PeriGroupSlaveInit(peri_nr: u8, group_nr: u8, slave_nr: u8, clk_hf_nr: u8);
    /// SMIF0 bring-up for the given `en_ext_mem_t`, returns `cy_en_smif_status_t`.
    pub fn external_memory_init(interface: u32) -> u32;
    /// Generated by the device configurator from the protection settings.
    pub fn Cy_MPC_Init() -> CyRslt;
    pub fn Cy_PPC0_Init() -> CyRslt;
    pub fn Cy_PPC1_Init() -> CyRslt;
}

/// Vendor status to `Result`, keeping the raw code on failure.
pub fn check(status: u32, success: u32) -> Result<(), u32> {
    if status == success {
        Ok(())
    } else {
        Err(status)
    }
}
