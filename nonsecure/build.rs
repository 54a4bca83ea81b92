// Modified from cortex-m-quickstart

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-env-changed=PSOC_EDGE_BSP_LIB_DIR");

    let memory_x = "memory.x";

    // Put memory configuration in our output directory and ensure it's
    // on the linker search path.
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());
    std::fs::copy(memory_x, out.join("memory.x")).expect("failed to copy memory.x");
    println!("cargo:rustc-link-search={}", out.display());

    // Prebuilt BSP, PDL and generated device configuration for the non-secure
    // project (cybsp_init, Cy_LPComp_*, Cy_SysPm_*, retarget-io, ...).
    if let Some(dir) = env::var_os("PSOC_EDGE_BSP_LIB_DIR") {
        println!("cargo:rustc-link-search={}", PathBuf::from(dir).display());
        println!("cargo:rustc-link-lib=static=cm33_ns_bsp");
    }
}
