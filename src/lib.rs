//! Boot and power-mode logic for a PSoC Edge CM33 running TrustZone-M.
//!
//! The secure image runs [`secure::SecureBoot`], which partitions the chip
//! and jumps into the non-secure image. The non-secure image runs
//! [`app::PowerLoop`], which blinks while the low-power comparator reads high
//! and enters Hibernate when it reads low, armed to wake on the comparator.
//!
//! Vendor board support is reached through the traits in this crate; the
//! firmware crates bind them to the PDL.
#![cfg_attr(not(test), no_std)]

// This must go first so the macros are visible to the other modules.
mod fmt;

pub mod app;
pub mod comparator;
pub mod config;
pub mod fatal;
pub mod handoff;
pub mod power;
pub mod reset;
pub mod secure;

#[cfg(test)]
mod testing;

pub use app::{Board, Console, CoreLauncher, PowerLoop, Step};
pub use comparator::{Channel, CompareOutput, ComparatorConfig, LowPowerComparator, PowerMode};
pub use config::{AppConfig, SecureConfig, M33_NS_BOOT_ADDR};
pub use fatal::{Fatal, FatalSink, Halt, Ppc};
pub use handoff::{BootHeader, HandoffError, Launch};
pub use power::{PowerManager, WakeSource};
pub use reset::ResetReason;
pub use secure::{ExternalMemory, PeriGroup, SecureBoot, SecurePlatform};
