//! Unrecoverable boot and power errors, and where they end up.

use core::fmt;

use crate::handoff::HandoffError;

/// Peripheral protection controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Ppc {
    Ppc0,
    Ppc1,
}

/// Everything that stops the firmware. None of these are retried.
///
/// The `u32` payloads are the raw vendor status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Fatal {
    BoardInit(u32),
    ExternalMemory(u32),
    MemoryProtection(u32),
    PeripheralProtection { unit: Ppc, status: u32 },
    Handoff(HandoffError),
    Comparator(u32),
    HibernateRejected(u32),
}

impl fmt::Display for Fatal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fatal::BoardInit(s) => write!(f, "board init failed ({s:#x})"),
            Fatal::ExternalMemory(s) => write!(f, "external memory init failed ({s:#x})"),
            Fatal::MemoryProtection(s) => write!(f, "MPC init failed ({s:#x})"),
            Fatal::PeripheralProtection { unit, status } => {
                write!(f, "{unit:?} init failed ({status:#x})")
            }
            Fatal::Handoff(e) => write!(f, "handoff: {e}"),
            Fatal::Comparator(s) => write!(f, "LPComp init failed ({s:#x})"),
            Fatal::HibernateRejected(s) => write!(f, "hibernate entry rejected ({s:#x})"),
        }
    }
}

impl From<HandoffError> for Fatal {
    fn from(e: HandoffError) -> Self {
        Fatal::Handoff(e)
    }
}

/// Sink for fatal errors.
///
/// On target this halts. Simulations and tests can unwind or record instead,
/// but they must not return into the caller either.
pub trait FatalSink {
    fn fatal(&mut self, reason: Fatal) -> !;
}

/// Halts the core: interrupts off, spin forever.
pub struct Halt;

impl FatalSink for Halt {
    fn fatal(&mut self, reason: Fatal) -> ! {
        cortex_m::interrupt::disable();
        error!("fatal: {}", reason);

        loop {
            cortex_m::asm::nop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_carries_status() {
        assert_eq!(format!("{}", Fatal::BoardInit(0x42)), "board init failed (0x42)");
        assert_eq!(
            format!(
                "{}",
                Fatal::PeripheralProtection {
                    unit: Ppc::Ppc1,
                    status: 0x5
                }
            ),
            "Ppc1 init failed (0x5)"
        );
        assert_eq!(
            format!("{}", Fatal::Handoff(HandoffError::NoImage)),
            "handoff: no image at boot address"
        );
    }

    #[test]
    fn handoff_error_converts() {
        let f: Fatal = HandoffError::NotThumb(0x10).into();
        assert_eq!(f, Fatal::Handoff(HandoffError::NotThumb(0x10)));
    }
}
