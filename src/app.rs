//! Non-secure power loop.
//!
//! Each iteration samples the comparator once. High blinks the user LED,
//! low announces Hibernate on the LED and the console and enters it. Nothing
//! is carried between iterations: a Hibernate wakeup restarts the image from
//! its reset vector, so [`PowerLoop::startup`] runs again on every wake.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::StatefulOutputPin;

use crate::comparator::{CompareOutput, LowPowerComparator};
use crate::config::AppConfig;
use crate::fatal::{Fatal, FatalSink};
use crate::power::PowerManager;
use crate::reset::ResetReason;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[;H";
const BANNER: &str =
    "************ PSOC Edge MCU: Wakeup from Hibernate using a low-power comparator ************ \r\n\n";
const WOKE_FROM_HIBERNATE: &str = "Wakeup from the Hibernate mode\r\n";
const ACTIVE_BLINK: &str = "In CPU Active mode, blinking USER LED1 at 500 milliseconds.\r\n\n";
const ENTERING_HIBERNATE: &str =
    "Turn on the USER LED1 for 2 seconds, de-initialize IO, and enter System Hibernate mode. \r\n\n";
const HIBERNATE_REJECTED: &str = "The system did not enter Hibernate mode.\r\n\r\n";

/// Board support seen from the non-secure side.
pub trait Board {
    fn reset_reason(&mut self) -> ResetReason;
    /// Pins, clocks and system routing. Also enables interrupts on success.
    fn init(&mut self) -> Result<(), u32>;
}

/// Human readable status output. Best effort.
pub trait Console {
    fn init(&mut self);
    fn write_str(&mut self, s: &str);
    /// True while previously written bytes are still being shifted out.
    fn is_tx_active(&mut self) -> bool;
}

/// Release of the second application core.
pub trait CoreLauncher {
    fn enable_cm55(&mut self, vector_table: u32, wait_us: u32);
}

/// What a single iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Blink,
    /// The Hibernate request was accepted. Only observable off-target.
    Hibernate,
}

pub struct PowerLoop<L, D, C, P, S> {
    led: L,
    delay: D,
    comparator: C,
    power: P,
    console: S,
    config: AppConfig,
}

impl<L, D, C, P, S> PowerLoop<L, D, C, P, S>
where
    L: StatefulOutputPin,
    D: DelayNs,
    C: LowPowerComparator,
    P: PowerManager,
    S: Console,
{
    pub fn new(led: L, delay: D, comparator: C, power: P, console: S, config: AppConfig) -> Self {
        Self {
            led,
            delay,
            comparator,
            power,
            console,
            config,
        }
    }

    /// Bring the image up after reset, ending with the CM55 released.
    pub fn startup<B, M>(&mut self, board: &mut B, cm55: &mut M) -> Result<ResetReason, Fatal>
    where
        B: Board,
        M: CoreLauncher,
    {
        let reason = board.reset_reason();
        let woke = reason.is_hibernate_wakeup();

        // Frozen IOs ignore reconfiguration, release them before board init.
        if woke {
            self.power.io_unfreeze();
        }

        board.init().map_err(Fatal::BoardInit)?;

        self.console.init();
        self.console.write_str(CLEAR_SCREEN);
        self.console.write_str(BANNER);
        if woke {
            self.console.write_str(WOKE_FROM_HIBERNATE);
        }
        reason.log();

        self.config.comparator.bring_up(&mut self.comparator, &mut self.delay)?;

        cm55.enable_cm55(self.config.cm55_boot_addr, self.config.cm55_boot_wait_us);
        debug!("CM55 released at {=u32:#010x}", self.config.cm55_boot_addr);

        Ok(reason)
    }

    /// One iteration of the loop.
    pub fn step(&mut self) -> Result<Step, Fatal> {
        match self.comparator.output(self.config.comparator.channel) {
            CompareOutput::High => {
                self.led.toggle().ok();
                self.delay.delay_ms(self.config.toggle_period_ms);
                self.console.write_str(ACTIVE_BLINK);
                Ok(Step::Blink)
            }
            CompareOutput::Low => self.hibernate().map(|()| Step::Hibernate),
        }
    }

    fn hibernate(&mut self) -> Result<(), Fatal> {
        self.led.set_high().ok();
        self.delay.delay_ms(self.config.hibernate_notice_ms);
        self.led.set_low().ok();
        self.console.write_str(ENTERING_HIBERNATE);

        while self.console.is_tx_active() {}

        self.power.set_hibernate_wakeup_source(self.config.wake_source);
        if let Err(status) = self.power.enter_hibernate() {
            self.console.write_str(HIBERNATE_REJECTED);
            return Err(Fatal::HibernateRejected(status));
        }
        Ok(())
    }

    /// Start up, then iterate forever. Errors end in `sink`.
    pub fn run<B, M, F>(mut self, board: &mut B, cm55: &mut M, sink: &mut F) -> !
    where
        B: Board,
        M: CoreLauncher,
        F: FatalSink,
    {
        if let Err(reason) = self.startup(board, cm55) {
            sink.fatal(reason);
        }

        loop {
            if let Err(reason) = self.step() {
                sink.fatal(reason);
            }
        }
    }
}
