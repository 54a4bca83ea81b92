//! Recording doubles for the collaborator traits.
//!
//! Every double appends to a shared [`Log`] so tests can check the order of
//! calls across collaborators.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};

use crate::app::{Board, Console, CoreLauncher};
use crate::comparator::{Channel, CompareOutput, LowPowerComparator, PowerMode};
use crate::config::M33_NS_BOOT_ADDR;
use crate::fatal::{Fatal, FatalSink, Ppc};
use crate::handoff::{BootHeader, Launch};
use crate::power::{PowerManager, WakeSource};
use crate::reset::ResetReason;
use crate::secure::{ExternalMemory, PeriGroup, SecurePlatform};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    ResetReason,
    IoUnfreeze,
    BoardInit,
    PeriGroupInit(PeriGroup),
    ExternalMemoryInit(ExternalMemory),
    MpcInit,
    PpcInit(Ppc),
    ReadBootHeader,
    /// Initial SP and reset vector.
    Launch(u32, u32),
    Fatal(Fatal),
    CompInit(Channel),
    CompConnectReference(Channel),
    CompEnableReference,
    CompSetPower(Channel, PowerMode),
    DelayUs(u32),
    DelayMs(u32),
    LedOn,
    LedOff,
    LedToggle,
    ConsoleInit,
    Print(String),
    TxPoll(bool),
    SetWakeSource(WakeSource),
    EnterHibernate,
    EnableCm55(u32, u32),
}

#[derive(Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.0.borrow().iter().filter(|e| pred(e)).count()
    }
}

pub struct MockPlatform {
    log: Log,
    reset: ResetReason,
    /// Step that reports a failure, and its status.
    pub fail_on: Option<(Event, u32)>,
    /// Initial SP and reset vector found at the non-secure boot address.
    pub header: [u32; 2],
}

impl MockPlatform {
    pub fn new(log: &Log, reset: ResetReason) -> Self {
        Self {
            log: log.clone(),
            reset,
            fail_on: None,
            header: [0x2400_8000, 0x6034_0511],
        }
    }

    fn record(&mut self, event: Event) -> Result<(), u32> {
        let res = match &self.fail_on {
            Some((failing, status)) if *failing == event => Err(*status),
            _ => Ok(()),
        };
        self.log.push(event);
        res
    }
}

impl SecurePlatform for MockPlatform {
    fn reset_reason(&mut self) -> ResetReason {
        self.log.push(Event::ResetReason);
        self.reset
    }

    fn io_unfreeze(&mut self) {
        self.log.push(Event::IoUnfreeze);
    }

    fn board_init(&mut self) -> Result<(), u32> {
        self.record(Event::BoardInit)
    }

    fn peri_group_init(&mut self, group: PeriGroup) {
        self.log.push(Event::PeriGroupInit(group));
    }

    fn external_memory_init(&mut self, interface: ExternalMemory) -> Result<(), u32> {
        self.record(Event::ExternalMemoryInit(interface))
    }

    fn mpc_init(&mut self) -> Result<(), u32> {
        self.record(Event::MpcInit)
    }

    fn ppc_init(&mut self, unit: Ppc) -> Result<(), u32> {
        self.record(Event::PpcInit(unit))
    }

    fn boot_header(&mut self) -> BootHeader {
        self.log.push(Event::ReadBootHeader);
        BootHeader::from_words(M33_NS_BOOT_ADDR, self.header)
    }
}

/// Records the launch, then unwinds in place of the jump.
pub struct MockLauncher {
    log: Log,
}

impl MockLauncher {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl Launch for MockLauncher {
    unsafe fn launch(&mut self, header: BootHeader) -> ! {
        self.log.push(Event::Launch(header.initial_sp, header.reset_vector));
        panic!("launched");
    }
}

/// Records the reason, then unwinds in place of the halt.
pub struct RecordingSink {
    log: Log,
}

impl RecordingSink {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl FatalSink for RecordingSink {
    fn fatal(&mut self, reason: Fatal) -> ! {
        self.log.push(Event::Fatal(reason));
        panic!("fatal: {reason}");
    }
}

pub struct MockBoard {
    log: Log,
    reset: ResetReason,
    pub init_status: Result<(), u32>,
}

impl MockBoard {
    pub fn new(log: &Log, reset: ResetReason) -> Self {
        Self {
            log: log.clone(),
            reset,
            init_status: Ok(()),
        }
    }
}

impl Board for MockBoard {
    fn reset_reason(&mut self) -> ResetReason {
        self.log.push(Event::ResetReason);
        self.reset
    }

    fn init(&mut self) -> Result<(), u32> {
        self.log.push(Event::BoardInit);
        self.init_status
    }
}

pub struct MockComparator {
    log: Log,
    samples: VecDeque<CompareOutput>,
    pub init_status: Result<(), u32>,
}

impl MockComparator {
    pub fn new(log: &Log, samples: impl IntoIterator<Item = CompareOutput>) -> Self {
        Self {
            log: log.clone(),
            samples: samples.into_iter().collect(),
            init_status: Ok(()),
        }
    }
}

impl LowPowerComparator for MockComparator {
    fn init(&mut self, channel: Channel) -> Result<(), u32> {
        self.log.push(Event::CompInit(channel));
        self.init_status
    }

    fn connect_ulp_reference(&mut self, channel: Channel) {
        self.log.push(Event::CompConnectReference(channel));
    }

    fn enable_ulp_reference(&mut self) {
        self.log.push(Event::CompEnableReference);
    }

    fn set_power(&mut self, channel: Channel, mode: PowerMode) {
        self.log.push(Event::CompSetPower(channel, mode));
    }

    /// Replays the queued samples, high once they run out.
    fn output(&mut self, _channel: Channel) -> CompareOutput {
        self.samples.pop_front().unwrap_or(CompareOutput::High)
    }
}

pub struct MockDelay {
    log: Log,
}

impl MockDelay {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_us(&mut self, us: u32) {
        self.log.push(Event::DelayUs(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.log.push(Event::DelayMs(ms));
    }
}

pub struct MockLed {
    log: Log,
    pub high: bool,
}

impl MockLed {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            high: false,
        }
    }
}

impl ErrorType for MockLed {
    type Error = Infallible;
}

impl OutputPin for MockLed {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::LedOff);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::LedOn);
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for MockLed {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        self.log.push(Event::LedToggle);
        self.high = !self.high;
        Ok(())
    }
}

pub struct MockPower {
    log: Log,
    pub hibernate_status: Result<(), u32>,
}

impl MockPower {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            hibernate_status: Ok(()),
        }
    }
}

impl PowerManager for MockPower {
    fn io_unfreeze(&mut self) {
        self.log.push(Event::IoUnfreeze);
    }

    fn set_hibernate_wakeup_source(&mut self, source: WakeSource) {
        self.log.push(Event::SetWakeSource(source));
    }

    fn enter_hibernate(&mut self) -> Result<(), u32> {
        self.log.push(Event::EnterHibernate);
        self.hibernate_status
    }
}

pub struct MockConsole {
    log: Log,
    /// Number of polls that still report an active transmit.
    pub busy_polls: u32,
}

impl MockConsole {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            busy_polls: 0,
        }
    }
}

impl Console for MockConsole {
    fn init(&mut self) {
        self.log.push(Event::ConsoleInit);
    }

    fn write_str(&mut self, s: &str) {
        self.log.push(Event::Print(s.to_string()));
    }

    fn is_tx_active(&mut self) -> bool {
        let busy = self.busy_polls > 0;
        self.busy_polls = self.busy_polls.saturating_sub(1);
        self.log.push(Event::TxPoll(busy));
        busy
    }
}

pub struct MockCm55 {
    log: Log,
}

impl MockCm55 {
    pub fn new(log: &Log) -> Self {
        Self { log: log.clone() }
    }
}

impl CoreLauncher for MockCm55 {
    fn enable_cm55(&mut self, vector_table: u32, wait_us: u32) {
        self.log.push(Event::EnableCm55(vector_table, wait_us));
    }
}
