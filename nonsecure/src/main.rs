#![no_main]
#![no_std]

mod board;
mod pdl;

use defmt_rtt as _;
use panic_probe as _;
use psoc_edge_hibernate::{AppConfig, Halt, PowerLoop};

use board::{Cm55, CycleDelay, GpioOutput, PdlBoard, PdlComparator, PdlPower, RetargetConsole};

/// CM33 clock after `cybsp_init`.
const CPU_HZ: u32 = 200_000_000;

/// USER LED1 (red), P16.7.
const USER_LED_PORT: usize = 0x4240_0000 + 16 * 0x80;
const USER_LED_PIN: u32 = 7;

#[cortex_m_rt::entry]
fn main() -> ! {
    defmt::info!("NS image up, CPU at {=u32} Hz", CPU_HZ);

    // SAFETY: P16.7 is configured as a strong drive output by cybsp_init and
    // nothing else drives it.
    let led = unsafe { GpioOutput::new(USER_LED_PORT, USER_LED_PIN) };

    let app = PowerLoop::new(
        led,
        CycleDelay::new(CPU_HZ),
        PdlComparator::new(),
        PdlPower,
        RetargetConsole,
        AppConfig::default(),
    );

    app.run(&mut PdlBoard, &mut Cm55, &mut Halt)
}
