//! Devkit C6 wiring (ESP32-C6-DevKitC-1)
//!
//! Pin types are fixed here so a wrong GPIO fails to compile instead of
//! silently driving the wrong pad.

use esp_hal::gpio::{GpioPin, Io};
use express_hwconf::boards::DEVKIT_C6;

pub struct BoardPins {
    pub can_tx: GpioPin<4>,
    pub can_rx: GpioPin<5>,
    pub uart_tx: GpioPin<16>,
    pub uart_rx: GpioPin<17>,
}

impl BoardPins {
    pub fn new(io: Io) -> Self {
        Self {
            can_tx: io.pins.gpio4,
            can_rx: io.pins.gpio5,
            uart_tx: io.pins.gpio16,
            uart_rx: io.pins.gpio17,
        }
    }
}

const _: () = {
    let Some(can) = DEVKIT_C6.can else {
        panic!("Devkit C6 has a CAN block")
    };
    assert!(can.tx == 4 && can.rx == 5);
    let Some(uart) = DEVKIT_C6.uart else {
        panic!("Devkit C6 has a UART block")
    };
    assert!(uart.port == 0 && uart.tx == 16 && uart.rx == 17);
};
