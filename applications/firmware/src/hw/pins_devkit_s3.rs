//! DevKit S3 wiring (ESP32-S3-DevKitC-1)
//!
//! UART0 sits on the pins of the on-board USB-serial bridge.

use esp_hal::gpio::{GpioPin, Io};
use express_hwconf::boards::DEVKIT_S3;

pub struct BoardPins {
    pub can_tx: GpioPin<16>,
    pub can_rx: GpioPin<17>,
    pub uart_tx: GpioPin<43>,
    pub uart_rx: GpioPin<44>,
}

impl BoardPins {
    pub fn new(io: Io) -> Self {
        Self {
            can_tx: io.pins.gpio16,
            can_rx: io.pins.gpio17,
            uart_tx: io.pins.gpio43,
            uart_rx: io.pins.gpio44,
        }
    }
}

const _: () = {
    let Some(can) = DEVKIT_S3.can else {
        panic!("DevKit S3 has a CAN block")
    };
    assert!(can.tx == 16 && can.rx == 17);
    let Some(uart) = DEVKIT_S3.uart else {
        panic!("DevKit S3 has a UART block")
    };
    assert!(uart.port == 0 && uart.tx == 43 && uart.rx == 44);
};
