//! Embassy tasks

use embassy_time::{Duration, Timer};
use log::{info, warn};

use crate::config;
use crate::hw::{CanBus, CommUart};

/// Log every frame seen on the CAN bus
///
/// Receive errors (bus-off, overrun) are logged and the task keeps going;
/// the controller recovers on its own.
#[embassy_executor::task]
pub async fn can_rx_task(bus: CanBus) {
    let (mut rx, _tx) = bus.split();
    info!("CAN receive task started");

    loop {
        match rx.receive_async().await {
            Ok(frame) => info!("CAN rx: {:?}", frame),
            Err(e) => warn!("CAN receive error: {:?}", e),
        }
    }
}

/// Own the communication UART for the life of the firmware
///
/// Announces the board once, then drains received bytes and logs how many
/// arrived per poll.
#[embassy_executor::task]
pub async fn comm_uart_task(mut uart: CommUart, board: &'static str) {
    if uart.write_bytes(board.as_bytes()).is_err() || uart.write_bytes(b"\r\n").is_err() {
        warn!("UART comm banner not sent");
    }
    info!("UART comm task started");

    loop {
        let mut received = 0usize;
        while uart.read_byte().is_ok() {
            received += 1;
        }
        if received > 0 {
            info!("UART rx: {received} bytes");
        }
        Timer::after(Duration::from_millis(config::system::UART_POLL_MS)).await;
    }
}

/// Periodic "alive" line on the log console
#[embassy_executor::task]
pub async fn heartbeat_task(board: &'static str) {
    loop {
        Timer::after(Duration::from_secs(config::system::HEARTBEAT_SECS)).await;
        info!("{board} alive");
    }
}
