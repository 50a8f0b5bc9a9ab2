//! VESC Express board firmware
//!
//! Brings up the board selected by the `devkit-*` feature: validates its
//! profile, runs `hw_init()` for the CAN and UART pins, then hands the CAN
//! bus to a logging task.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use esp_backtrace as _;
use esp_hal::{gpio::Io, timer::timg::TimerGroup};
use express_hwconf::{boards, init_board};
use log::{error, info, warn};

mod config;
mod hw;
mod tasks;

use hw::{BoardInit, BoardPins};

/// Main entry point with Embassy executor
#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // Embassy time driver on Timer Group 0
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);

    let board = boards::ACTIVE;
    info!("{} ({}) starting", board.name, board.target);

    for (role, pin) in board.strapping_pins() {
        warn!("{role} uses strapping pin GPIO{pin}");
    }

    let io = Io::new(peripherals.GPIO, peripherals.IO_MUX);
    let mut hw = BoardInit::new(peripherals.TWAI0, peripherals.UART0, BoardPins::new(io));

    if let Err(e) = init_board(&board, &mut hw) {
        error!("{e}");
        return;
    }

    match hw.comm.take() {
        Some(uart) if board.uart_comm => {
            if spawner.spawn(tasks::comm_uart_task(uart, board.name)).is_err() {
                error!("Failed to spawn UART task");
            }
        }
        Some(_) => info!("UART configured but not used for comm"),
        None => {}
    }

    if let Some(can) = hw.can.take() {
        if spawner.spawn(tasks::can_rx_task(can)).is_err() {
            error!("Failed to spawn CAN task");
        }
    }

    if spawner.spawn(tasks::heartbeat_task(board.name)).is_err() {
        error!("Failed to spawn heartbeat task");
    }

    info!("All tasks spawned");
}
