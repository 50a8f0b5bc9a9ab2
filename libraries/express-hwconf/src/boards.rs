//! Board table
//!
//! One constant per supported board. Firmware builds pick one of them with a
//! cargo feature (`devkit-c6`, `devkit-s3`) and get it as [`ACTIVE`].

use crate::chip::Chip;
use crate::profile::{BoardProfile, CanPins, UartConfig};

/// Baud rate of the communication UART on the devkits
pub const DEVKIT_UART_BAUDRATE: u32 = 115_200;

/// ESP32-C6-DevKitC
pub const DEVKIT_C6: BoardProfile<'static> = BoardProfile {
    name: "Devkit C6",
    target: Chip::Esp32C6,
    uart_comm: true,
    can: Some(CanPins { tx: 4, rx: 5 }),
    uart: Some(UartConfig {
        port: 0,
        baud_rate: DEVKIT_UART_BAUDRATE,
        tx: 16,
        rx: 17,
    }),
};

/// ESP32-S3-DevKitC
pub const DEVKIT_S3: BoardProfile<'static> = BoardProfile {
    name: "DevKit S3",
    target: Chip::Esp32S3,
    uart_comm: true,
    can: Some(CanPins { tx: 16, rx: 17 }),
    uart: Some(UartConfig {
        port: 0,
        baud_rate: DEVKIT_UART_BAUDRATE,
        tx: 43,
        rx: 44,
    }),
};

/// Every board, ordered by target then name
pub const ALL: &[BoardProfile<'static>] = &[DEVKIT_C6, DEVKIT_S3];

const _: () = assert!(DEVKIT_C6.validate().is_ok(), "invalid Devkit C6 profile");
const _: () = assert!(DEVKIT_S3.validate().is_ok(), "invalid DevKit S3 profile");

#[cfg(all(feature = "devkit-c6", feature = "devkit-s3"))]
compile_error!("features `devkit-c6` and `devkit-s3` are mutually exclusive");

/// Board selected at compile time
#[cfg(all(feature = "devkit-c6", not(feature = "devkit-s3")))]
pub const ACTIVE: BoardProfile<'static> = DEVKIT_C6;

/// Board selected at compile time
#[cfg(all(feature = "devkit-s3", not(feature = "devkit-c6")))]
pub const ACTIVE: BoardProfile<'static> = DEVKIT_S3;

/// Look up a board by name
///
/// Tries an exact match first, then a case-insensitive one, then (with the
/// `std` feature) the slug form, so `"devkit-s3"` finds `"DevKit S3"`.
pub fn find(name: &str) -> Option<&'static BoardProfile<'static>> {
    let name = name.trim();
    if let Some(board) = ALL.iter().find(|b| b.name == name) {
        return Some(board);
    }
    if let Some(board) = ALL.iter().find(|b| b.name.eq_ignore_ascii_case(name)) {
        return Some(board);
    }

    #[cfg(feature = "std")]
    {
        let wanted = crate::profile::slugify(name);
        if !wanted.is_empty() {
            return ALL.iter().find(|b| b.slug() == wanted);
        }
    }

    None
}
