//! Target chips and their GPIO/peripheral limits

use crate::error::UnknownChip;
use core::fmt;
use core::str::FromStr;

/// ESP32 family member a board is built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Chip {
    /// ESP32-C6 (RISC-V)
    Esp32C6,
    /// ESP32-S3 (Xtensa)
    Esp32S3,
}

impl Chip {
    /// Every supported chip
    pub const ALL: [Chip; 2] = [Chip::Esp32C6, Chip::Esp32S3];

    /// ESP-IDF target identifier (`HW_TARGET`)
    pub const fn target(self) -> &'static str {
        match self {
            Chip::Esp32C6 => "esp32c6",
            Chip::Esp32S3 => "esp32s3",
        }
    }

    /// Bare-metal Rust target triple
    pub const fn rust_target(self) -> &'static str {
        match self {
            Chip::Esp32C6 => "riscv32imac-unknown-none-elf",
            Chip::Esp32S3 => "xtensa-esp32s3-none-elf",
        }
    }

    /// Whether `pin` is a GPIO on this chip
    pub const fn is_valid_gpio(self, pin: u8) -> bool {
        match self {
            Chip::Esp32C6 => pin <= 30,
            // GPIO22-25 are not bonded out on the S3
            Chip::Esp32S3 => matches!(pin, 0..=21 | 26..=48),
        }
    }

    /// Whether `pin` drives the in-package SPI flash
    pub const fn is_reserved_gpio(self, pin: u8) -> bool {
        match self {
            Chip::Esp32C6 => matches!(pin, 24..=30),
            Chip::Esp32S3 => matches!(pin, 26..=32),
        }
    }

    /// Whether `pin` is sampled at reset to select the boot mode
    pub const fn is_strapping_gpio(self, pin: u8) -> bool {
        match self {
            Chip::Esp32C6 => matches!(pin, 4 | 5 | 8 | 9 | 15),
            Chip::Esp32S3 => matches!(pin, 0 | 3 | 45 | 46),
        }
    }

    /// Number of UART peripherals
    pub const fn uart_count(self) -> u8 {
        match self {
            Chip::Esp32C6 => 2,
            Chip::Esp32S3 => 3,
        }
    }

    /// Number of TWAI (CAN) controllers
    pub const fn twai_count(self) -> u8 {
        match self {
            Chip::Esp32C6 => 2,
            Chip::Esp32S3 => 1,
        }
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.target())
    }
}

impl FromStr for Chip {
    type Err = UnknownChip;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Chip::ALL
            .into_iter()
            .find(|chip| chip.target().eq_ignore_ascii_case(s))
            .ok_or(UnknownChip)
    }
}
