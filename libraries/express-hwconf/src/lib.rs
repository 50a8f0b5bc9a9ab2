//! VESC Express hardware configuration
//!
//! Board profiles for the ESP32 targets the firmware runs on.
//!
//! Each board is a handful of plain values: a name, the target chip, the CAN
//! transceiver pins and the communication UART. This crate provides:
//! - **Board table**: `DEVKIT_C6`, `DEVKIT_S3`, selected at compile time with
//!   the `devkit-c6` / `devkit-s3` features and exported as `boards::ACTIVE`
//! - **Validation**: pins must exist on the chip, avoid the flash lines and be
//!   used once; checked in `const` context so a bad table fails the build
//! - **Init hook**: the `HwInit` trait implemented by each firmware image
//! - **Headers** (feature `std`): read and write the `hw_<board>.h` form
//!   consumed by the ESP-IDF build
//!
//! # Example
//!
//! ```rust
//! use express_hwconf::{boards, Chip};
//!
//! let board = boards::find("devkit-s3").unwrap();
//! assert_eq!(board.target, Chip::Esp32S3);
//! assert!(board.validate().is_ok());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod boards;
pub mod chip;
pub mod error;
#[cfg(feature = "std")]
pub mod header;
pub mod hook;
pub mod profile;

pub use chip::Chip;
pub use error::{HwconfError, InitError, Result, UnknownChip};
pub use hook::{init_board, HwInit};
pub use profile::{BoardProfile, CanPins, PinRole, UartConfig};
#[cfg(feature = "std")]
pub use profile::slugify;
