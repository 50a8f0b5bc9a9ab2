//! Error types for board profiles

use crate::chip::Chip;
use crate::profile::PinRole;
use thiserror::Error;

/// Result type alias using `HwconfError`
pub type Result<T> = core::result::Result<T, HwconfError>;

/// A board profile that cannot be wired up on its target chip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HwconfError {
    /// Pin number does not exist on the chip
    #[error("{role} uses GPIO{pin}, which does not exist on {chip}")]
    InvalidGpio { chip: Chip, role: PinRole, pin: u8 },

    /// Pin is wired to the in-package flash
    #[error("{role} uses GPIO{pin}, which is reserved for flash on {chip}")]
    ReservedGpio { chip: Chip, role: PinRole, pin: u8 },

    /// Two functions share one pin
    #[error("GPIO{pin} is assigned to both {first} and {second}")]
    PinConflict {
        pin: u8,
        first: PinRole,
        second: PinRole,
    },

    /// UART peripheral index out of range
    #[error("{chip} has no UART{port}")]
    InvalidUartPort { chip: Chip, port: u8 },

    /// UART baud rate of zero
    #[error("UART baud rate must be non-zero")]
    InvalidBaudRate,

    /// `HW_UART_COMM` without a UART block
    #[error("UART communication enabled but no UART is configured")]
    UartCommWithoutUart,
}

/// Unknown target chip identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown target chip")]
pub struct UnknownChip;

/// Failure while running the hardware init hook
#[derive(Debug, Error)]
pub enum InitError<E> {
    /// The profile was rejected before the hook ran
    #[error("invalid board profile: {0}")]
    Invalid(HwconfError),

    /// The hook itself failed
    #[error("hw_init failed: {0}")]
    Hook(E),
}
