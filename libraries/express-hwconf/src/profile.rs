//! Board profile data model and validation

use crate::chip::Chip;
use crate::error::{HwconfError, Result};
use core::fmt;

/// GPIO lines wired to the CAN transceiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanPins {
    /// `CAN_TX_GPIO_NUM`
    pub tx: u8,
    /// `CAN_RX_GPIO_NUM`
    pub rx: u8,
}

/// Communication UART settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UartConfig {
    /// Peripheral index (`UART_NUM`)
    pub port: u8,
    /// `UART_BAUDRATE`
    pub baud_rate: u32,
    /// `UART_TX`
    pub tx: u8,
    /// `UART_RX`
    pub rx: u8,
}

/// Function a GPIO is assigned to in a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PinRole {
    /// CAN transmit line
    CanTx,
    /// CAN receive line
    CanRx,
    /// UART transmit line
    UartTx,
    /// UART receive line
    UartRx,
}

impl PinRole {
    /// Header macro carrying this pin
    pub const fn define_name(self) -> &'static str {
        match self {
            PinRole::CanTx => "CAN_TX_GPIO_NUM",
            PinRole::CanRx => "CAN_RX_GPIO_NUM",
            PinRole::UartTx => "UART_TX",
            PinRole::UartRx => "UART_RX",
        }
    }
}

impl fmt::Display for PinRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.define_name())
    }
}

/// Hardware description of one board variant
///
/// Table entries are `BoardProfile<'static>`; profiles read from a header
/// borrow their name from the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BoardProfile<'a> {
    /// Human-readable board name (`HW_NAME`)
    pub name: &'a str,
    /// Target chip (`HW_TARGET`)
    pub target: Chip,
    /// UART carries the communication link (`HW_UART_COMM`)
    pub uart_comm: bool,
    /// CAN transceiver pins, if the board has one
    pub can: Option<CanPins>,
    /// Communication UART, if the board has one
    pub uart: Option<UartConfig>,
}

impl BoardProfile<'_> {
    const fn pin_slots(&self) -> [Option<(PinRole, u8)>; 4] {
        let mut slots = [None; 4];
        if let Some(can) = self.can {
            slots[0] = Some((PinRole::CanTx, can.tx));
            slots[1] = Some((PinRole::CanRx, can.rx));
        }
        if let Some(uart) = self.uart {
            slots[2] = Some((PinRole::UartTx, uart.tx));
            slots[3] = Some((PinRole::UartRx, uart.rx));
        }
        slots
    }

    /// Every assigned GPIO, CAN first, then UART
    pub fn pins(&self) -> impl Iterator<Item = (PinRole, u8)> {
        self.pin_slots().into_iter().flatten()
    }

    /// Assigned pins that are also boot strapping pins
    ///
    /// These work once the chip has booted, but an external transceiver
    /// holding the line at reset can change the boot mode.
    pub fn strapping_pins(&self) -> impl Iterator<Item = (PinRole, u8)> {
        let target = self.target;
        self.pins()
            .filter(move |&(_, pin)| target.is_strapping_gpio(pin))
    }

    /// Check that every pin exists, is usable and is used once
    pub const fn validate(&self) -> Result<()> {
        let slots = self.pin_slots();
        let chip = self.target;

        let mut i = 0;
        while i < slots.len() {
            if let Some((role, pin)) = slots[i] {
                if !chip.is_valid_gpio(pin) {
                    return Err(HwconfError::InvalidGpio { chip, role, pin });
                }
                if chip.is_reserved_gpio(pin) {
                    return Err(HwconfError::ReservedGpio { chip, role, pin });
                }

                let mut j = i + 1;
                while j < slots.len() {
                    if let Some((second, other)) = slots[j] {
                        if other == pin {
                            return Err(HwconfError::PinConflict {
                                pin,
                                first: role,
                                second,
                            });
                        }
                    }
                    j += 1;
                }
            }
            i += 1;
        }

        match self.uart {
            Some(uart) => {
                if uart.port >= chip.uart_count() {
                    return Err(HwconfError::InvalidUartPort {
                        chip,
                        port: uart.port,
                    });
                }
                if uart.baud_rate == 0 {
                    return Err(HwconfError::InvalidBaudRate);
                }
            }
            None => {
                if self.uart_comm {
                    return Err(HwconfError::UartCommWithoutUart);
                }
            }
        }

        Ok(())
    }

    /// Identifier form of the name: lowercase, separators collapsed to `-`
    ///
    /// `"DevKit S3"` becomes `"devkit-s3"`. Used as the firmware feature name.
    #[cfg(feature = "std")]
    pub fn slug(&self) -> String {
        slugify(self.name)
    }
}

/// Slug form of a board name, see [`BoardProfile::slug`]
#[cfg(feature = "std")]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}
