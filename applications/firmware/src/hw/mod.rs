//! Board bring-up
//!
//! [`BoardInit`] is the firmware's `hw_init()`: it owns the peripherals the
//! board profile names and hands back configured drivers once the hook ran.

use esp_hal::{
    peripherals::{TWAI0, UART0},
    twai::{Twai, TwaiConfiguration, TwaiMode},
    uart::{config::Config as UartConfig, Uart},
    Async, Blocking,
};
use express_hwconf::{BoardProfile, HwInit};
use log::info;

use crate::config;

#[cfg(feature = "devkit-c6")]
#[path = "pins_devkit_c6.rs"]
mod pins;

#[cfg(feature = "devkit-s3")]
#[path = "pins_devkit_s3.rs"]
mod pins;

pub use pins::BoardPins;

pub type CanBus = Twai<'static, TWAI0, Async>;
pub type CommUart = Uart<'static, UART0, Blocking>;

/// Errors from the board init hook
#[derive(Debug, thiserror::Error)]
pub enum HwError {
    #[error("peripherals already taken")]
    AlreadyInitialized,

    #[error("UART{0} is not wired on this board")]
    UnsupportedUart(u8),

    #[error("UART configuration rejected: {0:?}")]
    Uart(esp_hal::uart::Error),
}

/// Peripherals in, drivers out
pub struct BoardInit {
    parts: Option<(TWAI0, UART0, BoardPins)>,
    pub can: Option<CanBus>,
    pub comm: Option<CommUart>,
}

impl BoardInit {
    pub fn new(twai: TWAI0, uart: UART0, pins: BoardPins) -> Self {
        Self {
            parts: Some((twai, uart, pins)),
            can: None,
            comm: None,
        }
    }
}

impl HwInit for BoardInit {
    type Error = HwError;

    fn hw_init(&mut self, profile: &BoardProfile<'_>) -> Result<(), Self::Error> {
        let (twai, uart, pins) = self.parts.take().ok_or(HwError::AlreadyInitialized)?;

        if let Some(can) = profile.can {
            let bus = TwaiConfiguration::new_async(
                twai,
                pins.can_rx,
                pins.can_tx,
                config::can::BAUDRATE,
                TwaiMode::Normal,
            )
            .start();
            info!("CAN up on tx=GPIO{} rx=GPIO{}", can.tx, can.rx);
            self.can = Some(bus);
        }

        if let Some(params) = profile.uart {
            if params.port != 0 {
                return Err(HwError::UnsupportedUart(params.port));
            }
            let uart_config = UartConfig::default().baudrate(params.baud_rate);
            let comm = Uart::new_with_config(uart, uart_config, pins.uart_tx, pins.uart_rx)
                .map_err(HwError::Uart)?;
            info!(
                "UART{} up at {} baud on tx=GPIO{} rx=GPIO{}",
                params.port, params.baud_rate, params.tx, params.rx
            );
            self.comm = Some(comm);
        }

        Ok(())
    }
}
