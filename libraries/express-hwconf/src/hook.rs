//! Hardware init hook
//!
//! Each firmware image implements [`HwInit`] once for its board. Startup code
//! calls [`init_board`], which refuses to touch the hardware when the profile
//! would drive an invalid or double-booked pin.

use crate::error::InitError;
use crate::profile::BoardProfile;

/// Board-specific hardware bring-up (`hw_init()`)
pub trait HwInit {
    /// Error reported by the board's bring-up code
    type Error;

    /// Configure the GPIOs and peripherals named in `profile`
    fn hw_init(&mut self, profile: &BoardProfile<'_>) -> Result<(), Self::Error>;
}

/// Validate `profile`, then run the init hook once
pub fn init_board<H: HwInit>(
    profile: &BoardProfile<'_>,
    hw: &mut H,
) -> Result<(), InitError<H::Error>> {
    profile.validate().map_err(InitError::Invalid)?;
    hw.hw_init(profile).map_err(InitError::Hook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boards::DEVKIT_C6;
    use crate::error::HwconfError;
    use crate::profile::CanPins;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
        fail: bool,
    }

    impl HwInit for Recorder {
        type Error = &'static str;

        fn hw_init(&mut self, profile: &BoardProfile<'_>) -> Result<(), Self::Error> {
            self.calls.push(profile.name.to_string());
            if self.fail {
                Err("transceiver not responding")
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_hook_runs_once() {
        let mut hw = Recorder::default();
        init_board(&DEVKIT_C6, &mut hw).unwrap();
        assert_eq!(hw.calls, vec!["Devkit C6"]);
    }

    #[test]
    fn test_invalid_profile_skips_hook() {
        let broken = BoardProfile {
            can: Some(CanPins { tx: 16, rx: 5 }),
            ..DEVKIT_C6
        };
        let mut hw = Recorder::default();
        let err = init_board(&broken, &mut hw).unwrap_err();
        assert!(matches!(
            err,
            InitError::Invalid(HwconfError::PinConflict { pin: 16, .. })
        ));
        assert!(hw.calls.is_empty());
    }

    #[test]
    fn test_hook_error_is_propagated() {
        let mut hw = Recorder {
            fail: true,
            ..Recorder::default()
        };
        let err = init_board(&DEVKIT_C6, &mut hw).unwrap_err();
        assert!(matches!(err, InitError::Hook("transceiver not responding")));
        assert_eq!(err.to_string(), "hw_init failed: transceiver not responding");
    }
}
