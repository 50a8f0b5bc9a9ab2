//! Header validation against the chip and the built-in board table

use crate::discovery::HwConfig;
use express_hwconf::boards;
use express_hwconf::header::parse_defines;
use express_hwconf::{BoardProfile, CanPins, UartConfig};
use std::path::PathBuf;

/// Result of checking one header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
    pub name: String,
    pub file: PathBuf,
    /// Why the header is unusable
    pub error: Option<String>,
    /// Strapping pin notices
    pub warnings: Vec<String>,
    /// Differences from the built-in board of the same name
    pub drift: Vec<String>,
}

impl HeaderCheck {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Parse and validate one discovered header
pub fn check_header(config: &HwConfig) -> HeaderCheck {
    let mut check = HeaderCheck {
        name: config.name.clone(),
        file: config.file.clone(),
        error: None,
        warnings: Vec::new(),
        drift: Vec::new(),
    };

    let content = match std::fs::read_to_string(&config.file) {
        Ok(content) => content,
        Err(e) => {
            check.error = Some(e.to_string());
            return check;
        }
    };

    let defines = parse_defines(&content);
    let profile = match defines.board_profile() {
        Ok(profile) => profile,
        Err(e) => {
            check.error = Some(e.to_string());
            return check;
        }
    };

    check.warnings = profile
        .strapping_pins()
        .map(|(role, pin)| {
            format!(
                "{role} uses GPIO{pin}, a strapping pin on {}",
                profile.target
            )
        })
        .collect();

    if let Some(table) = boards::find(profile.name).filter(|b| b.name == profile.name) {
        check.drift = drift(&profile, table);
    }

    check
}

/// Check every header
pub fn check_all(configs: &[HwConfig]) -> Vec<HeaderCheck> {
    configs.iter().map(check_header).collect()
}

/// Whether `check` passes: no header is invalid
pub fn all_valid(results: &[HeaderCheck]) -> bool {
    results.iter().all(HeaderCheck::is_valid)
}

/// Built-in boards with no header among `configs`
pub fn boards_without_header(configs: &[HwConfig]) -> Vec<&'static str> {
    boards::ALL
        .iter()
        .filter(|board| !configs.iter().any(|c| c.name == board.name))
        .map(|board| board.name)
        .collect()
}

fn drift(header: &BoardProfile<'_>, table: &BoardProfile<'_>) -> Vec<String> {
    let mut diffs = Vec::new();

    if header.target != table.target {
        diffs.push(format!(
            "target: header {}, table {}",
            header.target, table.target
        ));
    }
    if header.uart_comm != table.uart_comm {
        diffs.push(format!(
            "HW_UART_COMM: header {}, table {}",
            header.uart_comm, table.uart_comm
        ));
    }
    if header.can != table.can {
        diffs.push(format!(
            "CAN: header {}, table {}",
            describe_can(header.can),
            describe_can(table.can)
        ));
    }
    if header.uart != table.uart {
        diffs.push(format!(
            "UART: header {}, table {}",
            describe_uart(header.uart),
            describe_uart(table.uart)
        ));
    }

    diffs
}

fn describe_can(can: Option<CanPins>) -> String {
    match can {
        Some(can) => format!("tx={} rx={}", can.tx, can.rx),
        None => "none".to_string(),
    }
}

fn describe_uart(uart: Option<UartConfig>) -> String {
    match uart {
        Some(uart) => format!(
            "UART{} {} baud tx={} rx={}",
            uart.port, uart.baud_rate, uart.tx, uart.rx
        ),
        None => "none".to_string(),
    }
}
