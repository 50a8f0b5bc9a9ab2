//! Firmware configuration
//!
//! Board wiring lives in `express_hwconf::boards`; this module holds the
//! settings that are the same on every board.

// ============================================================================
// CAN bus
// ============================================================================

/// CAN bus settings
pub mod can {
    use esp_hal::twai::BaudRate;

    /// Bus bit rate; VESC controllers default to 500 kbit/s
    pub const BAUDRATE: BaudRate = BaudRate::B500K;
}

// ============================================================================
// System
// ============================================================================

/// System configuration
pub mod system {
    /// Interval of the "alive" log line (seconds)
    pub const HEARTBEAT_SECS: u64 = 10;

    /// Poll interval of the comm UART receive buffer (milliseconds)
    pub const UART_POLL_MS: u64 = 10;
}
