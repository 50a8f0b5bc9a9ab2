//! VESC Express board build tool
//!
//! Finds every `hw_*.h` board header, checks it, and builds one firmware
//! image per board, collecting the images under `build_output/<board>/`.
//!
//! # Architecture
//!
//! - **Discovery**: `discover` walks the hwconf directory and sorts boards by
//!   target then name
//! - **Backends**: `IdfBackend` (ESP-IDF) and `CargoBackend` (Rust firmware)
//!   turn a board into commands and expected artifacts
//! - **Runners**: `SystemRunner` executes commands, `DryRunner` prints them
//! - **Builder**: drives backend + runner over all boards into a
//!   `BuildSummary`
//! - **Render**: writes `hw_<board>.h` for the built-in boards

pub mod backend;
pub mod builder;
pub mod check;
pub mod config;
pub mod discovery;
pub mod error;
pub mod render;
pub mod report;
pub mod runner;

pub use backend::{Artifact, Backend, CargoBackend, IdfBackend, Invocation};
pub use builder::Builder;
pub use config::BuildConfig;
pub use discovery::{discover, select, to_json, HwConfig};
pub use error::{BuildError, Result};
pub use report::BuildSummary;
pub use runner::{CommandRunner, DryRunner, SystemRunner};
