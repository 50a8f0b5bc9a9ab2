//! Build backends
//!
//! A backend turns one board into the commands that build its firmware and
//! the list of files worth keeping afterwards. Running the commands is the
//! [`CommandRunner`](crate::runner::CommandRunner)'s job.

use crate::config::{Backend as BackendKind, BuildConfig};
use crate::discovery::{is_safe_dir_name, HwConfig};
use crate::error::{BuildError, Result};
use express_hwconf::{slugify, Chip};
use std::fmt;
use std::path::{Path, PathBuf};

/// One external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Progress label, e.g. "Setting target"
    pub label: &'static str,
    pub program: String,
    pub args: Vec<String>,
    /// Working directory, current directory when `None`
    pub cwd: Option<PathBuf>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(cwd) = &self.cwd {
            write!(f, "(cd {}) ", quote(&cwd.display().to_string()))?;
        }
        f.write_str(&quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{}\"", s.replace('"', "\\\""))
    } else {
        s.to_string()
    }
}

/// Build output copied into the per-board output directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub source: PathBuf,
    /// Name inside the board's output directory
    pub file_name: String,
}

pub trait Backend {
    /// Commands to run, in order, for `board`
    fn steps(&self, board: &HwConfig) -> Result<Vec<Invocation>>;

    /// Files a successful build leaves behind
    fn artifacts(&self, board: &HwConfig) -> Vec<Artifact>;
}

/// Create the backend selected in `config`
pub fn from_config(config: &BuildConfig) -> Box<dyn Backend> {
    let toolchain = &config.toolchain;
    match toolchain.backend {
        BackendKind::Idf => Box::new(IdfBackend {
            command: toolchain.idf_command.clone(),
            build_dir: config.paths.build_dir.clone(),
            app_name: toolchain.app_name.clone(),
        }),
        BackendKind::Cargo => Box::new(CargoBackend {
            command: toolchain.cargo_command.clone(),
            firmware_dir: toolchain.firmware_dir.clone(),
            bin_name: toolchain.firmware_bin.clone(),
        }),
    }
}

/// ESP-IDF build of the C firmware
///
/// All boards share one build directory; `set-target` reconfigures it for
/// each board's SoC and `-DHW_NAME` selects the header.
#[derive(Debug, Clone)]
pub struct IdfBackend {
    pub command: String,
    pub build_dir: PathBuf,
    pub app_name: String,
}

impl IdfBackend {
    fn base_args(&self, board: &HwConfig) -> Vec<String> {
        vec![
            "-B".to_string(),
            self.build_dir.display().to_string(),
            format!("-DHW_NAME={}", board.name),
        ]
    }
}

impl Backend for IdfBackend {
    fn steps(&self, board: &HwConfig) -> Result<Vec<Invocation>> {
        let mut set_target = self.base_args(board);
        set_target.extend(["set-target".to_string(), board.target.clone()]);

        let mut build = self.base_args(board);
        build.push("build".to_string());

        Ok(vec![
            Invocation {
                label: "Setting target",
                program: self.command.clone(),
                args: set_target,
                cwd: None,
            },
            Invocation {
                label: "Building",
                program: self.command.clone(),
                args: build,
                cwd: None,
            },
        ])
    }

    fn artifacts(&self, _board: &HwConfig) -> Vec<Artifact> {
        let app_bin = format!("{}.bin", self.app_name);
        vec![
            Artifact {
                source: self.build_dir.join(&app_bin),
                file_name: app_bin,
            },
            Artifact {
                source: self.build_dir.join("bootloader").join("bootloader.bin"),
                file_name: "bootloader.bin".to_string(),
            },
            Artifact {
                source: self
                    .build_dir
                    .join("partition_table")
                    .join("partition-table.bin"),
                file_name: "partition_table.bin".to_string(),
            },
        ]
    }
}

/// Cargo build of the Rust firmware crate
///
/// The board is selected with the cargo feature named after the board's
/// slug (`devkit-s3`), the chip with the matching target triple.
#[derive(Debug, Clone)]
pub struct CargoBackend {
    pub command: String,
    pub firmware_dir: PathBuf,
    pub bin_name: String,
}

impl CargoBackend {
    fn chip(board: &HwConfig) -> Result<Chip> {
        board.target.parse().map_err(|_| BuildError::UnknownTarget {
            board: board.name.clone(),
            target: board.target.clone(),
        })
    }

    fn release_dir(&self, chip: Chip) -> PathBuf {
        self.firmware_dir
            .join("target")
            .join(chip.rust_target())
            .join("release")
    }
}

impl Backend for CargoBackend {
    fn steps(&self, board: &HwConfig) -> Result<Vec<Invocation>> {
        let chip = Self::chip(board)?;

        Ok(vec![Invocation {
            label: "Building",
            program: self.command.clone(),
            args: vec![
                "build".to_string(),
                "--release".to_string(),
                "--no-default-features".to_string(),
                "--features".to_string(),
                slugify(&board.name),
                "--target".to_string(),
                chip.rust_target().to_string(),
            ],
            cwd: Some(self.firmware_dir.clone()),
        }])
    }

    fn artifacts(&self, board: &HwConfig) -> Vec<Artifact> {
        let Ok(chip) = Self::chip(board) else {
            return Vec::new();
        };
        vec![Artifact {
            source: self.release_dir(chip).join(&self.bin_name),
            file_name: format!("{}.elf", self.bin_name),
        }]
    }
}

/// Directory a board's artifacts are copied to
///
/// Fails for names that would land outside `output_dir` or on it.
pub fn board_output_dir(output_dir: &Path, board: &HwConfig) -> Result<PathBuf> {
    if !is_safe_dir_name(&board.name) {
        return Err(BuildError::UnsafeBoardName(board.name.clone()));
    }
    Ok(output_dir.join(&board.name))
}
