/// Build tool configuration
use crate::error::{BuildError, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, read from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "hwconf-build.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BuildConfig {
    #[serde(default)]
    pub paths: PathSettings,

    #[serde(default)]
    pub toolchain: ToolchainSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathSettings {
    #[serde(default = "default_hwconf_dir")]
    pub hwconf_dir: PathBuf,

    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ToolchainSettings {
    #[serde(default)]
    pub backend: Backend,

    /// ESP-IDF front end
    #[serde(default = "default_idf_command")]
    pub idf_command: String,

    /// ESP-IDF project name, names the application image
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default = "default_cargo_command")]
    pub cargo_command: String,

    /// Rust firmware crate built by the cargo backend
    #[serde(default = "default_firmware_dir")]
    pub firmware_dir: PathBuf,

    #[serde(default = "default_firmware_bin")]
    pub firmware_bin: String,
}

/// How firmware images are built
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// `idf.py set-target` + `idf.py build`
    #[default]
    Idf,
    /// `cargo build` of the Rust firmware crate
    Cargo,
}

fn default_hwconf_dir() -> PathBuf {
    PathBuf::from("main/hwconf")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build_output")
}

fn default_idf_command() -> String {
    "idf.py".to_string()
}

fn default_app_name() -> String {
    "vesc_express".to_string()
}

fn default_cargo_command() -> String {
    "cargo".to_string()
}

fn default_firmware_dir() -> PathBuf {
    PathBuf::from("applications/firmware")
}

fn default_firmware_bin() -> String {
    "express-firmware".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            hwconf_dir: default_hwconf_dir(),
            build_dir: default_build_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            idf_command: default_idf_command(),
            app_name: default_app_name(),
            cargo_command: default_cargo_command(),
            firmware_dir: default_firmware_dir(),
            firmware_bin: default_firmware_bin(),
        }
    }
}

impl BuildConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `hwconf-build.toml` is used
    /// when present. `HWCONF_<SECTION>__<KEY>` variables override both, e.g.
    /// `HWCONF_PATHS__OUTPUT_DIR=dist`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(BuildError::Config(format!(
                        "config file {} not found",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("HWCONF")
                .prefix_separator("_")
                .separator("__"),
        );

        let config = settings.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("toolchain.idf_command", self.toolchain.idf_command.as_str()),
            ("toolchain.app_name", self.toolchain.app_name.as_str()),
            ("toolchain.cargo_command", self.toolchain.cargo_command.as_str()),
            ("toolchain.firmware_bin", self.toolchain.firmware_bin.as_str()),
        ];
        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(BuildError::Config(format!("{key} must not be empty")));
            }
        }

        if self.paths.output_dir.as_os_str().is_empty() {
            return Err(BuildError::Config(
                "paths.output_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
