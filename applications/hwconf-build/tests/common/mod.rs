//! Common test utilities and fixtures
#![allow(dead_code)]

use hwconf_build::{CommandRunner, HwConfig, Invocation};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Checked-in hwconf tree: two devkits, one invalid board, one non-board header
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("hwconf")
}

/// Write `content` to `dir/relative`, creating parent directories
pub fn write_file(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Minimal board header
pub fn board_header(name: &str, target: &str) -> String {
    format!("#define HW_NAME \"{name}\"\n#define HW_TARGET \"{target}\"\n")
}

pub fn board(name: &str, target: &str) -> HwConfig {
    HwConfig {
        name: name.to_string(),
        target: target.to_string(),
        file: PathBuf::from(format!("main/hwconf/hw_{}.h", name.to_lowercase())),
    }
}

/// Records invocations instead of spawning processes
#[derive(Default)]
pub struct RecordingRunner {
    pub calls: Vec<Invocation>,
    /// Invocations whose rendered command line contains this fail
    pub fail_when: Option<String>,
    /// Invocations whose rendered command line contains this cannot spawn
    pub missing_when: Option<String>,
    /// Files created after every successful invocation
    pub outputs: Vec<PathBuf>,
}

impl CommandRunner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> io::Result<bool> {
        self.calls.push(invocation.clone());
        let line = invocation.to_string();

        if self.missing_when.as_ref().is_some_and(|m| line.contains(m)) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "program not found"));
        }
        if self.fail_when.as_ref().is_some_and(|m| line.contains(m)) {
            return Ok(false);
        }

        for output in &self.outputs {
            fs::create_dir_all(output.parent().unwrap())?;
            fs::write(output, line.as_bytes())?;
        }
        Ok(true)
    }
}
