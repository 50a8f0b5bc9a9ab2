//! Build summary

use std::fmt;
use std::path::PathBuf;

/// Outcome of building a set of boards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<String>,
    /// Where artifacts were collected
    pub output_dir: PathBuf,
}

impl BuildSummary {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    /// True when no board failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for BuildSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "=".repeat(40))?;
        writeln!(
            f,
            "Build Summary: {}/{} Succeeded",
            self.succeeded.len(),
            self.total()
        )?;
        write!(f, "Artifacts: {}", self.output_dir.display())?;
        if !self.failed.is_empty() {
            write!(f, "\nFailed: {}", self.failed.join(", "))?;
        }
        Ok(())
    }
}
