//! Multi-board build driver

use crate::backend::{board_output_dir, Backend};
use crate::discovery::HwConfig;
use crate::error::Result;
use crate::report::BuildSummary;
use crate::runner::CommandRunner;
use std::fs;
use std::path::{Path, PathBuf};

/// Builds boards one after another and collects their artifacts
///
/// A board fails at its first failing step; the remaining boards still
/// build. Artifact copy problems are logged but never fail a board.
pub struct Builder<'a, R> {
    backend: &'a dyn Backend,
    runner: R,
    output_dir: PathBuf,
}

impl<'a, R: CommandRunner> Builder<'a, R> {
    pub fn new(backend: &'a dyn Backend, runner: R, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            backend,
            runner,
            output_dir: output_dir.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build every board in order
    pub fn build_all(&mut self, boards: &[HwConfig]) -> Result<BuildSummary> {
        if self.runner.executes() && !self.output_dir.exists() {
            fs::create_dir_all(&self.output_dir)?;
            tracing::info!("Created output directory: {}", self.output_dir.display());
        }

        tracing::info!("Found {} hardware configurations.", boards.len());

        let mut summary = BuildSummary {
            output_dir: std::path::absolute(&self.output_dir)
                .unwrap_or_else(|_| self.output_dir.clone()),
            ..BuildSummary::default()
        };

        for board in boards {
            if self.build_board(board) {
                summary.succeeded.push(board.name.clone());
            } else {
                summary.failed.push(board.name.clone());
            }
        }

        Ok(summary)
    }

    /// Build one board; true on success
    pub fn build_board(&mut self, board: &HwConfig) -> bool {
        tracing::info!("========================================");
        tracing::info!("Building: {} ({})", board.name, board.target);
        tracing::info!("Config: {}", board.file.display());
        tracing::info!("========================================");

        let target_dir = match board_output_dir(&self.output_dir, board) {
            Ok(dir) => dir,
            Err(e) => {
                tracing::error!("FAILED: {}", e);
                return false;
            }
        };

        let steps = match self.backend.steps(board) {
            Ok(steps) => steps,
            Err(e) => {
                tracing::error!("FAILED: {}: {}", board.name, e);
                return false;
            }
        };

        for step in &steps {
            tracing::info!("--> {}...", step.label);
            match self.runner.run(step) {
                Ok(true) => {}
                Ok(false) => {
                    tracing::error!("FAILED: {}", board.name);
                    return false;
                }
                Err(e) => {
                    tracing::error!(
                        "FAILED: {}: could not run {}: {}",
                        board.name,
                        step.program,
                        e
                    );
                    return false;
                }
            }
        }

        tracing::info!("SUCCESS: {}", board.name);

        if self.runner.executes() {
            self.copy_artifacts(board, &target_dir);
        }

        true
    }

    fn copy_artifacts(&self, board: &HwConfig, target_dir: &Path) {
        if let Err(e) = fs::create_dir_all(target_dir) {
            tracing::warn!("Failed to copy artifacts: {}", e);
            return;
        }

        for artifact in self.backend.artifacts(board) {
            if !artifact.source.exists() {
                tracing::debug!("{} not produced, skipping", artifact.source.display());
                continue;
            }

            let dest = target_dir.join(&artifact.file_name);
            match fs::copy(&artifact.source, &dest) {
                Ok(_) => {
                    tracing::info!(
                        "--> Copied {} to {}",
                        artifact.file_name,
                        target_dir.display()
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to copy {}: {}",
                        artifact.source.display(),
                        e
                    );
                }
            }
        }
    }
}
