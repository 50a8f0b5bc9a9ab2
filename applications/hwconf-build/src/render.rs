//! Header output for the built-in boards

use crate::error::{BuildError, Result};
use express_hwconf::boards;
use express_hwconf::header::{header_file_name, render_header};
use std::fs;
use std::path::{Path, PathBuf};

/// File name and text of the header for a built-in board
pub fn render_board(name: &str) -> Result<(String, String)> {
    let board = boards::find(name).ok_or_else(|| BuildError::UnknownBoard(name.to_string()))?;
    Ok((header_file_name(board), render_header(board)))
}

/// Write a built-in board's header into `dir`, creating it if needed
pub fn write_board_header(name: &str, dir: &Path) -> Result<PathBuf> {
    let (file_name, text) = render_board(name)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    fs::write(&path, text)?;
    Ok(path)
}
