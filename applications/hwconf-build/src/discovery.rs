//! Board header discovery

use crate::error::{BuildError, Result};
use express_hwconf::header::{parse_defines, HW_NAME, HW_TARGET};
use express_hwconf::slugify;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A board header found on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HwConfig {
    /// `HW_NAME`
    pub name: String,

    /// `HW_TARGET`, as written in the header
    pub target: String,

    /// Header path
    pub file: PathBuf,
}

/// Whether `path` looks like a board header (`hw_*.h`)
pub fn is_board_header(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("hw_") && name.ends_with(".h"))
}

/// Find every board header below `dir`
///
/// Headers without both `HW_NAME` and `HW_TARGET` string defines are not
/// boards and are skipped, as are headers that cannot be read. The result is
/// sorted by target first, then name, so builds for one SoC run back to back.
pub fn discover(dir: &Path) -> Result<Vec<HwConfig>> {
    if !dir.is_dir() {
        return Err(BuildError::HwconfDirMissing(dir.to_path_buf()));
    }

    let mut configs = Vec::new();

    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let path = entry.path();
        if !entry.file_type().is_file() || !is_board_header(path) {
            continue;
        }

        match read_config(path) {
            Ok(Some(config)) => configs.push(config),
            Ok(None) => {
                tracing::debug!("{} has no HW_NAME/HW_TARGET, skipping", path.display());
            }
            Err(e) => {
                tracing::warn!("Error parsing {}: {}", path.display(), e);
            }
        }
    }

    configs.sort_by(|a, b| {
        (&a.target, &a.name, &a.file).cmp(&(&b.target, &b.name, &b.file))
    });

    Ok(configs)
}

/// Discovered boards as pretty JSON (`list --json`)
pub fn to_json(configs: &[HwConfig]) -> Result<String> {
    Ok(serde_json::to_string_pretty(configs)?)
}

fn read_config(path: &Path) -> Result<Option<HwConfig>> {
    let content = std::fs::read_to_string(path)?;
    let defines = parse_defines(&content);

    let (Some(name), Some(target)) = (defines.string(HW_NAME), defines.string(HW_TARGET)) else {
        return Ok(None);
    };
    if name.trim().is_empty() || target.trim().is_empty() {
        return Ok(None);
    }
    if !is_safe_dir_name(name) {
        return Err(BuildError::UnsafeBoardName(name.to_string()));
    }

    Ok(Some(HwConfig {
        name: name.to_string(),
        target: target.to_string(),
        file: path.to_path_buf(),
    }))
}

/// Whether `name` is a single plain path component
///
/// Board names become directories under the output dir, so separators and
/// `.`/`..` are refused.
pub fn is_safe_dir_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

fn name_matches(config: &HwConfig, wanted: &str) -> bool {
    let wanted = wanted.trim();
    config.name.eq_ignore_ascii_case(wanted) || slugify(&config.name) == slugify(wanted)
}

/// Narrow `configs` to the requested boards and target
///
/// An empty `boards` list keeps every board. Asking for a board that was not
/// discovered is an error rather than an empty build.
pub fn select(configs: &[HwConfig], boards: &[String], target: Option<&str>) -> Result<Vec<HwConfig>> {
    for wanted in boards {
        if !configs.iter().any(|c| name_matches(c, wanted)) {
            return Err(BuildError::UnknownBoard(wanted.clone()));
        }
    }

    Ok(configs
        .iter()
        .filter(|c| boards.is_empty() || boards.iter().any(|b| name_matches(c, b)))
        .filter(|c| target.is_none_or(|t| c.target.eq_ignore_ascii_case(t.trim())))
        .cloned()
        .collect())
}
