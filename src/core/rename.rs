//! Case-safe renaming.
//!
//! Case-insensitive filesystems (NTFS, default APFS) treat `Datasets` and
//! `datasets` as the same entry, so a direct rename between them is either
//! rejected or silently ignored. Every rename here goes through an intermediate
//! `<old>_temp_rename` name instead.

use crate::core::error::{RelayoutError, fs_err};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const TEMP_SUFFIX: &str = "_temp_rename";

/// A rename that was actually carried out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renamed {
    /// The on-disk path before the rename, in its real casing.
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Locate the entry in `old`'s parent whose name matches `old`'s basename
/// case-insensitively. An exact match wins over other case variants.
pub fn find_actual_entry(old: &Path) -> Result<Option<OsString>, RelayoutError> {
    let Some(base) = old.file_name() else {
        return Ok(None);
    };
    let parent = match old.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Ok(None);
    }

    let wanted = base.to_string_lossy().to_lowercase();
    let mut candidates = Vec::new();
    for entry in fs::read_dir(parent).map_err(fs_err("list", parent))? {
        let entry = entry.map_err(fs_err("list", parent))?;
        let name = entry.file_name();
        if name.as_os_str() == base {
            return Ok(Some(name));
        }
        if name.to_string_lossy().to_lowercase() == wanted {
            candidates.push(name);
        }
    }
    // read_dir order is platform dependent
    candidates.sort();
    Ok(candidates.into_iter().next())
}

/// Rename `old` to `new`, where the two differ only in letter case.
///
/// Returns `Ok(None)` without touching the filesystem when no entry matches
/// `old` or when the entry already carries `new`'s exact name.
pub fn safe_rename(old: &Path, new: &Path) -> Result<Option<Renamed>, RelayoutError> {
    let Some(actual_name) = find_actual_entry(old)? else {
        return Ok(None);
    };
    let Some(target_name) = new.file_name() else {
        return Err(RelayoutError::PathError(format!(
            "rename target has no file name: {}",
            new.display()
        )));
    };
    if actual_name.as_os_str() == target_name {
        return Ok(None);
    }

    let actual = old.with_file_name(&actual_name);
    let mut temp = old.as_os_str().to_os_string();
    temp.push(TEMP_SUFFIX);
    let temp = PathBuf::from(temp);

    // Left behind by an interrupted earlier run.
    if let Ok(meta) = fs::symlink_metadata(&temp) {
        if meta.is_dir() {
            fs::remove_dir_all(&temp).map_err(fs_err("remove", &temp))?;
        } else {
            fs::remove_file(&temp).map_err(fs_err("remove", &temp))?;
        }
    }

    fs::rename(&actual, &temp).map_err(fs_err("rename", &actual))?;
    fs::rename(&temp, new).map_err(fs_err("rename", &temp))?;

    Ok(Some(Renamed {
        from: actual,
        to: new.to_path_buf(),
    }))
}
