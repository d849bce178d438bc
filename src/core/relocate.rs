//! Asset relocation out of the legacy container directory.

use crate::core::error::{RelayoutError, fs_err};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocated {
    pub from: PathBuf,
    pub to: PathBuf,
    /// A pre-existing destination was deleted to make room.
    pub replaced: bool,
}

/// Delete whatever sits at `path`, directory or not. Missing is fine.
pub fn remove_entry(path: &Path) -> Result<bool, RelayoutError> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(fs_err("inspect", path)(e)),
    };
    if meta.is_dir() {
        fs::remove_dir_all(path).map_err(fs_err("remove", path))?;
    } else {
        fs::remove_file(path).map_err(fs_err("remove", path))?;
    }
    Ok(true)
}

/// Move `from` to `to`, replacing anything already at `to`. Last write wins,
/// there is no merge.
pub fn relocate(from: &Path, to: &Path) -> Result<Option<Relocated>, RelayoutError> {
    if !from.exists() {
        return Ok(None);
    }
    let replaced = remove_entry(to)?;
    fs::rename(from, to).map_err(fs_err("move", from))?;
    Ok(Some(Relocated {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        replaced,
    }))
}

/// Remove the container if it is now empty. Every failure is swallowed.
pub fn remove_container(container: &Path) -> bool {
    fs::remove_dir(container).is_ok()
}
