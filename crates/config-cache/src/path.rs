//! Directory path normalization

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Make `path` absolute against the current directory and fold `.` and `..`
/// components lexically. The path does not need to exist.
pub fn absolute(path: &Path) -> Result<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map_err(|e| Error::io(path, e))?
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    Ok(dunce::simplified(&normalized).to_path_buf())
}
