//! Filesystem helpers for the config files
//!

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{AUTOCOMMIT, CONFIG_DIR};
use crate::error::AutoCommitError;

/// `$HOME/.config/autocommit`
pub fn config_dir() -> Result<PathBuf, AutoCommitError> {
    match dirs::home_dir() {
        Some(home_dir) => Ok(home_dir.join(CONFIG_DIR).join(AUTOCOMMIT)),
        None => Err(AutoCommitError::home_dir_not_found()),
    }
}

pub fn read_from_path(path: impl AsRef<Path>) -> Result<String, AutoCommitError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => Ok(contents),
        Err(err) => {
            log::debug!("could not read {path:?}: {err}");
            Err(AutoCommitError::basic_str(format!(
                "Could not read file {}",
                path.display()
            )))
        }
    }
}

pub fn write_to_path(
    path: impl AsRef<Path>,
    value: impl AsRef<str>,
) -> Result<(), AutoCommitError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, value.as_ref())?;
    Ok(())
}
