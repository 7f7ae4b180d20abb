//! Datastore path resolution.
//!
//! The datastore location comes from, in order: an explicit path (the
//! `--datastore` flag), the `DATASTORE` environment variable, or the default
//! `~/.sps/datastore.db`. Relative environment values live under `~/.sps/`.
//! For the last two sources the containing directory is created.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};

/// Environment variable holding a fallback datastore location.
pub const DATASTORE_ENV: &str = "DATASTORE";

/// Directory under the user's home holding sps state.
pub const HOME_DIR_NAME: &str = ".sps";

/// File name of the default datastore inside [`HOME_DIR_NAME`].
pub const DEFAULT_DATASTORE_FILE: &str = "datastore.db";

/// Resolves the datastore path from an explicit value, an environment value,
/// or the default location.
///
/// An explicit path is returned untouched and no directories are created.
/// Otherwise the parent directory of the resolved path is created
/// recursively before returning.
///
/// # Errors
///
/// Returns [`StoreError::HomeDirUnavailable`] if the home directory is needed
/// but cannot be found, or [`StoreError::IoError`] if directory creation fails.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use sps_sqlite::resolve_datastore_path;
///
/// let path = resolve_datastore_path(Some(Path::new("/tmp/shops.db")), None).unwrap();
/// assert_eq!(path, Path::new("/tmp/shops.db"));
/// ```
pub fn resolve_datastore_path(
    explicit: Option<&Path>,
    env_value: Option<&OsStr>,
) -> Result<PathBuf> {
    resolve_with_home(explicit, env_value, dirs::home_dir)
}

fn resolve_with_home(
    explicit: Option<&Path>,
    env_value: Option<&OsStr>,
    home_dir: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        debug!(path = %path.display(), "Using explicit datastore path");
        return Ok(path.to_path_buf());
    }

    let sps_home = || {
        home_dir()
            .map(|home| home.join(HOME_DIR_NAME))
            .ok_or(StoreError::HomeDirUnavailable)
    };

    let resolved = match env_value.filter(|value| !value.is_empty()) {
        Some(value) => {
            let path = Path::new(value);
            let resolved = if path.is_absolute() {
                path.to_path_buf()
            } else {
                sps_home()?.join(path)
            };
            debug!(path = %resolved.display(), "Using datastore path from environment");
            resolved
        }
        None => {
            let resolved = sps_home()?.join(DEFAULT_DATASTORE_FILE);
            debug!(path = %resolved.display(), "Using default datastore path");
            resolved
        }
    };

    if let Some(parent) = resolved.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(resolved)
}
