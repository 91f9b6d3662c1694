//! Compare-and-replace of the managed rsyslog config file.
//!
//! A changed file is moved to its backup path before the new contents land,
//! so the backup always holds the generation immediately before the current
//! one. Older generations are overwritten.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::error::LogglyError;

/// State of the config file relative to freshly rendered contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfState {
    Absent,
    Unchanged,
    Changed,
}

/// What [`write_conf`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Unchanged,
    Replaced { backup: PathBuf },
}

/// Compare the bytes at `path` with `contents`.
pub fn inspect(path: &Path, contents: &str) -> Result<ConfState, LogglyError> {
    match fs::read(path) {
        Ok(existing) if existing == contents.as_bytes() => Ok(ConfState::Unchanged),
        Ok(_) => Ok(ConfState::Changed),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ConfState::Absent),
        Err(e) => Err(LogglyError::io("read", path, e)),
    }
}

/// Write `contents` to `path`, backing up a differing file to `backup`.
pub fn write_conf(path: &Path, backup: &Path, contents: &str) -> Result<WriteOutcome, LogglyError> {
    let outcome = match inspect(path, contents)? {
        ConfState::Unchanged => {
            info!("Loggly rsyslog file {} is already up to date.", path.display());
            return Ok(WriteOutcome::Unchanged);
        }
        ConfState::Absent => WriteOutcome::Created,
        ConfState::Changed => {
            info!("Loggly rsyslog file {} already exists.", path.display());
            warn!("Loggly rsyslog file {} content has changed.", path.display());
            info!(
                "Backing up the conf file {} to {}",
                path.display(),
                backup.display()
            );
            fs::rename(path, backup).map_err(|e| LogglyError::io("back up", path, e))?;
            WriteOutcome::Replaced {
                backup: backup.to_path_buf(),
            }
        }
    };

    write_file_atomic(path, contents)?;
    set_conf_permissions(path)?;
    info!("Loggly rsyslog file {} written.", path.display());
    Ok(outcome)
}

/// Delete the config file. Returns `false` when there was nothing to delete.
pub fn remove_conf(path: &Path) -> Result<bool, LogglyError> {
    match fs::remove_file(path) {
        Ok(()) => {
            info!("Removed Loggly rsyslog file {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("Loggly rsyslog file {} not present, nothing to remove.", path.display());
            Ok(false)
        }
        Err(e) => Err(LogglyError::io("remove", path, e)),
    }
}

/// `<file name>.tmp` next to `path`, so no unrelated sibling is clobbered
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write the whole file through a sibling temp file and rename it into place
fn write_file_atomic(path: &Path, content: &str) -> Result<(), LogglyError> {
    let temp_path = temp_path_for(path);

    {
        let mut file =
            fs::File::create(&temp_path).map_err(|e| LogglyError::io("create", &temp_path, e))?;

        file.write_all(content.as_bytes())
            .map_err(|e| LogglyError::io("write", &temp_path, e))?;

        file.sync_all()
            .map_err(|e| LogglyError::io("sync", &temp_path, e))?;
    }

    fs::rename(&temp_path, path).map_err(|e| LogglyError::io("rename temp file to", path, e))?;

    Ok(())
}

#[cfg(unix)]
fn set_conf_permissions(path: &Path) -> Result<(), LogglyError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644))
        .map_err(|e| LogglyError::io("set permissions on", path, e))
}

#[cfg(not(unix))]
fn set_conf_permissions(_path: &Path) -> Result<(), LogglyError> {
    Ok(())
}
