//! Privilege pre-check for writing under the rsyslog config directory.

use std::path::Path;

use log::warn;
use nix::unistd::{AccessFlags, access, getuid};

/// Whether the current process can create files in `dir`.
pub fn can_write(dir: &Path) -> bool {
    getuid().is_root() || access(dir, AccessFlags::W_OK).is_ok()
}

/// Warn when the run is unlikely to be able to modify `dir`.
///
/// Never fatal: the filesystem call that follows reports the real failure.
pub fn check_privileges(dir: &Path) -> bool {
    let ok = can_write(dir);
    if !ok {
        warn!(
            "Not running as root and {} is not writable; the rsyslog configuration cannot be changed.",
            dir.display()
        );
    }
    ok
}
