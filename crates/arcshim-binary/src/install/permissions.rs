//! Executable permission normalization

use std::fs;
use std::io;
use std::path::Path;

/// Mode given to the installed executable (rwxr-xr-x)
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Sets the executable to [`EXECUTABLE_MODE`] on Unix
///
/// Archives do not reliably carry the execute bit (zip files built on
/// Windows never do), so the mode is set unconditionally.
#[cfg(unix)]
pub fn normalize_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(EXECUTABLE_MODE))
}

/// No execute bit on this platform; only checks the file exists
#[cfg(not(unix))]
pub fn normalize_permissions(path: &Path) -> io::Result<()> {
    fs::metadata(path).map(|_| ())
}
