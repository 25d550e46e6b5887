//! Delegation to the cached executable
//!
//! The child inherits stdin, stdout, stderr and the environment. The caller
//! maps the returned [`Termination`] onto its own exit code.

use arcshim_core::layout;
use arcshim_core::platform::PlatformArch;
use std::ffi::OsStr;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use thiserror::Error;

/// Exit code used when the executable could not be started
pub const SPAWN_FAILED_EXIT_CODE: i32 = 127;

/// How the child process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    Exited(i32),
    /// Killed by a signal (Unix only)
    Signaled(i32),
}

impl Termination {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signaled(signal);
            }
        }

        // No code and no signal; treat as a generic failure
        Termination::Exited(1)
    }

    /// Exit code to propagate; signals map to `128 + signal` like a shell
    pub fn exit_code(self) -> i32 {
        match self {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) => 128 + signal,
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Exited(code) => write!(f, "exited with code {}", code),
            Termination::Signaled(signal) => write!(f, "killed by signal {}", signal),
        }
    }
}

#[derive(Debug, Error)]
pub enum SpawnError {
    #[error("Failed to start arcbranch binary at {}: {source}", path.display())]
    Start {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed waiting for arcbranch binary at {}: {source}", path.display())]
    Wait {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Runs `executable` with `args` and waits for it to finish
///
/// Arguments are passed through verbatim, in order.
pub fn launch<I, S>(executable: &Path, args: I) -> Result<Termination, SpawnError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    log::debug!("Spawning {}", executable.display());

    let mut child = Command::new(executable)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|e| SpawnError::Start {
            path: executable.to_path_buf(),
            source: e,
        })?;

    let status = child.wait().map_err(|e| SpawnError::Wait {
        path: executable.to_path_buf(),
        source: e,
    })?;

    let termination = Termination::from_status(status);
    log::debug!("arcbranch {}", termination);
    Ok(termination)
}

/// Runs the executable cached for `platform` under `install_root`
pub fn launch_installed<I, S>(
    install_root: &Path,
    platform: &PlatformArch,
    args: I,
) -> Result<Termination, SpawnError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    launch(&layout::executable_path(install_root, platform), args)
}
