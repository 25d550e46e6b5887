//! Platform resolution
//!
//! Maps the raw operating-system and CPU-architecture identifiers of a host to
//! the canonical labels used in published release artifact names.
//!
//! Raw identifiers follow the `os.platform()` / `os.arch()` vocabulary of the
//! npm package that ships the launcher (`darwin`, `win32`, `x64`, `ia32`, ...).
//! They name the local cache directory, so they must stay stable across
//! releases. Canonical labels (`Darwin`, `x86_64`, ...) only appear in remote
//! artifact names.
//!
//! Unknown identifiers are never rejected: they pass through verbatim so the
//! launcher keeps working on platforms nobody anticipated.

use std::fmt;

/// Canonical operating-system label used by release artifacts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalOs {
    Darwin,
    Linux,
    Windows,
    /// Unmapped raw identifier, kept verbatim
    Other(String),
}

impl CanonicalOs {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "darwin" => CanonicalOs::Darwin,
            "linux" => CanonicalOs::Linux,
            "win32" => CanonicalOs::Windows,
            other => CanonicalOs::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CanonicalOs::Darwin => "Darwin",
            CanonicalOs::Linux => "Linux",
            CanonicalOs::Windows => "Windows",
            CanonicalOs::Other(raw) => raw,
        }
    }
}

impl fmt::Display for CanonicalOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Canonical CPU-architecture label used by release artifacts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalArch {
    X86_64,
    I386,
    Arm64,
    /// Unmapped raw identifier, kept verbatim
    Other(String),
}

impl CanonicalArch {
    pub fn from_raw(raw: &str) -> Self {
        match raw {
            "x64" => CanonicalArch::X86_64,
            "ia32" => CanonicalArch::I386,
            "arm64" => CanonicalArch::Arm64,
            other => CanonicalArch::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CanonicalArch::X86_64 => "x86_64",
            CanonicalArch::I386 => "i386",
            CanonicalArch::Arm64 => "arm64",
            CanonicalArch::Other(raw) => raw,
        }
    }
}

impl fmt::Display for CanonicalArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw host identifiers together with their canonical labels
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformArch {
    os_raw: String,
    arch_raw: String,
    os: CanonicalOs,
    arch: CanonicalArch,
}

impl PlatformArch {
    /// Resolves the platform the current process runs on
    pub fn host() -> Self {
        resolve(host_os_raw(), host_arch_raw())
    }

    pub fn os_raw(&self) -> &str {
        &self.os_raw
    }

    pub fn arch_raw(&self) -> &str {
        &self.arch_raw
    }

    pub fn os(&self) -> &CanonicalOs {
        &self.os
    }

    pub fn arch(&self) -> &CanonicalArch {
        &self.arch
    }

    pub fn is_windows(&self) -> bool {
        self.os == CanonicalOs::Windows
    }
}

impl fmt::Display for PlatformArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os_raw, self.arch_raw)
    }
}

/// Resolves raw OS/arch identifiers to canonical labels
///
/// Pure and total: identical inputs always give identical outputs, and
/// identifiers missing from the tables pass through unchanged.
///
/// # Examples
///
/// ```
/// use arcshim_core::platform::{resolve, CanonicalArch, CanonicalOs};
///
/// let platform = resolve("darwin", "arm64");
/// assert_eq!(platform.os(), &CanonicalOs::Darwin);
/// assert_eq!(platform.arch(), &CanonicalArch::Arm64);
///
/// let unknown = resolve("sunos", "riscv64");
/// assert_eq!(unknown.os().label(), "sunos");
/// assert_eq!(unknown.arch().label(), "riscv64");
/// ```
pub fn resolve(os_raw: &str, arch_raw: &str) -> PlatformArch {
    PlatformArch {
        os_raw: os_raw.to_string(),
        arch_raw: arch_raw.to_string(),
        os: CanonicalOs::from_raw(os_raw),
        arch: CanonicalArch::from_raw(arch_raw),
    }
}

/// Raw OS identifier of the running host
pub fn host_os_raw() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

/// Raw CPU-architecture identifier of the running host
pub fn host_arch_raw() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "x64",
        "x86" => "ia32",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc64" => "ppc64",
        other => other,
    }
}
