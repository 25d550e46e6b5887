use arcshim_core::platform::PlatformArch;
use std::fmt;
use std::path::PathBuf;

/// An executable installed in the per-platform cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedBinary {
    pub path: PathBuf,
    pub version: String,
    pub platform: PlatformArch,
}

impl fmt::Display for CachedBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arcbranch {} ({}) at {}",
            self.version,
            self.platform,
            self.path.display()
        )
    }
}
