//! CLI structure for `arcbranch-install` using clap

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcbranch-install")]
#[command(version, about = "Download the arcbranch binary into the package cache", long_about = None)]
pub struct Cli {
    /// Version to install (e.g., "1.2.3" or "v1.2.3")
    #[arg(value_name = "VERSION")]
    pub release_version: Option<String>,

    /// Package install root (the cache lives in <DIR>/bin/)
    #[arg(long, value_name = "DIR")]
    pub install_root: Option<PathBuf>,

    /// Release host base URL
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Raw OS identifier to install for (e.g., "darwin", "linux", "win32")
    #[arg(long, value_name = "RAW")]
    pub os: Option<String>,

    /// Raw architecture identifier to install for (e.g., "x64", "arm64")
    #[arg(long, value_name = "RAW")]
    pub arch: Option<String>,

    /// Print where the artifact would come from and go, then exit
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "arcbranch-install",
            "v1.2.3",
            "--install-root",
            "/pkg",
            "--base-url",
            "http://localhost:8080",
            "--os",
            "win32",
            "--arch",
            "x64",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.release_version.as_deref(), Some("v1.2.3"));
        assert_eq!(cli.install_root, Some(PathBuf::from("/pkg")));
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.os.as_deref(), Some("win32"));
        assert_eq!(cli.arch.as_deref(), Some("x64"));
        assert!(cli.dry_run);
        assert_eq!(cli.log_filter(), "info");
    }

    #[test]
    fn test_verbosity_filters() {
        let verbose = Cli::try_parse_from(["arcbranch-install", "-v"]).unwrap();
        assert_eq!(verbose.log_filter(), "debug");

        let quiet = Cli::try_parse_from(["arcbranch-install", "--quiet"]).unwrap();
        assert_eq!(quiet.log_filter(), "error");
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["arcbranch-install", "-v", "-q"]).is_err());
    }
}
