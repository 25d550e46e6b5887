//! `arcbranch-install`: provisions the arcbranch executable into the cache

mod cli;

use anyhow::{Context, Result};
use arcshim_binary::{ProvisionOptions, provision};
use arcshim_core::config::{Settings, SettingsOverrides};
use arcshim_core::platform::{self, PlatformArch};
use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    arcshim_core::logging::init(cli.log_filter());

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env(SettingsOverrides {
        install_root: cli.install_root,
        version: cli.release_version,
        base_url: cli.base_url,
    })
    .context("Failed to resolve settings")?;

    let platform = match (cli.os, cli.arch) {
        (None, None) => PlatformArch::host(),
        (os, arch) => platform::resolve(
            os.as_deref().unwrap_or_else(|| platform::host_os_raw()),
            arch.as_deref().unwrap_or_else(|| platform::host_arch_raw()),
        ),
    };

    let mut options = ProvisionOptions::from_settings(&settings, platform);

    if cli.dry_run {
        println!("{}", options.location()?);
        return Ok(());
    }

    if !cli.quiet {
        options.progress = Some(progress_callback);
    }

    let cached = provision(&options)?;
    if !cli.quiet {
        println!();
        println!("✓ Installed {}", cached);
    }
    Ok(())
}

/// Rewrites one progress line on stdout; `run` ends it after the download
fn progress_callback(downloaded: u64, total: Option<u64>) {
    print!("\r{}", progress_line(downloaded, total));
    std::io::Write::flush(&mut std::io::stdout()).ok();
}

fn progress_line(downloaded: u64, total: Option<u64>) -> String {
    let mib = |bytes: u64| bytes as f64 / 1_048_576.0;
    match total {
        Some(total) if total > 0 => format!(
            "  Downloaded {:.1} / {:.1} MiB ({}%)",
            mib(downloaded),
            mib(total),
            downloaded * 100 / total
        ),
        _ => format!("  Downloaded {:.1} MiB", mib(downloaded)),
    }
}
