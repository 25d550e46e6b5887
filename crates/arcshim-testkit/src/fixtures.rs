//! Release archive and stub executable fixtures
//!
//! Archives are built in memory so tests can serve them from a mock HTTP
//! server or write them anywhere they like.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::{Cursor, Write};
use std::path::Path;

/// Exit code of the stub produced by [`stub_script`]
pub const STUB_EXIT_CODE: i32 = 42;

/// Shell script that prints each argument on its own line and exits 42
pub fn stub_script() -> String {
    format!(
        "#!/bin/sh\nfor arg in \"$@\"; do\n  printf '%s\\n' \"$arg\"\ndone\nexit {}\n",
        STUB_EXIT_CODE
    )
}

/// Builds a `.tar.gz` archive holding `entries` as regular files (mode 0644)
///
/// Entry names may contain `/` to create nested paths.
pub fn tar_gz_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(encoder);

    for (name, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, name, *contents)
            .expect("Failed to append tar entry");
    }

    builder
        .into_inner()
        .expect("Failed to finish tar archive")
        .finish()
        .expect("Failed to finish gzip stream")
}

/// Builds a `.zip` archive holding `entries` as stored files
pub fn zip_archive(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (name, contents) in entries {
        zip.start_file(*name, options)
            .expect("Failed to start zip entry");
        zip.write_all(contents).expect("Failed to write zip entry");
    }

    zip.finish()
        .expect("Failed to finish zip archive")
        .into_inner()
}

/// Writes `script` to `path` (creating parents) and marks it executable
pub fn install_stub_executable(path: &Path, script: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create stub directory");
    }
    fs::write(path, script).expect("Failed to write stub executable");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to set stub permissions");
    }
}
