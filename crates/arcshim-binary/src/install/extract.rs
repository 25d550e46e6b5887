//! Archive extraction
//!
//! Release archives are unpacked in place into the per-platform cache
//! directory. Entries whose paths would escape the destination are rejected
//! (`unpack_in` for tar, `enclosed_name` for zip).

use arcshim_core::layout::ArchiveFormat;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Extraction error types
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The archive could not be read (corrupt, truncated, unsupported entry)
    #[error("Extraction failed: {format} archive {}: {reason}", path.display())]
    Corrupt {
        format: ArchiveFormat,
        path: PathBuf,
        reason: String,
    },

    /// Filesystem operation failed while writing extracted files
    #[error("Extraction failed: {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    /// The archive did not contain the executable
    #[error("Extraction failed: executable '{name}' not found in {}", dir.display())]
    ExecutableMissing { name: String, dir: PathBuf },
}

/// Extracts `archive` into `dest_dir` according to `format`
pub fn extract_archive(
    archive: &Path,
    format: ArchiveFormat,
    dest_dir: &Path,
) -> Result<(), ExtractError> {
    log::debug!(
        "Extracting {} ({}) into {}",
        archive.display(),
        format,
        dest_dir.display()
    );
    match format {
        ArchiveFormat::TarGz => extract_tar_gz(archive, dest_dir),
        ArchiveFormat::Zip => extract_zip(archive, dest_dir),
    }
}

/// Extracts a .tar.gz archive
fn extract_tar_gz(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = fs::File::open(archive_path).map_err(|e| ExtractError::Io {
        operation: format!("open archive {}", archive_path.display()),
        source: e,
    })?;

    let corrupt = |e: io::Error| ExtractError::Corrupt {
        format: ArchiveFormat::TarGz,
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    };

    let decompressor = flate2::read::GzDecoder::new(file);
    let mut archive = tar::Archive::new(decompressor);

    // Safe extraction: iterate entries and use unpack_in() for validation
    for entry in archive.entries().map_err(corrupt)? {
        let mut entry = entry.map_err(corrupt)?;
        entry.unpack_in(dest_dir).map_err(corrupt)?;
    }

    Ok(())
}

/// Extracts a .zip archive
fn extract_zip(archive_path: &Path, dest_dir: &Path) -> Result<(), ExtractError> {
    let file = fs::File::open(archive_path).map_err(|e| ExtractError::Io {
        operation: format!("open archive {}", archive_path.display()),
        source: e,
    })?;

    let corrupt = |e: zip::result::ZipError| ExtractError::Corrupt {
        format: ArchiveFormat::Zip,
        path: archive_path.to_path_buf(),
        reason: e.to_string(),
    };

    let mut archive = zip::ZipArchive::new(file).map_err(corrupt)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(corrupt)?;

        let outpath = match file.enclosed_name() {
            Some(path) => dest_dir.join(path),
            None => {
                log::warn!("Skipping zip entry with unsafe path: {}", file.name());
                continue;
            }
        };

        if file.is_dir() {
            fs::create_dir_all(&outpath).map_err(|e| ExtractError::Io {
                operation: format!("create directory {}", outpath.display()),
                source: e,
            })?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|e| ExtractError::Io {
                operation: format!("create parent directory {}", parent.display()),
                source: e,
            })?;
        }

        let mut outfile = fs::File::create(&outpath).map_err(|e| ExtractError::Io {
            operation: format!("create file {}", outpath.display()),
            source: e,
        })?;

        // Read errors here mean a damaged entry, not a local I/O problem
        io::copy(&mut file, &mut outfile).map_err(|e| ExtractError::Corrupt {
            format: ArchiveFormat::Zip,
            path: archive_path.to_path_buf(),
            reason: format!("entry {}: {}", outpath.display(), e),
        })?;
    }

    Ok(())
}

/// Makes sure the executable sits at `expected`
///
/// Releases normally put the executable at the archive root. When it is
/// nested instead, the first match in a walk sorted by file name is moved to
/// `expected`, so the outcome does not depend on directory iteration order.
///
/// # Errors
///
/// [`ExtractError::ExecutableMissing`] if no file with the expected name
/// exists anywhere under `dir`.
pub fn locate_executable(dir: &Path, expected: &Path) -> Result<PathBuf, ExtractError> {
    let name = expected
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();

    if expected.is_file() {
        return Ok(expected.to_path_buf());
    }

    let found = walkdir::WalkDir::new(dir)
        .min_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::debug!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .find(|entry| entry.file_type().is_file() && entry.file_name() == name.as_os_str());

    match found {
        Some(entry) => {
            log::debug!(
                "Moving nested executable {} to {}",
                entry.path().display(),
                expected.display()
            );
            fs::rename(entry.path(), expected).map_err(|e| ExtractError::Io {
                operation: format!(
                    "move {} to {}",
                    entry.path().display(),
                    expected.display()
                ),
                source: e,
            })?;
            Ok(expected.to_path_buf())
        }
        None => Err(ExtractError::ExecutableMissing {
            name: name.to_string_lossy().into_owned(),
            dir: dir.to_path_buf(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcshim_testkit::{tar_gz_archive, temp_dir_in_workspace, zip_archive};

    // ============================================================================
    // Extraction Tests
    // ============================================================================

    #[test]
    fn test_extract_tar_gz_success() {
        let temp = temp_dir_in_workspace();
        let archive = temp.path().join("arcbranch_Linux_x86_64.tar.gz");
        fs::write(&archive, tar_gz_archive(&[("arcbranch", b"binary")])).unwrap();

        extract_archive(&archive, ArchiveFormat::TarGz, temp.path()).unwrap();

        assert_eq!(fs::read(temp.path().join("arcbranch")).unwrap(), b"binary");
    }

    #[test]
    fn test_extract_tar_gz_overwrites_existing_files() {
        let temp = temp_dir_in_workspace();
        fs::write(temp.path().join("arcbranch"), b"old").unwrap();
        let archive = temp.path().join("a.tar.gz");
        fs::write(&archive, tar_gz_archive(&[("arcbranch", b"new")])).unwrap();

        extract_archive(&archive, ArchiveFormat::TarGz, temp.path()).unwrap();

        assert_eq!(fs::read(temp.path().join("arcbranch")).unwrap(), b"new");
    }

    #[test]
    fn test_extract_zip_success_with_nested_entries() {
        let temp = temp_dir_in_workspace();
        let archive = temp.path().join("arcbranch_Windows_x86_64.zip");
        fs::write(
            &archive,
            zip_archive(&[("arcbranch.exe", b"MZ"), ("docs/LICENSE", b"MIT")]),
        )
        .unwrap();

        extract_archive(&archive, ArchiveFormat::Zip, temp.path()).unwrap();

        assert_eq!(fs::read(temp.path().join("arcbranch.exe")).unwrap(), b"MZ");
        assert_eq!(
            fs::read(temp.path().join("docs").join("LICENSE")).unwrap(),
            b"MIT"
        );
    }

    #[test]
    fn test_extract_zip_skips_escaping_entries() {
        let temp = temp_dir_in_workspace();
        let dest = temp.path().join("dest");
        fs::create_dir_all(&dest).unwrap();
        let archive = temp.path().join("evil.zip");
        fs::write(
            &archive,
            zip_archive(&[("../escaped", b"nope"), ("arcbranch.exe", b"MZ")]),
        )
        .unwrap();

        extract_archive(&archive, ArchiveFormat::Zip, &dest).unwrap();

        assert!(!temp.path().join("escaped").exists());
        assert!(dest.join("arcbranch.exe").exists());
    }

    #[test]
    fn test_extract_corrupted_tar_gz() {
        let temp = temp_dir_in_workspace();
        let archive = temp.path().join("corrupted.tar.gz");
        fs::write(&archive, b"not a real archive").unwrap();

        let err = extract_archive(&archive, ArchiveFormat::TarGz, temp.path()).unwrap_err();
        match err {
            ExtractError::Corrupt { format, .. } => assert_eq!(format, ArchiveFormat::TarGz),
            other => panic!("Expected Corrupt error, got: {:?}", other),
        }
    }

    #[test]
    fn test_extract_corrupted_zip() {
        let temp = temp_dir_in_workspace();
        let archive = temp.path().join("corrupted.zip");
        fs::write(&archive, b"PK but not really").unwrap();

        let err = extract_archive(&archive, ArchiveFormat::Zip, temp.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Corrupt { .. }));
        assert!(err.to_string().contains("zip"));
    }

    #[test]
    fn test_extract_missing_archive() {
        let temp = temp_dir_in_workspace();
        let err = extract_archive(
            &temp.path().join("absent.tar.gz"),
            ArchiveFormat::TarGz,
            temp.path(),
        )
        .unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
    }

    // ============================================================================
    // Executable Location Tests
    // ============================================================================

    #[test]
    fn test_locate_executable_at_root() {
        let temp = temp_dir_in_workspace();
        let expected = temp.path().join("arcbranch");
        fs::write(&expected, b"bin").unwrap();

        let found = locate_executable(temp.path(), &expected).unwrap();
        assert_eq!(found, expected);
    }

    #[test]
    fn test_locate_executable_moves_nested_binary() {
        let temp = temp_dir_in_workspace();
        let nested = temp.path().join("arcbranch_Linux_x86_64");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("arcbranch"), b"nested bin").unwrap();
        let expected = temp.path().join("arcbranch");

        let found = locate_executable(temp.path(), &expected).unwrap();

        assert_eq!(found, expected);
        assert_eq!(fs::read(&expected).unwrap(), b"nested bin");
        assert!(!nested.join("arcbranch").exists());
    }

    #[test]
    fn test_locate_executable_picks_first_sorted_match() {
        let temp = temp_dir_in_workspace();
        for dir in ["b", "a"] {
            let nested = temp.path().join(dir);
            fs::create_dir_all(&nested).unwrap();
            fs::write(nested.join("arcbranch"), dir.as_bytes()).unwrap();
        }
        let expected = temp.path().join("arcbranch");

        locate_executable(temp.path(), &expected).unwrap();

        assert_eq!(fs::read(&expected).unwrap(), b"a");
    }

    #[test]
    fn test_locate_executable_missing() {
        let temp = temp_dir_in_workspace();
        fs::write(temp.path().join("README.md"), b"docs only").unwrap();

        let err = locate_executable(temp.path(), &temp.path().join("arcbranch")).unwrap_err();
        match err {
            ExtractError::ExecutableMissing { name, .. } => assert_eq!(name, "arcbranch"),
            other => panic!("Expected ExecutableMissing error, got: {:?}", other),
        }
    }
}
