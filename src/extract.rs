//! Archive extraction
//!
//! Dispatch is purely on the file name suffix:
//!
//! | Suffix              | Handling                                   |
//! |---------------------|--------------------------------------------|
//! | `.tar.gz`           | tar over gzip, full tree                   |
//! | `.tar.xz`           | tar over xz, full tree                     |
//! | `.zip`              | full tree                                  |
//! | `.gz`               | single stream written to `dest/<bin_path>` |
//!
//! Matching is case-sensitive and anything else is unsupported.
//!
//! Tar and zip entries that would land outside the destination are
//! rejected, as are links pointing out of it.

use crate::core::output;
use crate::error::{Error, IoContext, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Component, Path, PathBuf};

/// Supported artifact containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    TarGz,
    TarXz,
    Zip,
    /// A single gzip-compressed file.
    Gz,
}

impl ArchiveKind {
    /// Detect the container from a file name.
    pub fn detect(name: &str) -> Option<Self> {
        if name.ends_with(".tar.gz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar.xz") {
            Some(Self::TarXz)
        } else if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".gz") {
            Some(Self::Gz)
        } else {
            None
        }
    }
}

fn extract_error(archive: &Path, message: impl Into<String>) -> Error {
    Error::Extract {
        archive: archive
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| archive.display().to_string()),
        message: message.into(),
    }
}

fn normalize_lexical(path: &Path) -> PathBuf {
    // No filesystem access, so symlinks are never followed.
    let mut out = PathBuf::new();
    let mut has_root = false;

    for c in path.components() {
        match c {
            Component::Prefix(p) => {
                out.clear();
                out.push(p.as_os_str());
                has_root = true;
            }
            Component::RootDir => {
                out.push(Component::RootDir.as_os_str());
                has_root = true;
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = out
                    .components()
                    .next_back()
                    .is_some_and(|last| matches!(last, Component::Normal(_)));
                if popped {
                    out.pop();
                } else if !has_root {
                    out.push("..");
                }
            }
            Component::Normal(seg) => out.push(seg),
        }
    }

    out
}

/// A relative path with no `..`, root or prefix components.
pub(crate) fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

fn ensure_no_symlink_components(archive: &Path, dest: &Path, full_path: &Path) -> Result<()> {
    let rel = full_path.strip_prefix(dest).map_err(|_| {
        extract_error(
            archive,
            format!("entry outside destination: {}", full_path.display()),
        )
    })?;

    let mut cur = dest.to_path_buf();
    for comp in rel.components() {
        cur.push(comp);
        if let Ok(md) = std::fs::symlink_metadata(&cur)
            && md.file_type().is_symlink()
        {
            return Err(extract_error(
                archive,
                format!("symlink in path component: {}", cur.display()),
            ));
        }
    }

    Ok(())
}

fn ensure_link_target_within_dest(
    archive: &Path,
    dest: &Path,
    link_parent: &Path,
    link_name: &Path,
) -> Result<()> {
    if link_name.is_absolute()
        || link_name
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
    {
        return Err(extract_error(
            archive,
            format!("unsafe link target (absolute): {}", link_name.display()),
        ));
    }

    let candidate = normalize_lexical(&link_parent.join(link_name));
    if candidate.strip_prefix(normalize_lexical(dest)).is_err() {
        return Err(extract_error(
            archive,
            format!(
                "unsafe link target (escapes dest): {} -> {}",
                link_parent.display(),
                link_name.display()
            ),
        ));
    }

    Ok(())
}

fn extract_tar<R: Read>(archive_path: &Path, reader: R, dest: &Path) -> Result<()> {
    let mut archive = tar::Archive::new(reader);
    archive.set_preserve_permissions(true);

    let entries = archive
        .entries()
        .map_err(|e| extract_error(archive_path, format!("tar read error: {}", e)))?;

    for entry in entries {
        let mut entry =
            entry.map_err(|e| extract_error(archive_path, format!("tar entry error: {}", e)))?;

        let path = entry
            .path()
            .map_err(|e| extract_error(archive_path, format!("tar path error: {}", e)))?
            .into_owned();

        if path.is_absolute() || path.components().any(|c| c == Component::ParentDir) {
            return Err(extract_error(
                archive_path,
                format!("unsafe path: {}", path.display()),
            ));
        }

        if path.as_os_str().is_empty() || path == Path::new(".") {
            continue;
        }

        let full_path = dest.join(&path);
        ensure_no_symlink_components(archive_path, dest, &full_path)?;

        let entry_type = entry.header().entry_type();
        if entry_type == tar::EntryType::Symlink || entry_type == tar::EntryType::Link {
            let link_name = entry
                .link_name()
                .map_err(|e| extract_error(archive_path, format!("tar link error: {}", e)))?
                .ok_or_else(|| {
                    extract_error(
                        archive_path,
                        format!("link without target: {}", path.display()),
                    )
                })?;
            let link_parent = full_path.parent().unwrap_or(dest);
            ensure_link_target_within_dest(archive_path, dest, link_parent, &link_name)?;
        }

        if let Some(parent) = full_path.parent() {
            if parent.starts_with(dest) {
                ensure_no_symlink_components(archive_path, dest, parent)?;
            }
            std::fs::create_dir_all(parent).at(parent)?;
        }

        entry.unpack(&full_path).map_err(|e| {
            extract_error(
                archive_path,
                format!("unpack error for {}: {}", path.display(), e),
            )
        })?;
    }

    Ok(())
}

fn extract_zip(archive_path: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive_path).at(archive_path)?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| extract_error(archive_path, format!("zip read error: {}", e)))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| extract_error(archive_path, format!("zip entry error: {}", e)))?;

        let outpath = match file.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                return Err(extract_error(
                    archive_path,
                    format!("unsafe path: {}", file.name()),
                ));
            }
        };
        ensure_no_symlink_components(archive_path, dest, &outpath)?;

        if file.is_dir() {
            std::fs::create_dir_all(&outpath).at(&outpath)?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent).at(parent)?;
        }

        let mut outfile = File::create(&outpath).at(&outpath)?;
        std::io::copy(&mut file, &mut outfile).at(&outpath)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))
                    .at(&outpath)?;
            }
        }
    }

    Ok(())
}

fn extract_gz(archive_path: &Path, target: &Path) -> Result<()> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).at(parent)?;
    }

    let file = File::open(archive_path).at(archive_path)?;
    let mut decoder = flate2::read::GzDecoder::new(BufReader::new(file));
    let mut out = File::create(target).at(target)?;
    std::io::copy(&mut decoder, &mut out)
        .map_err(|e| extract_error(archive_path, format!("gzip error: {}", e)))?;

    Ok(())
}

/// Unpack `archive` into `dest`.
///
/// `bin_path` is only consulted for single-file `.gz` artifacts, which are
/// written to `dest/bin_path`.
pub fn extract(archive: &Path, dest: &Path, bin_path: &str) -> Result<()> {
    let filename = archive
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let kind = ArchiveKind::detect(&filename)
        .ok_or_else(|| Error::UnsupportedArchiveType(filename.clone()))?;

    std::fs::create_dir_all(dest).at(dest)?;
    tracing::debug!(?kind, archive = %archive.display(), dest = %dest.display(), "extracting");

    output::with_spinner(&format!("extracting {}", filename), || match kind {
        ArchiveKind::TarGz => {
            let file = File::open(archive).at(archive)?;
            let decoder = flate2::read::GzDecoder::new(BufReader::new(file));
            extract_tar(archive, decoder, dest)
        }
        ArchiveKind::TarXz => {
            let file = File::open(archive).at(archive)?;
            let decoder = xz2::read::XzDecoder::new(BufReader::new(file));
            extract_tar(archive, decoder, dest)
        }
        ArchiveKind::Zip => extract_zip(archive, dest),
        ArchiveKind::Gz => extract_gz(archive, &contained_target(archive, dest, bin_path)?),
    })?;

    output::detail(&format!("extracted {}", filename));
    Ok(())
}

/// Copy an uncompressed artifact to `dest/bin_path`.
pub fn copy_raw(download: &Path, dest: &Path, bin_path: &str) -> Result<PathBuf> {
    let target = contained_target(download, dest, bin_path)?;
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).at(parent)?;
    }
    std::fs::copy(download, &target).at(&target)?;
    Ok(target)
}

fn contained_target(archive: &Path, dest: &Path, bin_path: &str) -> Result<PathBuf> {
    let rel = Path::new(bin_path);
    if !is_contained(rel) {
        return Err(extract_error(
            archive,
            format!("binary path '{}' escapes the extraction root", bin_path),
        ));
    }
    Ok(dest.join(rel))
}
