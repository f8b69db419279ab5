//! SHA-256 digests of local files
//!
//! Every hash-based strategy ends here: once an expected hash is known
//! (supplied directly, looked up in a checksum file, or reported by the
//! release API) the artifact is hashed and compared.

use crate::core::output;
use crate::error::{Error, IoContext, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Chunk size for reading files during hashing (1MB)
const CHUNK_SIZE: usize = 1024 * 1024;

/// Files above this size get a spinner while hashing (100MB)
const PROGRESS_THRESHOLD: u64 = 100 * 1024 * 1024;

/// Compute the lowercase hex SHA-256 of a file.
pub fn sha256_file(file: &Path) -> Result<String> {
    let mut f = std::fs::File::open(file).at(file)?;
    let file_size = f.metadata().map(|m| m.len()).unwrap_or(0);

    let mut hash = || -> Result<String> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let n = f.read(&mut buffer).at(file)?;
            if n == 0 {
                break;
            }
            hasher.update(&buffer[..n]);
        }
        Ok(hex::encode(hasher.finalize()))
    };

    if file_size > PROGRESS_THRESHOLD {
        output::with_spinner("computing checksum", hash)
    } else {
        hash()
    }
}

/// Verify that `file` hashes to `expected`.
///
/// The comparison is exact: `expected` must be lowercase hex as published.
pub fn verify_sha256(file: &Path, expected: &str) -> Result<()> {
    let name = file_name(file);
    output::detail(&format!("verifying sha256 of {}", name));

    let actual = sha256_file(file)?;
    if actual != expected {
        return Err(Error::ChecksumMismatch {
            file: name,
            expected: expected.to_string(),
            actual,
        });
    }

    tracing::debug!(file = %file.display(), "checksum verified");
    Ok(())
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
