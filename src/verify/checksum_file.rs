//! Checksum-file lookup
//!
//! Companion files list `<hash>  <filename>` pairs, one per line. The line
//! naming the artifact supplies the expected hash. A file with exactly one
//! line that names nothing matching is accepted as a bare hash for the
//! artifact; this leniency is intentional for single-asset checksum files.

use super::digest::{self, file_name};
use crate::error::{Error, IoContext, Result};
use std::path::Path;

/// Find the expected hash for `filename` in checksum file contents.
pub fn find_expected(contents: &str, filename: &str) -> Option<String> {
    let lines: Vec<&str> = contents.lines().filter(|l| !l.trim().is_empty()).collect();

    let named = lines.iter().find_map(|line| {
        let mut fields = line.split_whitespace();
        let hash = fields.next()?;
        fields
            .any(|f| entry_name(f) == filename)
            .then(|| hash.to_string())
    });

    named.or_else(|| match lines.as_slice() {
        [only] => only.split_whitespace().next().map(str::to_string),
        _ => None,
    })
}

/// Strip the `*` binary-mode marker and a leading `./` from a filename column.
fn entry_name(field: &str) -> &str {
    let field = field.strip_prefix('*').unwrap_or(field);
    field.strip_prefix("./").unwrap_or(field)
}

/// Verify `artifact` against the entry for its name in `checksum_path`.
pub fn verify_with_checksum_file(artifact: &Path, checksum_path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(checksum_path).at(checksum_path)?;
    let name = file_name(artifact);

    let expected = find_expected(&contents, &name).ok_or_else(|| Error::ChecksumNotFound {
        file: name.clone(),
        checksum_file: file_name(checksum_path),
    })?;

    digest::verify_sha256(artifact, &expected)
}
