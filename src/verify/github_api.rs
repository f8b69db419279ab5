//! Digest reported by the release API
//!
//! GitHub computes a `sha256:<hex>` digest for every uploaded asset and
//! exposes it on the release-by-tag endpoint.

use super::digest::{self, file_name};
use crate::error::{Error, Result};
use crate::github::{GitHub, Release};
use std::path::Path;

/// The hex digest GitHub reports for the asset named `filename`.
pub fn find_digest<'a>(release: &'a Release, filename: &str) -> Option<&'a str> {
    release
        .assets
        .iter()
        .find(|a| a.name == filename)
        .and_then(|a| a.digest.as_deref())
        .map(|d| d.strip_prefix("sha256:").unwrap_or(d))
        .filter(|d| !d.is_empty())
}

/// Verify `artifact` against the digest of the same-named asset of `repo@tag`.
pub fn verify_with_release_digest(
    client: &GitHub,
    repo: &str,
    tag: &str,
    artifact: &Path,
) -> Result<()> {
    let release = client.release_by_tag(repo, tag)?;
    let name = file_name(artifact);

    let expected = find_digest(&release, &name).ok_or_else(|| Error::DigestNotFound {
        file: name.clone(),
        url: client.release_tag_url(repo, tag),
    })?;

    digest::verify_sha256(artifact, expected)
}
