//! Artifact verification
//!
//! A plugin picks one [`Checksum`] strategy and a [`ChecksumStage`]. The
//! install pipeline resolves the strategy's companion file name into the
//! format context, fetches the companion into the scratch directory with
//! [`Verifier::prepare`], and runs [`Verifier::verify`] against either the
//! downloaded artifact or the extracted binary.

pub mod checksum_file;
pub mod digest;
pub mod github_api;
pub mod minisign;

use crate::core::output;
use crate::error::Result;
use crate::install::Installer;
use crate::template::{FormatContext, Template};
use std::path::{Path, PathBuf};

pub use checksum_file::{find_expected, verify_with_checksum_file};
pub use digest::{sha256_file, verify_sha256};
pub use github_api::{find_digest, verify_with_release_digest};
pub use minisign::{run_minisign, verify_signature};

/// A plugin-owned check: `(installer, artifact, companion file, context)`.
pub type CustomCheckFn = fn(&Installer, &Path, &Path, &FormatContext) -> Result<()>;

/// How a plugin's artifact is verified.
#[derive(Debug, Clone, Default)]
pub enum Checksum {
    /// No verification.
    #[default]
    None,
    /// Compare against a hash the plugin supplies directly.
    Digest(Template),
    /// Look the hash up in a `<hash>  <filename>` companion file.
    File(Template),
    /// Use the digest GitHub reports for the release asset.
    GithubApi,
    /// Detached minisign signature checked with `public_key`.
    Minisign {
        signature: Template,
        public_key: &'static str,
    },
    /// Download `file`, then hand both paths to a plugin function.
    Custom {
        file: Template,
        checker: CustomCheckFn,
    },
}

impl Checksum {
    /// Template of the companion file to download, if the strategy needs one.
    pub fn companion(&self) -> Option<&Template> {
        match self {
            Self::File(t) => Some(t),
            Self::Minisign { signature, .. } => Some(signature),
            Self::Custom { file, .. } => Some(file),
            Self::None | Self::Digest(_) | Self::GithubApi => None,
        }
    }

    /// Short strategy name for progress output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Digest(_) => "sha256",
            Self::File(_) => "checksum file",
            Self::GithubApi => "github api digest",
            Self::Minisign { .. } => "minisign",
            Self::Custom { .. } => "custom",
        }
    }
}

/// Which file the checksum covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumStage {
    /// The downloaded artifact.
    #[default]
    Download,
    /// The binary after extraction.
    Extract,
}

/// A checksum strategy bound to one install attempt.
#[derive(Debug)]
pub struct Verifier<'a> {
    checksum: &'a Checksum,
    ctx: &'a FormatContext,
    companion: Option<PathBuf>,
}

impl<'a> Verifier<'a> {
    /// Download the companion file (if any) into `scratch`.
    ///
    /// A companion name that is a full URL is fetched verbatim; otherwise it
    /// is an asset of the same release. The local copy keeps the basename.
    pub fn prepare(
        installer: &Installer,
        checksum: &'a Checksum,
        ctx: &'a FormatContext,
        scratch: &Path,
    ) -> Result<Self> {
        let companion = if checksum.companion().is_some() && !ctx.checksum_filename.is_empty() {
            let client = installer.client();
            let url =
                client.resolve_asset_url(&ctx.repo_name, &ctx.version, &ctx.checksum_filename);
            let local = scratch.join(basename(&ctx.checksum_filename));
            tracing::debug!(%url, path = %local.display(), "fetching checksum companion");
            client.download(&url, &local)?;
            Some(local)
        } else {
            None
        };

        Ok(Self {
            checksum,
            ctx,
            companion,
        })
    }

    /// Run the strategy against `artifact`.
    pub fn verify(&self, installer: &Installer, artifact: &Path) -> Result<()> {
        if matches!(self.checksum, Checksum::None) {
            tracing::debug!(name = %self.ctx.name, "no checksum configured");
            return Ok(());
        }

        output::sub_action(&format!("verify ({})", self.checksum.label()));
        tracing::debug!(
            strategy = self.checksum.label(),
            artifact = %artifact.display(),
            "verifying"
        );

        match (self.checksum, self.companion.as_deref()) {
            (Checksum::None, _) => Ok(()),
            (Checksum::Digest(expected), _) => {
                let expected = expected.format(self.ctx)?;
                digest::verify_sha256(artifact, &expected)
            }
            (Checksum::GithubApi, _) => github_api::verify_with_release_digest(
                installer.client(),
                &self.ctx.repo_name,
                &self.ctx.version,
                artifact,
            ),
            (Checksum::File(_), Some(file)) => {
                checksum_file::verify_with_checksum_file(artifact, file)
            }
            (Checksum::Minisign { public_key, .. }, Some(signature)) => {
                minisign::verify_signature(installer, public_key, artifact, signature)
            }
            (Checksum::Custom { checker, .. }, Some(file)) => {
                checker(installer, artifact, file, self.ctx)
            }
            // An empty companion name disables the companion strategies.
            (Checksum::File(_) | Checksum::Minisign { .. } | Checksum::Custom { .. }, None) => {
                tracing::debug!(name = %self.ctx.name, "empty checksum file name, skipping");
                Ok(())
            }
        }
    }
}

/// Last path segment of a file name or URL.
fn basename(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_companion_templates() {
        assert!(Checksum::None.companion().is_none());
        assert!(Checksum::GithubApi.companion().is_none());
        assert!(Checksum::Digest("abc".into()).companion().is_none());

        let file = Checksum::File("checksums.txt".into());
        assert!(matches!(file.companion(), Some(Template::Literal(p)) if p == "checksums.txt"));

        let sig = Checksum::Minisign {
            signature: "{filename}.minisig".into(),
            public_key: "KEY",
        };
        assert!(sig.companion().is_some());
    }

    #[test]
    fn test_default_stage_is_download() {
        assert_eq!(ChecksumStage::default(), ChecksumStage::Download);
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("sha256sums.txt"), "sha256sums.txt");
        assert_eq!(
            basename("https://ziglang.org/download/0.13.0/zig-linux-x86_64-0.13.0.tar.xz.minisig"),
            "zig-linux-x86_64-0.13.0.tar.xz.minisig"
        );
    }
}
