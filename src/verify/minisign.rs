//! Detached minisign signatures
//!
//! Verification shells out to `minisign`. When the host has no `minisign`
//! on `PATH`, a pinned release is installed into a throwaway directory
//! through the same install pipeline and used from there.

use super::digest::file_name;
use crate::core::output;
use crate::error::{Error, Result};
use crate::install::Installer;
use std::path::Path;
use std::process::Command;

/// Command name of the signature tool (and of its plugin).
pub const MINISIGN_CMD: &str = "minisign";

/// Version installed when the host lacks the tool.
pub const MINISIGN_VERSION: &str = "0.11";

/// Run `bin -P <key> -x <signature> -Vm <artifact>`.
pub fn run_minisign(bin: &Path, public_key: &str, artifact: &Path, signature: &Path) -> Result<()> {
    tracing::debug!(bin = %bin.display(), artifact = %artifact.display(), "running minisign");

    let result = Command::new(bin)
        .arg("-P")
        .arg(public_key)
        .arg("-x")
        .arg(signature)
        .arg("-Vm")
        .arg(artifact)
        .output()
        .map_err(|e| Error::Verification {
            file: file_name(artifact),
            message: format!("failed to execute {}: {}", bin.display(), e),
        })?;

    if !result.status.success() {
        let stderr = String::from_utf8_lossy(&result.stderr);
        return Err(Error::SignatureInvalid {
            file: file_name(artifact),
            message: stderr.trim().to_string(),
        });
    }

    Ok(())
}

/// Verify `artifact` against `signature`, bootstrapping minisign if needed.
pub fn verify_signature(
    installer: &Installer,
    public_key: &str,
    artifact: &Path,
    signature: &Path,
) -> Result<()> {
    output::detail(&format!("minisign: verifying signature for {}", file_name(artifact)));

    if let Ok(bin) = which::which(MINISIGN_CMD) {
        run_minisign(&bin, public_key, artifact, signature)?;
    } else {
        output::detail(&format!(
            "minisign: not found on PATH, installing {} {}",
            MINISIGN_CMD, MINISIGN_VERSION
        ));
        let tool_root = installer.scratch_dir()?;
        installer.install(MINISIGN_CMD, MINISIGN_VERSION, tool_root.path())?;
        let bin = tool_root.path().join("bin").join(MINISIGN_CMD);
        run_minisign(&bin, public_key, artifact, signature)?;
    }

    output::detail(&format!("minisign: verification passed {}", file_name(artifact)));
    Ok(())
}
