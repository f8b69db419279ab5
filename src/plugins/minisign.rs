//! minisign verifies its own release archive with the binary inside it.

use super::MACOS;
use crate::error::{Error, Result};
use crate::extract;
use crate::install::{mark_executable, Installer};
use crate::plugin::Plugin;
use crate::template::{FormatContext, Template};
use crate::verify::{self, Checksum};
use std::path::Path;

/// Public key published by the minisign author.
pub const PUBLIC_KEY: &str = "RWQf6LRCGA9i53mlYecO4IzT51TGPpvWucNSCh1CBM0QTaLn73Y7GFO3";

fn filename(ctx: &FormatContext) -> String {
    let ext = if ctx.platform == "linux" { "tar.gz" } else { "zip" };
    format!("minisign-{}-{}.{}", ctx.version, ctx.platform, ext)
}

fn bin(ctx: &FormatContext) -> String {
    if ctx.platform == "linux" {
        format!("minisign-linux/{}/minisign", ctx.arch)
    } else {
        "minisign".to_string()
    }
}

/// Unpack the archive on the side and check it with its own binary.
fn self_check(
    installer: &Installer,
    artifact: &Path,
    signature: &Path,
    ctx: &FormatContext,
) -> Result<()> {
    let scratch = installer.scratch_dir()?;
    let bin_path = bin(ctx);
    extract::extract(artifact, scratch.path(), &bin_path)?;

    let tool = scratch.path().join(&bin_path);
    if !tool.is_file() {
        return Err(Error::Verification {
            file: ctx.filename.clone(),
            message: format!("archive does not contain {}", bin_path),
        });
    }
    mark_executable(&tool)?;

    verify::run_minisign(&tool, PUBLIC_KEY, artifact, signature)
}

pub fn plugin() -> Plugin {
    Plugin::new("minisign", "jedisct1/minisign")
        .filename(Template::Computed(filename))
        .platform_map(MACOS)
        .checksum(Checksum::Custom {
            file: "{filename}.minisig".into(),
            checker: self_check,
        })
        .bin_path(Template::Computed(bin))
}
