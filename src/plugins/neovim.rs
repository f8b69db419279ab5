use super::{in_stem, ARM64, MACOS};
use crate::error::Result;
use crate::install::{copy_tree, mark_executable};
use crate::plugin::Plugin;
use crate::template::{archive_stem, FormatContext, Template};
use crate::verify::Checksum;
use std::path::Path;

/// Numbered releases are tagged `v<version>`; `stable` and `nightly` are not.
fn recover(version: &str) -> String {
    if version.starts_with(|c: char| c.is_ascii_digit()) {
        format!("v{}", version)
    } else {
        version.to_string()
    }
}

fn bin(ctx: &FormatContext) -> String {
    in_stem(ctx, "bin/nvim")
}

/// Runtime files under `share/` and `lib/` must sit next to `bin/`.
fn copy(plugin: &Plugin, extract_root: &Path, root: &Path, ctx: &FormatContext) -> Result<()> {
    copy_tree(&extract_root.join(archive_stem(&ctx.filename)), root)?;
    mark_executable(&root.join("bin").join(&plugin.cmd))
}

pub fn plugin() -> Plugin {
    Plugin::new("neovim", "neovim/neovim")
        .cmd("nvim")
        .filename("nvim-{platform}-{arch}.tar.gz")
        .platform_map(MACOS)
        .arch_map(ARM64)
        .checksum(Checksum::GithubApi)
        .bin_path(Template::Computed(bin))
        .recover_raw_version(recover)
        .custom_copy(copy)
}
