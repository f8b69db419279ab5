use super::{in_stem, GO_ARCH};
use crate::error::Result;
use crate::install::{copy_tree, mark_executable};
use crate::plugin::{prefix_v, Plugin};
use crate::template::{archive_stem, FormatContext, Template};
use std::path::Path;

/// Linux builds ship as tarballs, macOS builds as zips.
fn filename(ctx: &FormatContext) -> String {
    let ext = if ctx.platform == "linux" { "tar.gz" } else { "zip" };
    format!(
        "gh_{}_{}_{}.{}",
        ctx.normalize_version, ctx.platform, ctx.arch, ext
    )
}

fn bin(ctx: &FormatContext) -> String {
    in_stem(ctx, "bin/gh")
}

/// Keep the bundled man pages and completions next to the binary.
fn copy(plugin: &Plugin, extract_root: &Path, root: &Path, ctx: &FormatContext) -> Result<()> {
    copy_tree(&extract_root.join(archive_stem(&ctx.filename)), root)?;
    mark_executable(&root.join("bin").join(&plugin.cmd))
}

pub fn plugin() -> Plugin {
    Plugin::new("gh", "cli/cli")
        .filename(Template::Computed(filename))
        .platform_map(&[("darwin", "macOS")])
        .arch_map(GO_ARCH)
        .checksum_file("gh_{normalize_version}_checksums.txt")
        .bin_path(Template::Computed(bin))
        .recover_raw_version(prefix_v)
        .custom_copy(copy)
}
