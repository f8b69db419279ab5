use super::MACOS;
use crate::error::Result;
use crate::install::{copy_tree, mark_executable};
use crate::plugin::Plugin;
use crate::template::{archive_stem, FormatContext, Template};
use crate::verify::Checksum;
use crate::versions;
use std::path::Path;

/// Zig Software Foundation release signing key.
const PUBLIC_KEY: &str = "RWSGOq2NVecA2UPNdBUZykf1CCb147pkmdtYxgb3Ti+JO/wCYvhbAb/U";

/// Tarball directory name; the filename is a full URL.
fn dist_dir(ctx: &FormatContext) -> String {
    let stem = archive_stem(&ctx.filename);
    stem.rsplit('/').next().unwrap_or(stem).to_string()
}

fn bin(ctx: &FormatContext) -> String {
    format!("{}/zig", dist_dir(ctx))
}

/// `zig` looks for `lib/` next to itself, so the whole distribution goes
/// into `bin/`.
fn copy(plugin: &Plugin, extract_root: &Path, root: &Path, ctx: &FormatContext) -> Result<()> {
    let bin_dir = root.join("bin");
    copy_tree(&extract_root.join(dist_dir(ctx)), &bin_dir)?;
    mark_executable(&bin_dir.join(&plugin.cmd))
}

pub fn plugin() -> Plugin {
    Plugin::new("zig", "ziglang/zig")
        .filename("https://ziglang.org/download/{version}/zig-{platform}-{arch}-{version}.tar.xz")
        .platform_map(MACOS)
        .checksum(Checksum::Minisign {
            signature: "{filename}.minisig".into(),
            public_key: PUBLIC_KEY,
        })
        .bin_path(Template::Computed(bin))
        .custom_copy(copy)
        .sort_key(versions::by_semver_tag)
}
