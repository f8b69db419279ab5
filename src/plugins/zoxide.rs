use super::RUST_TARGET_MUSL;
use crate::error::Result;
use crate::install::{copy_tree, mark_executable};
use crate::plugin::{prefix_v, Plugin};
use crate::template::FormatContext;
use std::path::Path;

/// The tarball is flat: binary, man pages and completions side by side.
fn copy(plugin: &Plugin, extract_root: &Path, root: &Path, _ctx: &FormatContext) -> Result<()> {
    let bin_dir = root.join("bin");
    copy_tree(extract_root, &bin_dir)?;
    mark_executable(&bin_dir.join(&plugin.cmd))
}

pub fn plugin() -> Plugin {
    Plugin::new("zoxide", "ajeetdsouza/zoxide")
        .filename("zoxide-{normalize_version}-{arch}-{platform}.tar.gz")
        .platform_map(RUST_TARGET_MUSL)
        .bin_path("zoxide")
        .recover_raw_version(prefix_v)
        .custom_copy(copy)
}
