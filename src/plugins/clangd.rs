use crate::error::Result;
use crate::install::{copy_tree, mark_executable};
use crate::plugin::Plugin;
use crate::template::FormatContext;
use crate::verify::Checksum;
use std::path::Path;

/// The zip holds a `clangd_<version>/` tree with `bin/` and `lib/`.
fn copy(plugin: &Plugin, extract_root: &Path, root: &Path, ctx: &FormatContext) -> Result<()> {
    copy_tree(&extract_root.join(format!("clangd_{}", ctx.version)), root)?;
    mark_executable(&root.join("bin").join(&plugin.cmd))
}

pub fn plugin() -> Plugin {
    Plugin::new("clangd", "clangd/clangd")
        .filename("clangd-{platform}-{version}.zip")
        .platform_map(&[("darwin", "mac")])
        .checksum(Checksum::GithubApi)
        .bin_path("clangd_{version}/bin/clangd")
        .custom_copy(copy)
}
