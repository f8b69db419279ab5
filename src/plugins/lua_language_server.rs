use super::NODE_ARCH;
use crate::error::Result;
use crate::install::{copy_tree, mark_executable};
use crate::plugin::Plugin;
use crate::template::FormatContext;
use std::path::Path;

/// The server resolves its `main.lua` relative to `bin/`, so the whole
/// archive is installed as-is.
fn copy(plugin: &Plugin, extract_root: &Path, root: &Path, _ctx: &FormatContext) -> Result<()> {
    copy_tree(extract_root, root)?;
    mark_executable(&root.join("bin").join(&plugin.cmd))
}

pub fn plugin() -> Plugin {
    Plugin::new("lua-language-server", "LuaLS/lua-language-server")
        .filename("lua-language-server-{version}-{platform}-{arch}.tar.gz")
        .arch_map(NODE_ARCH)
        .bin_path("bin/lua-language-server")
        .custom_copy(copy)
}
