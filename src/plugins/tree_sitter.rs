use super::{MACOS, NODE_ARCH};
use crate::plugin::{prefix_v, Plugin};
use crate::template::{archive_stem, FormatContext, Template};
use crate::verify::Checksum;

/// The gzip stream is written out under the asset's own stem.
fn bin(ctx: &FormatContext) -> String {
    archive_stem(&ctx.filename).to_string()
}

pub fn plugin() -> Plugin {
    Plugin::new("tree-sitter", "tree-sitter/tree-sitter")
        .filename("tree-sitter-{platform}-{arch}.gz")
        .platform_map(MACOS)
        .arch_map(NODE_ARCH)
        .checksum(Checksum::GithubApi)
        .bin_path(Template::Computed(bin))
        .recover_raw_version(prefix_v)
}
