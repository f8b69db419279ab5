use super::{in_stem, RUST_TARGET_GNU};
use crate::plugin::Plugin;
use crate::template::{FormatContext, Template};

fn bin(ctx: &FormatContext) -> String {
    in_stem(ctx, "uv")
}

pub fn plugin() -> Plugin {
    Plugin::new("uv", "astral-sh/uv")
        .filename("uv-{arch}-{platform}.tar.gz")
        .platform_map(RUST_TARGET_GNU)
        .checksum_file("{filename}.sha256")
        .bin_path(Template::Computed(bin))
}
