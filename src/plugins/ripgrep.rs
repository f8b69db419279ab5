use super::{in_stem, RUST_TARGET_MUSL};
use crate::plugin::Plugin;
use crate::template::{FormatContext, Template};

fn bin(ctx: &FormatContext) -> String {
    in_stem(ctx, "rg")
}

pub fn plugin() -> Plugin {
    Plugin::new("ripgrep", "BurntSushi/ripgrep")
        .cmd("rg")
        .filename("ripgrep-{version}-{arch}-{platform}.tar.gz")
        .platform_map(RUST_TARGET_MUSL)
        .checksum_file("{filename}.sha256")
        .bin_path(Template::Computed(bin))
}
