use super::{in_stem, RUST_TARGET_GNU};
use crate::plugin::{prefix_v, Plugin};
use crate::template::{FormatContext, Template};

fn bin(ctx: &FormatContext) -> String {
    in_stem(ctx, "fd")
}

pub fn plugin() -> Plugin {
    Plugin::new("fd", "sharkdp/fd")
        .filename("fd-{version}-{arch}-{platform}.tar.gz")
        .platform_map(RUST_TARGET_GNU)
        .bin_path(Template::Computed(bin))
        .recover_raw_version(prefix_v)
}
