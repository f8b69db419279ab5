use super::{MACOS, NODE_ARCH};
use crate::plugin::Plugin;
use crate::template::{FormatContext, Template};

/// The macOS build is universal and carries no arch suffix.
fn filename(ctx: &FormatContext) -> String {
    if ctx.platform == "macos" {
        "marksman-macos".to_string()
    } else {
        format!("marksman-{}-{}", ctx.platform, ctx.arch)
    }
}

pub fn plugin() -> Plugin {
    Plugin::new("marksman", "artempyanykh/marksman")
        .filename(Template::Computed(filename))
        .platform_map(MACOS)
        .arch_map(NODE_ARCH)
        .bin_path("marksman")
        .uncompressed()
}
