use super::RUST_TARGET_GNU;
use crate::plugin::Plugin;

pub fn plugin() -> Plugin {
    Plugin::new("rust-analyzer", "rust-lang/rust-analyzer")
        .filename("rust-analyzer-{arch}-{platform}.gz")
        .platform_map(RUST_TARGET_GNU)
        .bin_path("rust-analyzer")
}
