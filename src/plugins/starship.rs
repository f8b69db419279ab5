use super::RUST_TARGET_GNU;
use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("starship", "starship/starship")
        .filename("starship-{arch}-{platform}.tar.gz")
        .platform_map(RUST_TARGET_GNU)
        .checksum_file("{filename}.sha256")
        .bin_path("starship")
        .recover_raw_version(prefix_v)
}
