use super::ARM64;
use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("hadolint", "hadolint/hadolint")
        .filename("hadolint-{platform}-{arch}")
        .platform_map(&[("darwin", "Darwin"), ("linux", "Linux")])
        .arch_map(ARM64)
        .checksum_file("{filename}.sha256")
        .bin_path("hadolint")
        .uncompressed()
        .recover_raw_version(prefix_v)
}
