use super::GO_ARCH;
use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("shfmt", "mvdan/sh")
        .filename("shfmt_{version}_{platform}_{arch}")
        .arch_map(GO_ARCH)
        .checksum_file("sha256sums.txt")
        .bin_path("shfmt")
        .uncompressed()
        .recover_raw_version(prefix_v)
}
