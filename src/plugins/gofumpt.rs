use super::GO_ARCH;
use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("gofumpt", "mvdan/gofumpt")
        .filename("gofumpt_{version}_{platform}_{arch}")
        .arch_map(GO_ARCH)
        .checksum_file("sha256sums.txt")
        .bin_path("gofumpt")
        .uncompressed()
        .recover_raw_version(prefix_v)
}
