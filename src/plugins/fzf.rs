use super::GO_ARCH;
use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("fzf", "junegunn/fzf")
        .filename("fzf-{normalize_version}-{platform}_{arch}.tar.gz")
        .arch_map(GO_ARCH)
        .checksum_file("fzf_{normalize_version}_checksums.txt")
        .bin_path("fzf")
        .recover_raw_version(prefix_v)
}
