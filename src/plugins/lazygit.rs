use super::ARM64;
use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("lazygit", "jesseduffield/lazygit")
        .filename("lazygit_{normalize_version}_{platform}_{arch}.tar.gz")
        .arch_map(ARM64)
        .checksum_file("checksums.txt")
        .bin_path("lazygit")
        .recover_raw_version(prefix_v)
}
