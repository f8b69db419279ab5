use super::RUST_TARGET_MUSL;
use crate::plugin::{prefix_v, Plugin};
use crate::verify::ChecksumStage;

/// The published sum covers the unpacked binary, not the tarball.
pub fn plugin() -> Plugin {
    Plugin::new("zellij", "zellij-org/zellij")
        .filename("zellij-{arch}-{platform}.tar.gz")
        .platform_map(RUST_TARGET_MUSL)
        .checksum_file("zellij-{arch}-{platform}.sha256sum")
        .checksum_stage(ChecksumStage::Extract)
        .bin_path("zellij")
        .recover_raw_version(prefix_v)
}
