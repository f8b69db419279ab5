use super::NODE_ARCH;
use crate::github::Release;
use crate::plugin::Plugin;

const TAG_PREFIX: &str = "cli/v";

fn recover(version: &str) -> String {
    format!("{}{}", TAG_PREFIX, version)
}

fn normalize(tag: &str) -> String {
    tag.strip_prefix(TAG_PREFIX).unwrap_or(tag).to_string()
}

/// The repository also tags editor extensions and nightlies.
fn stable_cli(release: &Release) -> bool {
    release.tag_name.starts_with(TAG_PREFIX) && !release.prerelease
}

pub fn plugin() -> Plugin {
    Plugin::new("biome", "biomejs/biome")
        .filename("biome-{platform}-{arch}")
        .arch_map(NODE_ARCH)
        .bin_path("biome")
        .uncompressed()
        .recover_raw_version(recover)
        .normalize_version(normalize)
        .release_filter(stable_cli)
}
