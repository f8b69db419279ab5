use super::MACOS;
use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("stylua", "JohnnyMorganz/StyLua")
        .filename("stylua-{platform}-{arch}.zip")
        .platform_map(MACOS)
        .bin_path("stylua")
        .recover_raw_version(prefix_v)
}
