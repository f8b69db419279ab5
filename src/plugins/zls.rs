use super::MACOS;
use crate::plugin::Plugin;
use crate::verify::Checksum;

const PUBLIC_KEY: &str = "RWR+9B91GBZ0zOjh6Lr17+zKf5BoSuFvrx2xSeDE57uIYvnKBGmMjOex";

pub fn plugin() -> Plugin {
    Plugin::new("zls", "zigtools/zls")
        .filename("zls-{arch}-{platform}.tar.xz")
        .platform_map(MACOS)
        .checksum(Checksum::Minisign {
            signature: "{filename}.minisig".into(),
            public_key: PUBLIC_KEY,
        })
        .bin_path("zls")
}
