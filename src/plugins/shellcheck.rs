use crate::plugin::{prefix_v, Plugin};

pub fn plugin() -> Plugin {
    Plugin::new("shellcheck", "koalaman/shellcheck")
        .filename("shellcheck-{version}.{platform}.{arch}.tar.xz")
        .bin_path("shellcheck-{version}/shellcheck")
        .recover_raw_version(prefix_v)
}
