use crate::plugin::Plugin;

pub fn plugin() -> Plugin {
    Plugin::new("taplo", "tamasfe/taplo")
        .filename("taplo-full-{platform}-{arch}.gz")
        .bin_path("taplo")
}
