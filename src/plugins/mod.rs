//! Built-in tool catalog
//!
//! One module per tool, each exposing `plugin()`. Vendor naming tables that
//! several tools share live here.

use crate::platform::TokenMap;
use crate::plugin::Registry;
use crate::template::{archive_stem, FormatContext};

mod biome;
mod clangd;
mod fd;
mod fzf;
mod gh;
mod gofumpt;
mod hadolint;
mod lazygit;
mod lua_language_server;
mod marksman;
pub mod minisign;
mod neovim;
mod ripgrep;
mod rust_analyzer;
mod shellcheck;
mod shfmt;
mod starship;
mod stylua;
mod taplo;
mod tree_sitter;
mod uv;
mod zellij;
mod zig;
mod zls;
mod zoxide;

/// Rust target triples, glibc flavor.
pub(crate) const RUST_TARGET_GNU: TokenMap =
    &[("darwin", "apple-darwin"), ("linux", "unknown-linux-gnu")];

/// Rust target triples, musl flavor.
pub(crate) const RUST_TARGET_MUSL: TokenMap =
    &[("darwin", "apple-darwin"), ("linux", "unknown-linux-musl")];

pub(crate) const MACOS: TokenMap = &[("darwin", "macos")];

/// Go's GOARCH names.
pub(crate) const GO_ARCH: TokenMap = &[("x86_64", "amd64"), ("aarch64", "arm64")];

/// Node's `process.arch` names.
pub(crate) const NODE_ARCH: TokenMap = &[("x86_64", "x64"), ("aarch64", "arm64")];

pub(crate) const ARM64: TokenMap = &[("aarch64", "arm64")];

/// `<archive stem>/<tail>`, for archives with a top-level directory named after them.
pub(crate) fn in_stem(ctx: &FormatContext, tail: &str) -> String {
    format!("{}/{}", archive_stem(&ctx.filename), tail)
}

/// Register every built-in plugin.
pub fn register_all(registry: &mut Registry) {
    for plugin in [
        biome::plugin(),
        clangd::plugin(),
        fd::plugin(),
        fzf::plugin(),
        gh::plugin(),
        gofumpt::plugin(),
        hadolint::plugin(),
        lazygit::plugin(),
        lua_language_server::plugin(),
        marksman::plugin(),
        minisign::plugin(),
        neovim::plugin(),
        ripgrep::plugin(),
        rust_analyzer::plugin(),
        shellcheck::plugin(),
        shfmt::plugin(),
        starship::plugin(),
        stylua::plugin(),
        taplo::plugin(),
        tree_sitter::plugin(),
        uv::plugin(),
        zellij::plugin(),
        zig::plugin(),
        zls::plugin(),
        zoxide::plugin(),
    ] {
        registry.register(plugin);
    }
}
