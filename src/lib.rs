//! Version-manager plugins for tools distributed as GitHub release assets
//!
//! Each tool is described by a [`Plugin`]: how its release assets are named,
//! how platform and architecture tokens are spelled, where the binary sits
//! inside the archive and how the download is verified. One install
//! pipeline serves all of them.
//!
//! # Example
//!
//! ```no_run
//! use gh_release_plugins::{Installer, Settings};
//! use std::path::Path;
//!
//! let installer = Installer::new(Settings::from_env());
//! let versions = installer.list("ripgrep", 10, false)?;
//! if let Some(latest) = versions.last() {
//!     installer.install("ripgrep", latest, Path::new("/opt/tools/ripgrep"))?;
//! }
//! # Ok::<(), gh_release_plugins::Error>(())
//! ```
//!
//! # Templates
//!
//! Filenames, checksum filenames and in-archive binary paths are
//! [`Template`]s resolved against a [`FormatContext`] with the keys
//! `name`, `repo_name`, `version`, `normalize_version`, `platform`, `arch`,
//! `filename` and `checksum_filename`.
//!
//! # Verification
//!
//! - [`Checksum::Digest`] - an expected SHA-256 supplied by the plugin
//! - [`Checksum::File`] - a `<hash>  <filename>` companion file
//! - [`Checksum::GithubApi`] - the asset digest reported by the release API
//! - [`Checksum::Minisign`] - a detached minisign signature
//! - [`Checksum::Custom`] - a plugin-supplied checker

pub mod core;
pub mod error;
pub mod extract;
pub mod github;
pub mod install;
pub mod platform;
pub mod plugin;
pub mod plugins;
pub mod template;
pub mod verify;
pub mod versions;

pub use crate::core::config::Settings;
pub use crate::core::output;
pub use error::{Error, Result};
pub use install::Installer;
pub use platform::{Arch, Platform};
pub use plugin::{Plugin, Registry};
pub use template::{FormatContext, Template};
pub use verify::{Checksum, ChecksumStage};
pub use versions::{OutputFormat, DEFAULT_LIMIT};
