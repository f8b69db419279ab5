//! Plugin descriptors and the registry
//!
//! A [`Plugin`] is plain data plus a few function pointers. The install
//! pipeline only ever reads its fields; nothing dispatches on the plugin's
//! name.

use crate::error::{Error, Result};
use crate::platform::TokenMap;
use crate::template::{FormatContext, Template};
use crate::verify::{Checksum, ChecksumStage};
use crate::versions::{self, ReleaseFilter, SortKeyFn};
use std::collections::BTreeMap;
use std::path::Path;

/// Maps between normalized versions and release tags.
pub type VersionFn = fn(&str) -> String;

/// Custom placement: `(plugin, extraction root, install root, context)`.
pub type CustomCopyFn = fn(&Plugin, &Path, &Path, &FormatContext) -> Result<()>;

/// Default raw-version recovery: the tag is the version.
pub fn identity(version: &str) -> String {
    version.to_string()
}

/// Default normalization: drop one leading `v`.
pub fn strip_v(tag: &str) -> String {
    tag.strip_prefix('v').unwrap_or(tag).to_string()
}

/// Raw-version recovery for repositories tagging `v<version>`.
pub fn prefix_v(version: &str) -> String {
    format!("v{}", version)
}

/// How to find, verify and install one tool.
#[derive(Debug, Clone)]
pub struct Plugin {
    /// Logical name, used on the command line.
    pub name: String,
    /// Installed command name.
    pub cmd: String,
    /// `owner/repo`
    pub repo_name: String,
    pub filename: Template,
    pub checksum: Checksum,
    pub checksum_stage: ChecksumStage,
    /// Path of the binary relative to the extraction root.
    pub bin_path: Template,
    pub platform_map: Option<TokenMap>,
    pub arch_map: Option<TokenMap>,
    pub recover_raw_version: VersionFn,
    pub normalize_version: VersionFn,
    /// `false` for artifacts that are the binary itself.
    pub is_compressed: bool,
    pub custom_copy: Option<CustomCopyFn>,
    pub release_filter: ReleaseFilter,
    pub sort_key: SortKeyFn,
}

impl Plugin {
    /// A plugin whose command shares its name.
    pub fn new(name: impl Into<String>, repo_name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            cmd: name.clone(),
            bin_path: Template::from(name.clone()),
            name,
            repo_name: repo_name.into(),
            filename: Template::default(),
            checksum: Checksum::None,
            checksum_stage: ChecksumStage::Download,
            platform_map: None,
            arch_map: None,
            recover_raw_version: identity,
            normalize_version: strip_v,
            is_compressed: true,
            custom_copy: None,
            release_filter: versions::accept_all,
            sort_key: versions::by_published_at,
        }
    }

    pub fn cmd(mut self, cmd: impl Into<String>) -> Self {
        self.cmd = cmd.into();
        self
    }

    pub fn filename(mut self, template: impl Into<Template>) -> Self {
        self.filename = template.into();
        self
    }

    pub fn checksum(mut self, checksum: Checksum) -> Self {
        self.checksum = checksum;
        self
    }

    /// Shorthand for a `<hash>  <filename>` companion file.
    pub fn checksum_file(self, template: impl Into<Template>) -> Self {
        self.checksum(Checksum::File(template.into()))
    }

    pub fn checksum_stage(mut self, stage: ChecksumStage) -> Self {
        self.checksum_stage = stage;
        self
    }

    pub fn bin_path(mut self, template: impl Into<Template>) -> Self {
        self.bin_path = template.into();
        self
    }

    pub fn platform_map(mut self, map: TokenMap) -> Self {
        self.platform_map = Some(map);
        self
    }

    pub fn arch_map(mut self, map: TokenMap) -> Self {
        self.arch_map = Some(map);
        self
    }

    pub fn recover_raw_version(mut self, f: VersionFn) -> Self {
        self.recover_raw_version = f;
        self
    }

    pub fn normalize_version(mut self, f: VersionFn) -> Self {
        self.normalize_version = f;
        self
    }

    /// Mark the artifact as the raw binary.
    pub fn uncompressed(mut self) -> Self {
        self.is_compressed = false;
        self
    }

    pub fn custom_copy(mut self, f: CustomCopyFn) -> Self {
        self.custom_copy = Some(f);
        self
    }

    pub fn release_filter(mut self, f: ReleaseFilter) -> Self {
        self.release_filter = f;
        self
    }

    pub fn sort_key(mut self, f: SortKeyFn) -> Self {
        self.sort_key = f;
        self
    }
}

/// Named plugin descriptors.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    plugins: BTreeMap<String, Plugin>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in tool catalog.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        crate::plugins::register_all(&mut registry);
        registry
    }

    /// Add or replace a plugin under its logical name.
    pub fn register(&mut self, plugin: Plugin) {
        self.plugins.insert(plugin.name.clone(), plugin);
    }

    pub fn load(&self, name: &str) -> Result<&Plugin> {
        self.plugins
            .get(name)
            .ok_or_else(|| Error::PluginNotFound(name.to_string()))
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.plugins.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}
