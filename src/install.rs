//! The install pipeline
//!
//! ```text
//! load plugin -> host tokens -> format context -> filename / checksum / bin path
//!   -> download -> [verify] -> extract or copy -> [verify] -> place
//! ```
//!
//! Everything up to placement happens inside a scratch directory owned by
//! the call, so a failure before placement never touches the install root.
//! The scratch directory is removed on every exit path.

use crate::core::config::Settings;
use crate::core::output;
use crate::error::{Error, IoContext, Result};
use crate::extract;
use crate::github::GitHub;
use crate::platform::{self, Arch, Platform};
use crate::plugin::{Plugin, Registry};
use crate::template::FormatContext;
use crate::verify::{ChecksumStage, Verifier};
use crate::versions;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Mode given to installed commands.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// Name of the extraction directory inside the scratch directory.
const EXTRACT_DIR: &str = "extract";

/// Lists and installs tools described by a plugin registry.
#[derive(Debug, Clone)]
pub struct Installer {
    client: GitHub,
    registry: Registry,
    host: Option<(Platform, Arch)>,
}

impl Installer {
    /// An installer over the built-in catalog.
    pub fn new(settings: Settings) -> Self {
        Self {
            client: GitHub::new(settings),
            registry: Registry::builtin(),
            host: None,
        }
    }

    pub fn with_registry(mut self, registry: Registry) -> Self {
        self.registry = registry;
        self
    }

    /// Pin the host instead of detecting it.
    pub fn with_host(mut self, platform: Platform, arch: Arch) -> Self {
        self.host = Some((platform, arch));
        self
    }

    pub fn client(&self) -> &GitHub {
        &self.client
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn host(&self) -> Result<(Platform, Arch)> {
        match self.host {
            Some(host) => Ok(host),
            None => platform::detect(),
        }
    }

    /// Up to `limit` normalized versions of a plugin, newest last.
    pub fn list(&self, name: &str, limit: usize, with_published_at: bool) -> Result<Vec<String>> {
        let plugin = self.registry.load(name)?;
        versions::list_versions(&self.client, plugin, limit, with_published_at)
    }

    /// Web URL of a plugin's repository.
    pub fn repo_url(&self, name: &str) -> Result<String> {
        let plugin = self.registry.load(name)?;
        Ok(self.client.repo_url(&plugin.repo_name))
    }

    /// A fresh scratch directory, removed when the handle drops.
    pub fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("ghrp-");
        match &self.client.settings().scratch_dir {
            Some(parent) => {
                std::fs::create_dir_all(parent).at(parent)?;
                builder.tempdir_in(parent).at(parent)
            }
            None => Ok(builder.tempdir()?),
        }
    }

    /// Initial context for installing `version` of `plugin` on this host.
    ///
    /// `filename` and `checksum_filename` are left empty.
    pub fn format_context(&self, plugin: &Plugin, version: &str) -> Result<FormatContext> {
        let (platform, arch) = self.host()?;
        Ok(FormatContext {
            name: plugin.name.clone(),
            repo_name: plugin.repo_name.clone(),
            version: (plugin.recover_raw_version)(version),
            normalize_version: version.to_string(),
            platform: platform::translate(platform.as_str(), plugin.platform_map),
            arch: platform::translate(arch.as_str(), plugin.arch_map),
            filename: String::new(),
            checksum_filename: String::new(),
        })
    }

    /// Install `version` of the plugin called `name` under `root`.
    pub fn install(&self, name: &str, version: &str, root: &Path) -> Result<()> {
        let plugin = self.registry.load(name)?;
        self.install_plugin(plugin, version, root)
    }

    /// Run the pipeline for an already-loaded plugin.
    pub fn install_plugin(&self, plugin: &Plugin, version: &str, root: &Path) -> Result<()> {
        let root = std::path::absolute(root).at(root)?;
        output::action(&format!("Installing {} {}", plugin.name, version));

        let mut ctx = self.format_context(plugin, version)?;
        ctx.filename = plugin.filename.format(&ctx)?;
        ctx.checksum_filename = match plugin.checksum.companion() {
            Some(template) => template.format(&ctx)?,
            None => String::new(),
        };
        let bin_path = plugin.bin_path.format(&ctx)?;
        tracing::debug!(
            filename = %ctx.filename,
            checksum_filename = %ctx.checksum_filename,
            %bin_path,
            "resolved templates"
        );

        let url = self
            .client
            .resolve_asset_url(&ctx.repo_name, &ctx.version, &ctx.filename);

        let scratch = self.scratch_dir()?;
        let result = self.run_stages(plugin, &ctx, &url, &bin_path, scratch.path(), &root);

        let scratch_path = scratch.path().to_path_buf();
        if let Err(e) = scratch.close() {
            tracing::warn!(path = %scratch_path.display(), error = %e, "failed to remove scratch directory");
            output::warning(&format!(
                "could not remove {}: {}",
                scratch_path.display(),
                e
            ));
        }

        result?;
        output::success(&format!("{} {} installed", plugin.name, version));
        Ok(())
    }

    fn run_stages(
        &self,
        plugin: &Plugin,
        ctx: &FormatContext,
        url: &str,
        bin_path: &str,
        scratch: &Path,
        root: &Path,
    ) -> Result<()> {
        output::sub_action("download");
        let download = scratch.join(artifact_name(&ctx.filename));
        self.client.download(url, &download)?;

        let verifier = Verifier::prepare(self, &plugin.checksum, ctx, scratch)?;
        if plugin.checksum_stage == ChecksumStage::Download {
            verifier.verify(self, &download)?;
        }

        output::sub_action("extract");
        let extract_root = scratch.join(EXTRACT_DIR);
        std::fs::create_dir_all(&extract_root).at(&extract_root)?;
        if plugin.is_compressed {
            extract::extract(&download, &extract_root, bin_path)?;
        } else {
            extract::copy_raw(&download, &extract_root, bin_path)?;
        }

        let binary = contained(plugin, &extract_root, bin_path)?;
        if plugin.checksum_stage == ChecksumStage::Extract {
            verifier.verify(self, &binary)?;
        }

        output::sub_action("install");
        match plugin.custom_copy {
            None => {
                place_binary(&binary, root, &plugin.cmd)?;
            }
            Some(copy) => {
                tracing::debug!(name = %plugin.name, "using custom placement");
                copy(plugin, &extract_root, root, ctx).map_err(|e| match e {
                    Error::Placement { .. } | Error::BinaryNotFound(_) => e,
                    other => Error::Placement {
                        plugin: plugin.name.clone(),
                        message: other.to_string(),
                    },
                })?;
            }
        }

        Ok(())
    }
}

/// Local name of a downloaded artifact: the last path segment.
fn artifact_name(filename: &str) -> &str {
    filename.rsplit('/').next().unwrap_or(filename)
}

fn contained(plugin: &Plugin, extract_root: &Path, bin_path: &str) -> Result<PathBuf> {
    if bin_path.is_empty() {
        return Ok(extract_root.to_path_buf());
    }
    if !extract::is_contained(Path::new(bin_path)) {
        return Err(Error::Placement {
            plugin: plugin.name.clone(),
            message: format!("binary path '{}' escapes the extraction root", bin_path),
        });
    }
    Ok(extract_root.join(bin_path))
}

/// Copy `src` to `root/bin/<cmd>` and make it executable.
pub fn place_binary(src: &Path, root: &Path, cmd: &str) -> Result<PathBuf> {
    if !src.is_file() {
        return Err(Error::BinaryNotFound(src.to_path_buf()));
    }

    let bin_dir = root.join("bin");
    std::fs::create_dir_all(&bin_dir).at(&bin_dir)?;

    let dest = bin_dir.join(cmd);
    std::fs::copy(src, &dest).at(&dest)?;
    mark_executable(&dest)?;

    output::detail(&format!("installed {}", dest.display()));
    Ok(dest)
}

/// Recursively copy the tree at `src` into `dst`, merging with existing content.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    if !src.is_dir() {
        return Err(Error::BinaryNotFound(src.to_path_buf()));
    }

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(src).to_path_buf();
            Error::Path {
                source: e.into(),
                path,
            }
        })?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&target).at(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).at(parent)?;
            }
            std::fs::copy(entry.path(), &target).at(&target)?;
        }
    }

    Ok(())
}

#[cfg(unix)]
fn copy_symlink(src: &Path, target: &Path) -> Result<()> {
    let link = std::fs::read_link(src).at(src)?;
    if std::fs::symlink_metadata(target).is_ok() {
        std::fs::remove_file(target).at(target)?;
    }
    std::os::unix::fs::symlink(&link, target).at(target)
}

#[cfg(not(unix))]
fn copy_symlink(src: &Path, target: &Path) -> Result<()> {
    std::fs::copy(src, target).at(target)?;
    Ok(())
}

/// Set [`EXECUTABLE_MODE`] on `path`.
#[cfg(unix)]
pub fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(EXECUTABLE_MODE)).at(path)
}

#[cfg(not(unix))]
pub fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
