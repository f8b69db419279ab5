//! GitHub transport: release listing, release-by-tag lookup and asset downloads
//!
//! URL shapes relative to the configured base URLs:
//!
//! - `{api}/repos/{repo}/releases`
//! - `{api}/repos/{repo}/releases/tags/{tag}`
//! - `{web}/{repo}/releases/download/{tag}/{asset}`
//!
//! Set `GITHUB_TOKEN` to raise the API rate limit from 60/hr to 5000/hr.

use crate::core::config::Settings;
use crate::core::output;
use crate::error::{Error, IoContext, Result};
use serde::Deserialize;
use std::io::{Read, Write};
use std::path::Path;

const USER_AGENT: &str = concat!("ghrp/", env!("CARGO_PKG_VERSION"));

/// One entry of a repository's release list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// A downloadable file attached to a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub name: String,
    /// Content digest in `sha256:<hex>` form, when GitHub has computed one.
    #[serde(default)]
    pub digest: Option<String>,
}

/// True when `name` is already an absolute http(s) URL.
pub fn is_url(name: &str) -> bool {
    name.starts_with("https://") || name.starts_with("http://")
}

/// Blocking GitHub client.
#[derive(Debug, Clone)]
pub struct GitHub {
    settings: Settings,
    agent: ureq::Agent,
}

impl GitHub {
    pub fn new(settings: Settings) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = settings.http_timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            settings,
            agent: builder.build(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Web URL of a repository.
    pub fn repo_url(&self, repo: &str) -> String {
        format!("{}/{}", self.settings.github_url, repo)
    }

    pub fn releases_url(&self, repo: &str) -> String {
        format!("{}/repos/{}/releases", self.settings.api_url, repo)
    }

    pub fn release_tag_url(&self, repo: &str, tag: &str) -> String {
        format!("{}/tags/{}", self.releases_url(repo), tag)
    }

    /// Standard release-asset download URL.
    pub fn asset_url(&self, repo: &str, tag: &str, asset: &str) -> String {
        format!("{}/releases/download/{}/{}", self.repo_url(repo), tag, asset)
    }

    /// Use `name` verbatim when it is a full URL, otherwise build the asset URL.
    pub fn resolve_asset_url(&self, repo: &str, tag: &str, name: &str) -> String {
        if is_url(name) {
            name.to_string()
        } else {
            self.asset_url(repo, tag, name)
        }
    }

    /// Create an API request with the proper headers and optional auth.
    fn api_request(&self, url: &str) -> ureq::Request {
        let mut request = self
            .agent
            .get(url)
            .set("Accept", "application/vnd.github+json");

        if let Some(token) = &self.settings.token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        request
    }

    /// Fetch the release list of a repository.
    pub fn releases(&self, repo: &str) -> Result<Vec<Release>> {
        let url = self.releases_url(repo);
        tracing::debug!(%url, "fetching release list");

        let list_error = |message: String| Error::List {
            repo: repo.to_string(),
            message,
        };

        let response = self.api_request(&url).call().map_err(|e| match e {
            ureq::Error::Status(403, _) => list_error(
                "GitHub API rate limit exceeded. Try again later or set GITHUB_TOKEN.".to_string(),
            ),
            ureq::Error::Status(404, _) => list_error(format!("repository '{}' not found", repo)),
            e => list_error(e.to_string()),
        })?;

        response
            .into_json::<Vec<Release>>()
            .map_err(|e| list_error(format!("failed to parse release list: {}", e)))
    }

    /// Fetch the metadata of the release tagged `tag`.
    pub fn release_by_tag(&self, repo: &str, tag: &str) -> Result<Release> {
        let url = self.release_tag_url(repo, tag);
        tracing::debug!(%url, "fetching release by tag");

        let response = self.api_request(&url).call().map_err(|e| match e {
            ureq::Error::Status(status, _) => Error::Api {
                url: url.clone(),
                status,
            },
            e => Error::Download {
                url: url.clone(),
                message: e.to_string(),
            },
        })?;

        response.into_json::<Release>().map_err(|e| Error::Download {
            url: url.clone(),
            message: format!("failed to parse release: {}", e),
        })
    }

    /// Download `url` to `dest`, returning the number of bytes written.
    pub fn download(&self, url: &str, dest: &Path) -> Result<u64> {
        let filename = dest
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "download".to_string());

        output::detail(&format!("downloading {}", url));
        let pb = output::spinner(&format!("downloading {}", filename));
        let result = self.download_into(url, dest, &pb);
        pb.finish_and_clear();

        let total = result?;
        output::detail(&format!("downloaded {} ({} bytes)", filename, total));
        Ok(total)
    }

    fn download_into(&self, url: &str, dest: &Path, pb: &indicatif::ProgressBar) -> Result<u64> {
        let download_error = |message: String| Error::Download {
            url: url.to_string(),
            message,
        };

        let response = self
            .agent
            .get(url)
            .call()
            .map_err(|e| download_error(e.to_string()))?;

        if let Some(len) = response
            .header("content-length")
            .and_then(|s| s.parse().ok())
        {
            output::upgrade_to_bytes(pb, len);
        }

        let mut file = std::fs::File::create(dest).at(dest)?;
        let mut reader = response.into_reader();
        let mut buffer = [0u8; 8192];
        let mut total_bytes = 0u64;

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| download_error(format!("read error: {}", e)))?;

            if bytes_read == 0 {
                break;
            }

            file.write_all(&buffer[..bytes_read]).at(dest)?;
            total_bytes += bytes_read as u64;
            pb.set_position(total_bytes);
        }

        file.flush().at(dest)?;
        Ok(total_bytes)
    }
}
