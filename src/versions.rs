//! Version listing
//!
//! The release list is filtered, sorted newest-first by the plugin's sort
//! key, cut to the most recent `limit` entries and then reversed, so the
//! newest version is printed last.

use crate::error::{Error, Result};
use crate::github::{GitHub, Release};
use crate::plugin::Plugin;
use chrono::NaiveDateTime;

/// How many versions `list` shows.
pub const DEFAULT_LIMIT: usize = 10;

/// Timestamp format of the `published_at` field.
const PUBLISHED_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Filter predicate over releases.
pub type ReleaseFilter = fn(&Release) -> bool;

/// Sort key over releases; `None` means the release carries no usable key.
pub type SortKeyFn = fn(&Release) -> Option<ReleaseKey>;

/// Orderable key derived from a release.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseKey {
    Published(NaiveDateTime),
    Version(semver::Version),
}

/// Default filter: keep everything, prereleases included.
pub fn accept_all(_: &Release) -> bool {
    true
}

/// Default sort key: the `published_at` timestamp.
pub fn by_published_at(release: &Release) -> Option<ReleaseKey> {
    let raw = release.published_at.as_deref()?;
    NaiveDateTime::parse_from_str(raw, PUBLISHED_AT_FORMAT)
        .ok()
        .map(ReleaseKey::Published)
}

/// Sort by the tag parsed as a semantic version, ignoring a leading `v`.
pub fn by_semver_tag(release: &Release) -> Option<ReleaseKey> {
    let tag = release.tag_name.strip_prefix('v').unwrap_or(&release.tag_name);
    semver::Version::parse(tag).ok().map(ReleaseKey::Version)
}

/// Pick the `limit` most recent releases, returned oldest first.
pub fn select_releases(
    repo: &str,
    releases: Vec<Release>,
    filter: ReleaseFilter,
    sort_key: SortKeyFn,
    limit: usize,
) -> Result<Vec<Release>> {
    let mut keyed = releases
        .into_iter()
        .filter(|r| filter(r))
        .map(|r| match sort_key(&r) {
            Some(key) => Ok((key, r)),
            None => Err(Error::List {
                repo: repo.to_string(),
                message: format!("cannot derive sort key for release '{}'", r.tag_name),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.truncate(limit);
    keyed.reverse();

    Ok(keyed.into_iter().map(|(_, r)| r).collect())
}

/// Fetch and select releases of `repo`.
pub fn list_releases(
    client: &GitHub,
    repo: &str,
    filter: ReleaseFilter,
    sort_key: SortKeyFn,
    limit: usize,
) -> Result<Vec<Release>> {
    let releases = client.releases(repo)?;
    tracing::debug!(repo, count = releases.len(), "fetched releases");
    select_releases(repo, releases, filter, sort_key, limit)
}

/// Normalized version identifiers for a plugin, newest last.
///
/// With `with_published_at`, each entry is rendered `<version>#<published_at>`.
pub fn list_versions(
    client: &GitHub,
    plugin: &Plugin,
    limit: usize,
    with_published_at: bool,
) -> Result<Vec<String>> {
    let releases = list_releases(
        client,
        &plugin.repo_name,
        plugin.release_filter,
        plugin.sort_key,
        limit,
    )?;

    Ok(releases
        .iter()
        .map(|r| {
            let version = (plugin.normalize_version)(&r.tag_name);
            if with_published_at {
                format!("{}#{}", version, r.published_at.as_deref().unwrap_or(""))
            } else {
                version
            }
        })
        .collect())
}

/// How `list` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Txt,
}

/// Render a version list as a JSON array or newline-separated text.
pub fn render(versions: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(versions).unwrap_or_else(|_| "[]".to_string()),
        OutputFormat::Txt => versions.join("\n"),
    }
}
